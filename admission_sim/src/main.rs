//! Admission simulator CLI
//!
//! Runs one admission process and prints a per-state summary, optionally
//! exporting the dated event log.

use admission_env::Tick;
use admission_sim::exporter::{self, DEFAULT_EPOCH};
use admission_sim::{
    ApplicantGenerator, ScenarioId, SimConfig, SimContext, SimError, SimOutcome, Simulation, TraceExport,
};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

/// Admission pipeline simulator
#[derive(Parser, Debug)]
#[command(name = "admission-sim")]
#[command(about = "Simulate a university admission pipeline", long_about = None)]
struct Args {
    /// Master seed for the random streams (0 = random from time)
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Number of applicants
    #[arg(short, long)]
    applicants: Option<usize>,

    /// Logical tick at which the deadline fires
    #[arg(short, long)]
    deadline: Option<u64>,

    /// Scenario preset (baseline, late_rush, bottleneck, open_doors)
    #[arg(short = 'S', long, default_value = "baseline")]
    scenario: String,

    /// Wall-time budget in milliseconds
    #[arg(long)]
    budget_ms: Option<u64>,

    /// Wall time between clock ticks in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Capacity of every queue
    #[arg(long)]
    queue_capacity: Option<usize>,

    /// Date that tick 0 maps to (RFC 3339)
    #[arg(long, default_value = DEFAULT_EPOCH)]
    epoch: String,

    /// Write the dated trace as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the dated events as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print each applicant's event titles
    #[arg(long)]
    trace: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Scenario preset with the explicit flags layered on top.
    fn config(&self, seed: u64) -> Result<(ScenarioId, SimConfig), SimError> {
        let scenario: ScenarioId = self.scenario.parse().map_err(SimError::Scenario)?;
        let mut config = scenario.configure(SimConfig {
            seed,
            ..SimConfig::default()
        });

        if let Some(count) = self.applicants {
            config.applicant_count = count;
        }
        if let Some(deadline) = self.deadline {
            config.deadline = Tick(deadline);
        }
        if let Some(ms) = self.budget_ms {
            config.budget = Duration::from_millis(ms);
        }
        if let Some(ms) = self.tick_ms {
            config.tick_interval = Duration::from_millis(ms);
        }
        if let Some(capacity) = self.queue_capacity {
            config.queue_capacity = capacity;
        }

        config.validate()?;
        Ok((scenario, config))
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn base_seed(seed: u64) -> u64 {
    if seed != 0 {
        return seed;
    }
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

fn print_summary(scenario: ScenarioId, outcome: &SimOutcome, trace: bool) {
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!(
        "{} finished at {} with {} events (deadline {})",
        scenario,
        outcome.final_tick,
        outcome.events.len(),
        if outcome.deadline_fired { "fired" } else { "not reached" }
    );
    for (state, count) in outcome.state_counts() {
        info!("  {:<20} {}", state, count);
    }

    if trace {
        for (id, titles) in outcome.traces() {
            let titles: Vec<&str> = titles.iter().map(|t| t.title()).collect();
            println!("{}: {}", id, titles.join(" -> "));
        }
    }
}

async fn run(args: Args) -> Result<(), SimError> {
    let seed = base_seed(args.seed);
    let (scenario, config) = args.config(seed)?;
    let epoch = exporter::parse_epoch(&args.epoch)?;

    info!("Admission simulator v{}", env!("CARGO_PKG_VERSION"));
    info!("scenario {}: {}", scenario, scenario.description());

    let applicants = ApplicantGenerator::new(seed).generate(config.applicant_count);
    let simulation = Simulation::new(config, SimContext::shared(seed), applicants)?;
    let outcome = simulation.run().await;

    print_summary(scenario, &outcome, args.trace);

    if args.json.is_some() || args.csv.is_some() {
        let export = TraceExport::new(scenario.name(), seed, &outcome, epoch);
        if let Some(path) = &args.json {
            export.write_json(path)?;
            info!("Exported {} events to {}", export.events.len(), path.display());
        }
        if let Some(path) = &args.csv {
            export.write_csv(path)?;
            info!("Exported {} events to {}", export.events.len(), path.display());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args).await {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
