//! Admission pipeline simulator
//!
//! Runs a university admission process as a set of concurrent actors that
//! talk over bounded queues. Applicants register, the registrar and the
//! administration decide on each registration, and a logical deadline closes
//! the process for everybody still pending.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  registration   ┌────────────┐  Evaluate / File  ┌────────────────┐
//! │  Applicant   │────────────────►│ Registrar  │──────────────────►│ Administration │
//! │   actors     │  more-info      │ (+teacher) │                   │                │
//! │              │────────────────►│            │                   │                │
//! └──────▲───────┘                 └────────────┘                   └───────┬────────┘
//!        │ inbox                                                            │ mail
//!        │                        ┌─────────────┐                           │
//!        └────────────────────────│ Post office │◄──────────────────────────┘
//!                                 └─────────────┘
//!
//! ┌─────────────┐  deadline  ┌──────────────────┐  ┌──────────────────┐
//! │ Timekeeper  │───────────►│ Deadline closure │  │ Ranked selection │
//! └─────────────┘            └──────────────────┘  └──────────────────┘
//! ```
//!
//! Every actor shares one [`Registry`](admission_core::Registry) guarded per
//! applicant and one append-only [`EventLog`](admission_core::EventLog).
//!
//! # Usage
//!
//! ```ignore
//! use admission_sim::{ApplicantGenerator, SimConfig, SimContext, Simulation};
//!
//! let config = SimConfig::default();
//! let applicants = ApplicantGenerator::new(config.seed).generate(config.applicant_count);
//! let simulation = Simulation::new(config, SimContext::shared(42), applicants)?;
//! let outcome = simulation.run().await;
//! ```

mod administration;
pub mod config;
mod context;
mod deadline;
mod error;
pub mod exporter;
mod generator;
pub mod messages;
mod office;
mod registrar;
pub mod scenarios;
mod student;
mod timekeeper;
mod world;

pub use config::{ConfigError, LatencyConfig, SimConfig};
pub use context::SimContext;
pub use error::SimError;
pub use exporter::{ExportError, TraceExport};
pub use generator::ApplicantGenerator;
pub use scenarios::ScenarioId;
pub use world::{SimOutcome, Simulation};
