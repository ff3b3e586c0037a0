//! Simulation - wires the actors together and runs them for one budget.

use crate::administration::Administration;
use crate::config::SimConfig;
use crate::messages::{AdministrationTask, RegistrationForm, StudentMail, SupplementaryInfo};
use crate::office::{Office, TaskSet};
use crate::registrar::Registrar;
use crate::student::{PostOffice, StudentActor};
use crate::timekeeper::Timekeeper;

use admission_core::{Applicant, ApplicantState, Event, EventKind, EventLog, Registry, RegistryError};
use admission_env::{queue, AdmissionContext, ApplicantId, DeadlineLatch, LogicalClock, Tick};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Random stream ids, one per consumer.
mod streams {
    pub const REGISTRAR: u64 = 1;
    pub const ADMINISTRATION: u64 = 2;
    pub const SELECTION: u64 = 3;
    pub const APPLICANT_BASE: u64 = 1_000;
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct SimOutcome {
    /// Final (or last observed) applicants, in id order
    pub applicants: Vec<Applicant>,
    /// Event log in append order
    pub events: Vec<Event>,
    /// Clock reading when the budget ran out
    pub final_tick: Tick,
    /// Whether the deadline fired during the run
    pub deadline_fired: bool,
}

impl SimOutcome {
    /// Events concerning one applicant, in append order.
    pub fn events_for(&self, id: ApplicantId) -> Vec<&Event> {
        self.events.iter().filter(|e| e.applicant == id).collect()
    }

    /// Number of applicants in each state.
    pub fn state_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts: BTreeMap<&'static str, usize> =
            ApplicantState::all().iter().map(|s| (s.name(), 0)).collect();
        for applicant in &self.applicants {
            *counts.entry(applicant.state.name()).or_default() += 1;
        }
        counts
    }

    /// Per-applicant event titles in timestamp order.
    pub fn traces(&self) -> BTreeMap<ApplicantId, Vec<EventKind>> {
        let mut traces: BTreeMap<ApplicantId, Vec<EventKind>> = self
            .applicants
            .iter()
            .map(|a| (a.id, Vec::new()))
            .collect();
        for event in crate::exporter::chronological(&self.events) {
            traces.entry(event.applicant).or_default().push(event.title);
        }
        traces
    }
}

/// The simulation - container for one run.
pub struct Simulation<Ctx: AdmissionContext> {
    config: SimConfig,
    office: Office<Ctx>,
}

impl<Ctx: AdmissionContext> Simulation<Ctx> {
    /// Creates a run over `applicants`, whose ids must be `0..n`.
    pub fn new(config: SimConfig, context: Arc<Ctx>, applicants: Vec<Applicant>) -> Result<Self, RegistryError> {
        let registry = Registry::new(applicants)?;
        let office = Office {
            context,
            clock: LogicalClock::new(),
            deadline: Arc::new(DeadlineLatch::new(config.deadline)),
            registry: Arc::new(registry),
            log: EventLog::new(),
            policy: Arc::new(config.policy.clone()),
            latency: config.latency.clone(),
            tasks: TaskSet::new(),
        };
        Ok(Self { config, office })
    }

    /// Starts every actor, waits out the wall-time budget, then abandons
    /// whatever is still in flight.
    ///
    /// Snapshots are taken only after every task has stopped, so the final
    /// applicants and the log always agree.
    pub async fn run(self) -> SimOutcome {
        let office = &self.office;
        let context = &office.context;
        let capacity = self.config.queue_capacity;

        let (registration_tx, registration_rx) = queue::bounded::<RegistrationForm>("registration", capacity);
        let (supplement_tx, supplement_rx) = queue::bounded::<SupplementaryInfo>("more-info", capacity);
        let (admin_tx, admin_rx) = queue::bounded::<AdministrationTask>("administration", capacity);
        let (mail_tx, mail_rx) = queue::bounded::<StudentMail>("student-mail", capacity);

        info!(
            "starting run: {} applicants, deadline {}, seed {}",
            office.registry.len(),
            self.config.deadline,
            context.seed()
        );

        let timekeeper = Timekeeper::new(
            office.clone(),
            self.config.tick_interval,
            context.derive_rng(streams::SELECTION),
        );
        office.spawn("clock", timekeeper.run());

        let registrar = Registrar::new(
            office.clone(),
            registration_rx,
            supplement_rx,
            admin_tx,
            context.derive_rng(streams::REGISTRAR),
        );
        office.spawn("registrar", registrar.run());

        let administration = Administration::new(
            office.clone(),
            admin_rx,
            mail_tx,
            context.derive_rng(streams::ADMINISTRATION),
        );
        office.spawn("administration", administration.run());

        let mut inboxes = Vec::with_capacity(office.registry.len());
        for id in office.registry.ids() {
            let (inbox_tx, inbox_rx) = queue::bounded::<StudentMail>("inbox", capacity);
            inboxes.push(inbox_tx);

            let student = StudentActor::new(
                id,
                office.clone(),
                registration_tx.clone(),
                supplement_tx.clone(),
                inbox_rx,
                self.config.submission_delay,
                context.derive_rng(streams::APPLICANT_BASE + id.index() as u64),
            );
            office.spawn(&format!("applicant-{}", id), student.run());
        }
        office.spawn("post-office", PostOffice::new(mail_rx, inboxes).run());

        // Only applicants hold the submission queues from here on
        drop(registration_tx);
        drop(supplement_tx);

        context.sleep(self.config.budget).await;

        let abandoned = office.tasks.shutdown().await;
        let outcome = SimOutcome {
            applicants: office.registry.applicants(),
            events: office.log.snapshot(),
            final_tick: office.clock.now(),
            deadline_fired: office.deadline.has_fired(),
        };

        info!(
            "run finished at {} after {:?}: {} events, {} tasks abandoned",
            outcome.final_tick,
            context.now(),
            outcome.events.len(),
            abandoned
        );
        outcome
    }
}
