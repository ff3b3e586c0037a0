//! The clock task: advances logical time and fires the deadline.

use crate::deadline;
use crate::office::Office;
use admission_core::ApplicantState;
use admission_env::AdmissionContext;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tracing::{debug, info};

/// Ticks the logical clock at a fixed cadence for the whole run.
pub struct Timekeeper<Ctx: AdmissionContext> {
    office: Office<Ctx>,
    interval: Duration,
    /// Random stream handed to the ranked selection
    selection_rng: Option<ChaCha8Rng>,
}

impl<Ctx: AdmissionContext> Timekeeper<Ctx> {
    pub fn new(office: Office<Ctx>, interval: Duration, selection_rng: ChaCha8Rng) -> Self {
        Self {
            office,
            interval,
            selection_rng: Some(selection_rng),
        }
    }

    /// Never returns; the run aborts it when the budget is spent.
    pub async fn run(mut self) {
        loop {
            self.office.context.sleep(self.interval).await;
            let now = self.office.clock.advance(1);

            if self.office.deadline.try_fire(now) {
                self.fire_deadline();
            } else if now.value() % 100 == 0 {
                debug!("clock at {}", now);
            }
        }
    }

    /// Snapshots both populations and spawns the two batches without
    /// waiting for them.
    fn fire_deadline(&mut self) {
        let office = &self.office;
        let pending = office.registry.ids_in_state(ApplicantState::WaitingForMoreInfo);
        let ranked = office.registry.ids_in_state(ApplicantState::Ranked);
        info!(
            "deadline reached at {}: {} waiting, {} ranked",
            office.clock.now(),
            pending.len(),
            ranked.len()
        );

        office.spawn("deadline-closure", deadline::close_pending(office.clone(), pending));
        if let Some(rng) = self.selection_rng.take() {
            office.spawn(
                "ranked-selection",
                deadline::select_ranked(office.clone(), ranked, rng),
            );
        }
    }
}
