//! Work spawned once when the deadline fires.
//!
//! Both batches take their population from a snapshot made at the instant
//! the deadline fires, then re-check each applicant under its lock before
//! acting. An applicant that changed state in between is skipped, so nobody
//! is both closed out and selected.

use crate::office::Office;
use admission_core::{Event, EventKind, Transition};
use admission_env::{AdmissionContext, ApplicantId};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

/// Refuses every applicant still waiting for more information.
pub async fn close_pending<Ctx: AdmissionContext>(office: Office<Ctx>, pending: Vec<ApplicantId>) {
    info!("deadline closure: {} applicants still waiting", pending.len());
    let mut closed = 0usize;

    for id in pending {
        office.context.sleep(office.latency.administration).await;
        let recorded = office.record(id, |applicant, now| match applicant.apply(Transition::CloseLate) {
            Ok(_) => Some(Event::standard(EventKind::TooLate, applicant, now)),
            Err(e) => {
                debug!(applicant = %id, "not closed out: {}", e);
                None
            }
        });
        match recorded {
            Ok(Some(_)) => closed += 1,
            Ok(None) => {}
            Err(e) => warn!("closure rejected: {}", e),
        }
    }

    info!("deadline closure done: {} refused as too late", closed);
}

/// Accepts or refuses every ranked applicant.
pub async fn select_ranked<Ctx: AdmissionContext>(
    office: Office<Ctx>,
    ranked: Vec<ApplicantId>,
    mut rng: ChaCha8Rng,
) {
    info!("ranked selection: {} candidates", ranked.len());
    let (mut accepted, mut refused) = (0usize, 0usize);

    for id in ranked {
        office.context.sleep(office.latency.administration).await;
        let (transition, kind) = if office.policy.refuses_grades(&mut rng) {
            (Transition::RefuseGrades, EventKind::RefuseGrades)
        } else {
            (Transition::Accept, EventKind::Accept)
        };
        let recorded = office.record(id, |applicant, now| match applicant.apply(transition) {
            Ok(_) => Some(Event::standard(kind, applicant, now)),
            Err(e) => {
                debug!(applicant = %id, "not selected: {}", e);
                None
            }
        });
        match recorded {
            Ok(Some(event)) if event.title == EventKind::Accept => accepted += 1,
            Ok(Some(_)) => refused += 1,
            Ok(None) => {}
            Err(e) => warn!("selection rejected: {}", e),
        }
    }

    info!("ranked selection done: {} accepted, {} refused", accepted, refused);
}
