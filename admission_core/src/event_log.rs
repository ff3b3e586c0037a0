//! Append-only event log shared by every writer of a run.

use crate::event::Event;
use admission_env::ApplicantId;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Ordered trace of completed actions.
///
/// Append order is completion order. Each append takes the lock once, so a
/// record is either fully in the log or absent, even if its writer is aborted
/// right after. Clones share the same log.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<Event>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<Event>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends one record.
    pub fn append(&self, event: Event) {
        debug!(
            "Event logged => {} [{}] at {}",
            event.title, event.applicant, event.timestamp
        );
        self.guard().push(event);
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    /// Copy of the log in append order.
    pub fn snapshot(&self) -> Vec<Event> {
        self.guard().clone()
    }

    /// Events concerning one applicant, in append order.
    pub fn for_applicant(&self, id: ApplicantId) -> Vec<Event> {
        self.guard()
            .iter()
            .filter(|e| e.applicant == id)
            .cloned()
            .collect()
    }
}
