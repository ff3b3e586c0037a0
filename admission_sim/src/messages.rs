//! Messages carried by the pipeline's queues.
//!
//! ```text
//! applicants ──RegistrationForm──► registrar ──AdministrationTask──► administration
//! applicants ──SupplementaryInfo─►     │                                  │
//!     ▲                                                                   │
//!     └─────────── post office ◄──────────────StudentMail─────────────────┘
//! ```

use admission_core::{Applicant, Event, EventKind};
use admission_env::ApplicantId;

/// An applicant registering (or registering again).
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    /// Snapshot taken at submission time
    pub applicant: Applicant,
}

/// Transcript and motivation letter, sent after an `AskMoreInfo` mail.
#[derive(Debug, Clone)]
pub struct SupplementaryInfo {
    /// Snapshot taken at submission time, current state included
    pub applicant: Applicant,
}

/// Work the registrar hands to the administration office.
#[derive(Debug, Clone)]
pub enum AdministrationTask {
    /// A received registration to evaluate.
    Evaluate(Event),
    /// A teacher decision, already recorded, filed for the record.
    File(Event),
}

impl AdministrationTask {
    pub fn event(&self) -> &Event {
        match self {
            AdministrationTask::Evaluate(event) | AdministrationTask::File(event) => event,
        }
    }
}

/// What an applicant is told after evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    EligibilityRefused,
    RegisterAgain,
    MoreInfoRequested,
}

impl Outcome {
    /// The outcome announced by an administration event, if it is mailed.
    pub fn for_event(kind: EventKind) -> Option<Outcome> {
        match kind {
            EventKind::RefuseEligibility => Some(Outcome::EligibilityRefused),
            EventKind::AskRegisterAgain => Some(Outcome::RegisterAgain),
            EventKind::AskMoreInfo => Some(Outcome::MoreInfoRequested),
            EventKind::Received
            | EventKind::RefuseMotivationLetter
            | EventKind::Rank
            | EventKind::TooLate
            | EventKind::RefuseGrades
            | EventKind::Accept => None,
        }
    }
}

/// A letter to one applicant.
#[derive(Debug, Clone)]
pub struct StudentMail {
    pub outcome: Outcome,
    /// The recorded event the letter announces
    pub event: Event,
}

impl StudentMail {
    /// Builds the mail announcing `event`, if its kind is mailed at all.
    pub fn announcing(event: Event) -> Option<Self> {
        Outcome::for_event(event.title).map(|outcome| Self { outcome, event })
    }

    pub fn recipient(&self) -> ApplicantId {
        self.event.applicant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admission_env::Tick;

    #[test]
    fn test_only_administration_outcomes_are_mailed() {
        let a = Applicant::new(ApplicantId(3), "Troy", 20, "Albania");

        let mail = StudentMail::announcing(Event::standard(EventKind::AskMoreInfo, &a, Tick(9)))
            .expect("ask more info is mailed");
        assert_eq!(mail.outcome, Outcome::MoreInfoRequested);
        assert_eq!(mail.recipient(), ApplicantId(3));

        assert!(StudentMail::announcing(Event::standard(EventKind::Rank, &a, Tick(9))).is_none());
        assert!(StudentMail::announcing(Event::received(&a, Tick(9))).is_none());
    }
}
