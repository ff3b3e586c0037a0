//! Applicant entity and its state machine.
//!
//! ```text
//!                      Rank                 Accept
//!  WaitingForMoreInfo ──────────► Ranked ──────────► Accepted
//!         │                         │
//!         │ RefuseEligibility       │ RefuseGrades
//!         │ RefuseMotivationLetter  ▼
//!         │ CloseLate            Refused
//!         └─────────────────────────▲
//! ```
//!
//! `Refused` and `Accepted` are terminal. The machine is pure: callers are
//! responsible for serializing access per applicant (see [`crate::Registry`]).

use admission_env::ApplicantId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where an applicant stands in the admission process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ApplicantState {
    /// Registered, waiting for the next step. Initial state.
    #[default]
    WaitingForMoreInfo,
    /// Out of the process, whatever the reason.
    Refused,
    /// Supplementary information accepted; eligible for final selection.
    Ranked,
    /// Selected after the deadline.
    Accepted,
}

impl ApplicantState {
    /// Returns true for states no transition may leave.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicantState::Refused | ApplicantState::Accepted)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ApplicantState::WaitingForMoreInfo => "WaitingForMoreInfo",
            ApplicantState::Refused => "Refused",
            ApplicantState::Ranked => "Ranked",
            ApplicantState::Accepted => "Accepted",
        }
    }

    /// All states, in declaration order.
    pub fn all() -> [ApplicantState; 4] {
        [
            ApplicantState::WaitingForMoreInfo,
            ApplicantState::Refused,
            ApplicantState::Ranked,
            ApplicantState::Accepted,
        ]
    }
}

impl std::fmt::Display for ApplicantState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A state change requested by one of the actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Administration found the applicant ineligible (age or origin).
    RefuseEligibility,
    /// The supplementary information was judged insufficient.
    RefuseMotivationLetter,
    /// The supplementary information was accepted.
    Rank,
    /// The deadline passed before the applicant was ranked.
    CloseLate,
    /// Not kept during final selection.
    RefuseGrades,
    /// Kept during final selection.
    Accept,
}

impl Transition {
    /// The only state this transition may leave from.
    pub fn source(&self) -> ApplicantState {
        match self {
            Transition::RefuseEligibility
            | Transition::RefuseMotivationLetter
            | Transition::Rank
            | Transition::CloseLate => ApplicantState::WaitingForMoreInfo,
            Transition::RefuseGrades | Transition::Accept => ApplicantState::Ranked,
        }
    }

    /// The state this transition leads to.
    pub fn target(&self) -> ApplicantState {
        match self {
            Transition::Rank => ApplicantState::Ranked,
            Transition::Accept => ApplicantState::Accepted,
            Transition::RefuseEligibility
            | Transition::RefuseMotivationLetter
            | Transition::CloseLate
            | Transition::RefuseGrades => ApplicantState::Refused,
        }
    }
}

/// Why a transition was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("applicant is already {state} (terminal); {transition:?} not applied")]
    Terminal {
        state: ApplicantState,
        transition: Transition,
    },

    #[error("{transition:?} requires {expected}, applicant is {actual}")]
    WrongState {
        transition: Transition,
        expected: ApplicantState,
        actual: ApplicantState,
    },
}

impl ApplicantState {
    /// Computes the state after `transition`, without mutating anything.
    pub fn next(self, transition: Transition) -> Result<ApplicantState, TransitionError> {
        if self.is_terminal() {
            return Err(TransitionError::Terminal {
                state: self,
                transition,
            });
        }
        let expected = transition.source();
        if self != expected {
            return Err(TransitionError::WrongState {
                transition,
                expected,
                actual: self,
            });
        }
        Ok(transition.target())
    }
}

/// An applicant to the university.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: ApplicantId,
    pub name: String,
    pub age: u32,
    pub country: String,
    pub state: ApplicantState,
}

impl Applicant {
    /// Creates an applicant in the initial state.
    pub fn new(id: ApplicantId, name: impl Into<String>, age: u32, country: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            country: country.into(),
            state: ApplicantState::WaitingForMoreInfo,
        }
    }

    /// Applies a transition in place and returns the new state.
    pub fn apply(&mut self, transition: Transition) -> Result<ApplicantState, TransitionError> {
        let next = self.state.next(transition)?;
        self.state = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applicant() -> Applicant {
        Applicant::new(ApplicantId(0), "Jace", 21, "Spain")
    }

    #[test]
    fn test_new_applicant_waits_for_more_info() {
        let a = applicant();
        assert_eq!(a.state, ApplicantState::WaitingForMoreInfo);
        assert!(!a.state.is_terminal());
    }

    #[test]
    fn test_rank_then_accept() {
        let mut a = applicant();
        assert_eq!(a.apply(Transition::Rank), Ok(ApplicantState::Ranked));
        assert_eq!(a.apply(Transition::Accept), Ok(ApplicantState::Accepted));
        assert!(a.state.is_terminal());
    }

    #[test]
    fn test_rank_then_refuse_grades() {
        let mut a = applicant();
        a.apply(Transition::Rank).expect("rank from waiting");
        assert_eq!(a.apply(Transition::RefuseGrades), Ok(ApplicantState::Refused));
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        let transitions = [
            Transition::RefuseEligibility,
            Transition::RefuseMotivationLetter,
            Transition::Rank,
            Transition::CloseLate,
            Transition::RefuseGrades,
            Transition::Accept,
        ];
        for terminal in [ApplicantState::Refused, ApplicantState::Accepted] {
            for t in transitions {
                assert!(matches!(
                    terminal.next(t),
                    Err(TransitionError::Terminal { .. })
                ));
            }
        }
    }

    #[test]
    fn test_ranked_only_leaves_through_selection() {
        let ranked = ApplicantState::Ranked;
        assert!(matches!(
            ranked.next(Transition::CloseLate),
            Err(TransitionError::WrongState { .. })
        ));
        assert!(matches!(
            ranked.next(Transition::Rank),
            Err(TransitionError::WrongState { .. })
        ));
        assert_eq!(ranked.next(Transition::Accept), Ok(ApplicantState::Accepted));
    }

    #[test]
    fn test_selection_needs_ranked() {
        let waiting = ApplicantState::WaitingForMoreInfo;
        let err = waiting.next(Transition::Accept).unwrap_err();
        assert_eq!(
            err,
            TransitionError::WrongState {
                transition: Transition::Accept,
                expected: ApplicantState::Ranked,
                actual: ApplicantState::WaitingForMoreInfo,
            }
        );
    }

    #[test]
    fn test_failed_apply_leaves_state_untouched() {
        let mut a = applicant();
        a.apply(Transition::CloseLate).expect("close out waiting applicant");
        assert!(a.apply(Transition::Rank).is_err());
        assert_eq!(a.state, ApplicantState::Refused);
    }
}
