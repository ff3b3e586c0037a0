//! Admission Core - applicant state machine, policy and event trace
//!
//! The pure building blocks every actor of the admission pipeline shares:
//! 1. **State machine**: which transitions an applicant may take
//! 2. **Policy**: eligibility rules and the rates of every random decision
//! 3. **Registry**: the applicant collection, serialized per applicant
//! 4. **Event log**: the append-only trace of completed actions

pub mod applicant;
pub mod event;
pub mod event_log;
pub mod policy;
pub mod registry;

// Re-export key types for convenience
pub use applicant::{Applicant, ApplicantState, Transition, TransitionError};
pub use event::{Event, EventKind, Role};
pub use event_log::EventLog;
pub use policy::{AdmissionPolicy, DecisionRates, Ineligibility, PolicyError, Verdict};
pub use registry::{Registry, RegistryError};
