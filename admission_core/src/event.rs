//! Event vocabulary, roles and the trace record.

use crate::applicant::Applicant;
use admission_env::{ApplicantId, Tick};
use serde::{Deserialize, Serialize};

/// Which party performed an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Receives registrations (also covers the director's duties).
    Registrar,
    /// Reviews supplementary information on the registrar's behalf.
    Teacher,
    /// Eligibility checks, deadline closure and final selection.
    Administration,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::Registrar => "Registrar",
            Role::Teacher => "Teacher",
            Role::Administration => "Administration",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The closed vocabulary of completed actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "Receive")]
    Received,
    #[serde(rename = "Refuse (eligibility)")]
    RefuseEligibility,
    #[serde(rename = "Ask register again")]
    AskRegisterAgain,
    #[serde(rename = "Ask more info")]
    AskMoreInfo,
    #[serde(rename = "Refuse (motivation letter)")]
    RefuseMotivationLetter,
    #[serde(rename = "Rank")]
    Rank,
    #[serde(rename = "Too late")]
    TooLate,
    #[serde(rename = "Refuse (grades)")]
    RefuseGrades,
    #[serde(rename = "Accept")]
    Accept,
}

impl EventKind {
    /// Display title, as written to exported logs.
    pub fn title(&self) -> &'static str {
        match self {
            EventKind::Received => "Receive",
            EventKind::RefuseEligibility => "Refuse (eligibility)",
            EventKind::AskRegisterAgain => "Ask register again",
            EventKind::AskMoreInfo => "Ask more info",
            EventKind::RefuseMotivationLetter => "Refuse (motivation letter)",
            EventKind::Rank => "Rank",
            EventKind::TooLate => "Too late",
            EventKind::RefuseGrades => "Refuse (grades)",
            EventKind::Accept => "Accept",
        }
    }

    /// The role that performs this action.
    pub fn role(&self) -> Role {
        match self {
            EventKind::Received => Role::Registrar,
            EventKind::RefuseMotivationLetter | EventKind::Rank => Role::Teacher,
            EventKind::RefuseEligibility
            | EventKind::AskRegisterAgain
            | EventKind::AskMoreInfo
            | EventKind::TooLate
            | EventKind::RefuseGrades
            | EventKind::Accept => Role::Administration,
        }
    }

    /// Whether this action settles the applicant's outcome.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            EventKind::RefuseEligibility
                | EventKind::RefuseMotivationLetter
                | EventKind::TooLate
                | EventKind::RefuseGrades
                | EventKind::Accept
        )
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// One completed action. Immutable once appended.
///
/// `date` stays `None` during the run; it is derived from `timestamp` by the
/// formatting phase afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: EventKind,
    pub description: String,
    #[serde(rename = "idRelatedTo")]
    pub applicant: ApplicantId,
    /// Copy of the applicant's name for readability; not an identity.
    #[serde(rename = "nameUser")]
    pub applicant_name: String,
    #[serde(rename = "roleResponsible")]
    pub role: Role,
    pub timestamp: Tick,
    #[serde(default)]
    pub date: Option<String>,
}

impl Event {
    /// Records `kind` for `applicant` at `timestamp`, with its role.
    pub fn new(kind: EventKind, description: impl Into<String>, applicant: &Applicant, timestamp: Tick) -> Self {
        Self {
            title: kind,
            description: description.into(),
            applicant: applicant.id,
            applicant_name: applicant.name.clone(),
            role: kind.role(),
            timestamp,
            date: None,
        }
    }

    /// `Received`, describing who registered.
    pub fn received(applicant: &Applicant, timestamp: Tick) -> Self {
        let description = format!(
            "Receive register request from {}, {} years old, from {}, the request will be analyzed soon enough.",
            applicant.name, applicant.age, applicant.country
        );
        Self::new(EventKind::Received, description, applicant, timestamp)
    }

    /// An event whose description is the standard letter for its kind.
    pub fn standard(kind: EventKind, applicant: &Applicant, timestamp: Tick) -> Self {
        Self::new(kind, letters::standard(kind), applicant, timestamp)
    }
}

/// Letter texts sent along with each action.
pub mod letters {
    use super::EventKind;

    pub fn underage(minimum: u32) -> String {
        format!("The university does not accept student under {} years old.", minimum)
    }

    pub fn disallowed_country(country: &str) -> String {
        format!(
            "The university does not accept student from {} due to previous bad experience with them.",
            country
        )
    }

    /// Letter for kinds whose text does not depend on the applicant.
    pub fn standard(kind: EventKind) -> &'static str {
        match kind {
            EventKind::Received => "The request will be analyzed soon enough.",
            EventKind::RefuseEligibility => "The university cannot accept this application.",
            EventKind::AskRegisterAgain => {
                "The register you provided is not filled correctly, please register again with correct information."
            }
            EventKind::AskMoreInfo => {
                "Your register has been accepted by Administration team. Now you need to provide us more information (transcript of records and motivation letter). Please send us the document before the deadline."
            }
            EventKind::RefuseMotivationLetter => {
                "We are deeply sorry to announce you that our university judged your grades too low regarding the information you provided. We are glad you took the application in consideration and wish you luck for your future studies."
            }
            EventKind::Rank => {
                "We are happy to announce you that you have been selected for ranking. Because we receive a lot of requests from students, we have to rank all students regarding their grades. You will receive a mail telling you if you have been accepted by the ranking."
            }
            EventKind::TooLate => {
                "We are sorry to announce you that it is now too late for applying to the university. Thank you for your interest on working with us."
            }
            EventKind::RefuseGrades => {
                "We are deeply sorry to announce you that we can not keep you in our University because of too much application. We are very glad of your interest in our university and wish you best luck for your future studies."
            }
            EventKind::Accept => {
                "We are happy to announce you that you have been accepted by the ranking. Welcome to our University."
            }
        }
    }
}
