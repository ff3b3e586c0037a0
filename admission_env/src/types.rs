//! Common types for the admission environment abstraction.

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Identifier of an applicant.
///
/// Ids are dense and zero-based: an id is the applicant's index in the
/// collection for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantId(pub usize);

impl ApplicantId {
    /// Returns the index into the applicant collection.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for ApplicantId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reading of the logical clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Returns the raw counter value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Add<u64> for Tick {
    type Output = Tick;

    fn add(self, rhs: u64) -> Tick {
        Tick(self.0.saturating_add(rhs))
    }
}

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t={}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applicant_id_is_index() {
        let id = ApplicantId::from(7);
        assert_eq!(id.index(), 7);
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn test_tick_ordering_and_add() {
        assert!(Tick(3) < Tick(4));
        assert_eq!(Tick(3) + 2, Tick(5));
        assert_eq!(Tick(u64::MAX) + 1, Tick(u64::MAX));
    }
}
