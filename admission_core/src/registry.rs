//! Applicant registry: the shared collection, locked per applicant.
//!
//! Registrar, administration and both deadline batches all write applicant
//! state. Each applicant sits behind its own lock, so writes to one id are
//! serialized while different ids proceed independently. Callers put the
//! state check, the transition and the matching event append inside a single
//! [`Registry::update`] closure so that no other writer can interleave.

use crate::applicant::{Applicant, ApplicantState, TransitionError};
use admission_env::ApplicantId;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown applicant {0}")]
    UnknownApplicant(ApplicantId),

    #[error("applicant at index {index} carries id {id}; ids must be dense and zero-based")]
    NonDenseId { index: usize, id: ApplicantId },

    #[error("applicant {id}: {source}")]
    Transition {
        id: ApplicantId,
        #[source]
        source: TransitionError,
    },
}

/// Id-indexed applicant collection.
#[derive(Debug)]
pub struct Registry {
    slots: Vec<Mutex<Applicant>>,
}

impl Registry {
    /// Takes ownership of the initial applicants.
    ///
    /// Fails unless `applicants[i].id == i` for every `i`.
    pub fn new(applicants: Vec<Applicant>) -> Result<Self, RegistryError> {
        for (index, applicant) in applicants.iter().enumerate() {
            if applicant.id.index() != index {
                return Err(RegistryError::NonDenseId {
                    index,
                    id: applicant.id,
                });
            }
        }
        Ok(Self {
            slots: applicants.into_iter().map(Mutex::new).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ApplicantId> {
        (0..self.slots.len()).map(ApplicantId)
    }

    fn lock(&self, id: ApplicantId) -> Result<MutexGuard<'_, Applicant>, RegistryError> {
        let slot = self
            .slots
            .get(id.index())
            .ok_or(RegistryError::UnknownApplicant(id))?;
        // A panicked writer cannot leave a half-applied transition behind:
        // `Applicant::apply` only assigns after validation.
        Ok(slot.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Runs `f` with exclusive access to one applicant.
    pub fn update<R>(
        &self,
        id: ApplicantId,
        f: impl FnOnce(&mut Applicant) -> R,
    ) -> Result<R, RegistryError> {
        let mut guard = self.lock(id)?;
        Ok(f(&mut guard))
    }

    /// Copy of one applicant as it is right now.
    pub fn snapshot(&self, id: ApplicantId) -> Result<Applicant, RegistryError> {
        Ok(self.lock(id)?.clone())
    }

    pub fn state(&self, id: ApplicantId) -> Result<ApplicantState, RegistryError> {
        Ok(self.lock(id)?.state)
    }

    /// Ids currently in `state`, in id order.
    ///
    /// Each applicant is read under its own lock; the result is not an
    /// atomic picture of the whole collection.
    pub fn ids_in_state(&self, state: ApplicantState) -> Vec<ApplicantId> {
        self.ids()
            .filter(|id| matches!(self.state(*id), Ok(s) if s == state))
            .collect()
    }

    /// Copies of every applicant, in id order.
    pub fn applicants(&self) -> Vec<Applicant> {
        self.slots
            .iter()
            .map(|slot| slot.lock().unwrap_or_else(PoisonError::into_inner).clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applicant::Transition;
    use std::sync::Arc;

    fn registry(n: usize) -> Registry {
        let applicants = (0..n)
            .map(|i| Applicant::new(ApplicantId(i), format!("A{i}"), 20, "Spain"))
            .collect();
        Registry::new(applicants).expect("dense ids")
    }

    #[test]
    fn test_rejects_sparse_ids() {
        let applicants = vec![
            Applicant::new(ApplicantId(0), "Kai", 20, "Spain"),
            Applicant::new(ApplicantId(5), "Max", 20, "Spain"),
        ];
        assert_eq!(
            Registry::new(applicants).unwrap_err(),
            RegistryError::NonDenseId { index: 1, id: ApplicantId(5) }
        );
    }

    #[test]
    fn test_update_applies_transition() {
        let reg = registry(3);
        let state = reg
            .update(ApplicantId(1), |a| a.apply(Transition::Rank))
            .expect("known applicant")
            .expect("valid transition");

        assert_eq!(state, ApplicantState::Ranked);
        assert_eq!(reg.ids_in_state(ApplicantState::Ranked), vec![ApplicantId(1)]);
        assert_eq!(reg.ids_in_state(ApplicantState::WaitingForMoreInfo).len(), 2);
    }

    #[test]
    fn test_unknown_applicant() {
        let reg = registry(1);
        assert_eq!(
            reg.snapshot(ApplicantId(9)).unwrap_err(),
            RegistryError::UnknownApplicant(ApplicantId(9))
        );
    }

    #[test]
    fn test_concurrent_writers_one_winner_per_applicant() {
        // Closure and selection race on the same ids: exactly one
        // transition may land per applicant.
        let reg = Arc::new(registry(64));
        let writers: Vec<_> = [Transition::CloseLate, Transition::Rank, Transition::RefuseEligibility]
            .into_iter()
            .map(|t| {
                let reg = Arc::clone(&reg);
                std::thread::spawn(move || {
                    reg.ids()
                        .filter(|id| matches!(reg.update(*id, |a| a.apply(t)), Ok(Ok(_))))
                        .count()
                })
            })
            .collect();

        let landed: usize = writers
            .into_iter()
            .map(|w| w.join().expect("writer joins"))
            .sum();
        assert_eq!(landed, 64);
        assert!(reg.ids_in_state(ApplicantState::WaitingForMoreInfo).is_empty());
    }
}
