//! Sample applicant generator.
//!
//! Produces the initial population from a seed: dense ids, names drawn from
//! a fixed pool, ages uniform in `[15, 33)` and European countries of origin.

use admission_core::Applicant;
use admission_env::ApplicantId;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::ops::Range;

pub const NAMES: &[&str] = &[
    "James", "John", "Luke", "Jack", "Charles", "Jace", "Chase", "Miles", "Cole", "Max", "Juan",
    "George", "Blake", "Jayce", "Kai", "Bryce", "King", "Jude", "Grant", "Finn", "Beau", "Mark",
    "Kyle", "Dean", "Paul", "Zane", "Jax", "Rhett", "Myles", "Brooks", "Sean", "Jase", "Jake",
    "Knox", "Cash", "Reid", "Chance", "Gage", "Nash", "Lane", "Seth", "Jett", "Troy", "Shane",
    "Quinn", "Ace", "Colt", "Cruz", "Prince", "Reed", "Frank", "Shawn", "Kash", "Clark", "Jay",
    "Drew", "Kane", "Wade", "Cade", "Kade", "Zayn", "Hayes", "Bruce", "Tate", "Zayne", "Brock",
    "Royce", "Scott", "Pierce", "Keith", "Hank", "Rhys",
];

pub const COUNTRIES: &[&str] = &[
    "France", "Germany", "Spain", "Italy", "United Kingdom", "Portugal", "Poland", "Sweden",
    "Norway", "Denmark", "Netherlands", "Switzerland", "Greece", "Russia", "Ukraine", "Slovenia",
    "Slovakia", "Czechia", "Hungary", "Turkey", "Albania", "Kosovo",
];

/// Seeded generator of applicants.
pub struct ApplicantGenerator {
    rng: ChaCha8Rng,
    ages: Range<u32>,
}

impl ApplicantGenerator {
    /// Creates a generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            ages: 15..33,
        }
    }

    /// Generates `count` applicants with ids `0..count`.
    pub fn generate(&mut self, count: usize) -> Vec<Applicant> {
        (0..count).map(|i| self.applicant(ApplicantId(i))).collect()
    }

    fn applicant(&mut self, id: ApplicantId) -> Applicant {
        let name = NAMES.choose(&mut self.rng).copied().unwrap_or("Anonymous");
        let country = COUNTRIES.choose(&mut self.rng).copied().unwrap_or("Unknown");
        let age = self.rng.gen_range(self.ages.clone());
        Applicant::new(id, name, age, country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admission_core::ApplicantState;

    #[test]
    fn test_generated_ids_are_dense() {
        let applicants = ApplicantGenerator::new(7).generate(50);
        for (i, a) in applicants.iter().enumerate() {
            assert_eq!(a.id, ApplicantId(i));
            assert_eq!(a.state, ApplicantState::WaitingForMoreInfo);
            assert!((15..33).contains(&a.age));
            assert!(NAMES.contains(&a.name.as_str()));
            assert!(COUNTRIES.contains(&a.country.as_str()));
        }
    }

    #[test]
    fn test_same_seed_same_population() {
        let a = ApplicantGenerator::new(42).generate(20);
        let b = ApplicantGenerator::new(42).generate(20);
        let c = ApplicantGenerator::new(43).generate(20);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
