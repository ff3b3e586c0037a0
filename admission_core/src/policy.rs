//! Admission policy: eligibility rules and decision rates.
//!
//! Every probabilistic branch of the pipeline reads its rate from
//! [`DecisionRates`]; every deterministic rule lives in
//! [`AdmissionPolicy::assess`]. Actors receive the policy at construction.

use crate::applicant::Applicant;
use crate::event::letters;
use rand::Rng;
use thiserror::Error;

/// Probabilities of the pipeline's random branches, each in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionRates {
    /// Administration asks an eligible applicant to register again.
    pub resubmission: f64,
    /// The teacher refuses supplementary information.
    pub motivation_refusal: f64,
    /// Final selection refuses a ranked applicant.
    pub grade_refusal: f64,
}

impl Default for DecisionRates {
    fn default() -> Self {
        Self {
            resubmission: 0.25,
            motivation_refusal: 0.25,
            grade_refusal: 1.0 / 3.0,
        }
    }
}

impl DecisionRates {
    /// Rates that never refuse and never ask for resubmission.
    pub fn lenient() -> Self {
        Self {
            resubmission: 0.0,
            motivation_refusal: 0.0,
            grade_refusal: 0.0,
        }
    }
}

/// Why an applicant failed the eligibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ineligibility {
    Underage { age: u32, minimum: u32 },
    DisallowedCountry { country: String },
}

impl Ineligibility {
    /// Letter explaining the refusal.
    pub fn letter(&self) -> String {
        match self {
            Ineligibility::Underage { minimum, .. } => letters::underage(*minimum),
            Ineligibility::DisallowedCountry { country } => letters::disallowed_country(country),
        }
    }
}

/// Outcome of an eligibility evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Ineligible(Ineligibility),
    /// Registration incomplete; the applicant must register again.
    RegisterAgain,
    /// Registration accepted; supplementary information is required.
    MoreInfo,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyError {
    #[error("rate `{name}` must be within [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },
}

/// Rules the administration and the registrar apply.
#[derive(Debug, Clone, PartialEq)]
pub struct AdmissionPolicy {
    /// Applicants strictly younger are ineligible.
    pub minimum_age: u32,
    /// Applicants from this country are ineligible.
    pub disallowed_country: String,
    pub rates: DecisionRates,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self {
            minimum_age: 18,
            disallowed_country: "France".to_string(),
            rates: DecisionRates::default(),
        }
    }
}

impl AdmissionPolicy {
    pub fn validate(&self) -> Result<(), PolicyError> {
        let rates = [
            ("resubmission", self.rates.resubmission),
            ("motivation_refusal", self.rates.motivation_refusal),
            ("grade_refusal", self.rates.grade_refusal),
        ];
        for (name, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(PolicyError::RateOutOfRange { name, value });
            }
        }
        Ok(())
    }

    /// Deterministic part of the eligibility check, in strict order:
    /// age first, then origin.
    pub fn eligibility(&self, applicant: &Applicant) -> Result<(), Ineligibility> {
        if applicant.age < self.minimum_age {
            return Err(Ineligibility::Underage {
                age: applicant.age,
                minimum: self.minimum_age,
            });
        }
        if applicant.country == self.disallowed_country {
            return Err(Ineligibility::DisallowedCountry {
                country: applicant.country.clone(),
            });
        }
        Ok(())
    }

    /// Full evaluation of a received registration.
    pub fn assess<R: Rng>(&self, applicant: &Applicant, rng: &mut R) -> Verdict {
        match self.eligibility(applicant) {
            Err(reason) => Verdict::Ineligible(reason),
            Ok(()) if roll(rng, self.rates.resubmission) => Verdict::RegisterAgain,
            Ok(()) => Verdict::MoreInfo,
        }
    }

    /// Teacher's review of supplementary information: true means refuse.
    pub fn refuses_motivation<R: Rng>(&self, rng: &mut R) -> bool {
        roll(rng, self.rates.motivation_refusal)
    }

    /// Final selection of a ranked applicant: true means refuse.
    pub fn refuses_grades<R: Rng>(&self, rng: &mut R) -> bool {
        roll(rng, self.rates.grade_refusal)
    }
}

/// Bernoulli draw; rates of 0 and 1 never consume randomness.
fn roll<R: Rng>(rng: &mut R, rate: f64) -> bool {
    if rate <= 0.0 {
        false
    } else if rate >= 1.0 {
        true
    } else {
        rng.gen_bool(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admission_env::ApplicantId;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn applicant(age: u32, country: &str) -> Applicant {
        Applicant::new(ApplicantId(0), "Reid", age, country)
    }

    #[test]
    fn test_age_checked_before_country() {
        let policy = AdmissionPolicy::default();
        let verdict = policy.eligibility(&applicant(16, "France"));
        assert_eq!(
            verdict,
            Err(Ineligibility::Underage { age: 16, minimum: 18 })
        );
    }

    #[test]
    fn test_lenient_rates_always_ask_more_info() {
        let policy = AdmissionPolicy {
            rates: DecisionRates::lenient(),
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(policy.assess(&applicant(25, "Other"), &mut rng), Verdict::MoreInfo);
            assert!(!policy.refuses_motivation(&mut rng));
            assert!(!policy.refuses_grades(&mut rng));
        }
    }

    #[test]
    fn test_certain_resubmission() {
        let policy = AdmissionPolicy {
            rates: DecisionRates {
                resubmission: 1.0,
                ..DecisionRates::lenient()
            },
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(policy.assess(&applicant(25, "Spain"), &mut rng), Verdict::RegisterAgain);
    }

    #[test]
    fn test_default_resubmission_rate_is_about_a_quarter() {
        let policy = AdmissionPolicy::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let again = (0..4000)
            .filter(|_| policy.assess(&applicant(25, "Spain"), &mut rng) == Verdict::RegisterAgain)
            .count();
        assert!((800..1200).contains(&again), "got {again}");
    }

    #[test]
    fn test_validate_rejects_rates_out_of_range() {
        let mut policy = AdmissionPolicy::default();
        policy.rates.grade_refusal = 1.5;
        assert_eq!(
            policy.validate(),
            Err(PolicyError::RateOutOfRange { name: "grade_refusal", value: 1.5 })
        );
        assert!(AdmissionPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_refusal_letters() {
        assert_eq!(
            Ineligibility::Underage { age: 15, minimum: 18 }.letter(),
            "The university does not accept student under 18 years old."
        );
        assert!(Ineligibility::Underage { age: 20, minimum: 21 }
            .letter()
            .contains("under 21 years"));
        assert!(Ineligibility::DisallowedCountry { country: "France".into() }
            .letter()
            .contains("from France"));
    }

    proptest! {
        #[test]
        fn prop_underage_is_always_refused(age in 0u32..18, country in "[A-Za-z ]{1,12}", seed in any::<u64>()) {
            let policy = AdmissionPolicy::default();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let verdict = policy.assess(&applicant(age, &country), &mut rng);
            prop_assert!(matches!(verdict, Verdict::Ineligible(Ineligibility::Underage { .. })), "{:?}", verdict);
        }

        #[test]
        fn prop_disallowed_country_is_always_refused(age in 18u32..120, seed in any::<u64>()) {
            let policy = AdmissionPolicy::default();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let verdict = policy.assess(&applicant(age, "France"), &mut rng);
            prop_assert!(matches!(verdict, Verdict::Ineligible(Ineligibility::DisallowedCountry { .. })), "{:?}", verdict);
        }

        #[test]
        fn prop_eligible_applicants_never_refused(age in 18u32..120, seed in any::<u64>()) {
            let policy = AdmissionPolicy::default();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let verdict = policy.assess(&applicant(age, "Norway"), &mut rng);
            prop_assert!(matches!(verdict, Verdict::RegisterAgain | Verdict::MoreInfo), "{:?}", verdict);
        }
    }
}
