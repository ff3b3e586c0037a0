//! Named configuration presets.

use crate::config::SimConfig;
use admission_core::DecisionRates;
use admission_env::Tick;

/// Scenario identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioId {
    /// The reference run: 100 applicants, deadline at tick 300
    Baseline,

    /// Deadline at tick 100: most applicants are closed out
    LateRush,

    /// Every queue holds a single message
    Bottleneck,

    /// Nobody is refused on merit or asked to resubmit
    OpenDoors,
}

impl ScenarioId {
    /// Returns a list of all scenarios.
    pub fn all() -> Vec<ScenarioId> {
        vec![
            ScenarioId::Baseline,
            ScenarioId::LateRush,
            ScenarioId::Bottleneck,
            ScenarioId::OpenDoors,
        ]
    }

    /// Returns the scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::Baseline => "baseline",
            ScenarioId::LateRush => "late_rush",
            ScenarioId::Bottleneck => "bottleneck",
            ScenarioId::OpenDoors => "open_doors",
        }
    }

    /// Returns a description of the scenario.
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::Baseline => "Default rates and latencies, deadline at tick 300",
            ScenarioId::LateRush => "Deadline at tick 100, registrar overwhelmed",
            ScenarioId::Bottleneck => "Queue capacity 1, producers wait for consumers",
            ScenarioId::OpenDoors => "All refusal and resubmission rates at zero",
        }
    }

    /// Applies the preset on top of `config`.
    pub fn configure(&self, config: SimConfig) -> SimConfig {
        match self {
            ScenarioId::Baseline => config,
            ScenarioId::LateRush => SimConfig {
                deadline: Tick(100),
                ..config
            },
            ScenarioId::Bottleneck => SimConfig {
                queue_capacity: 1,
                ..config
            },
            ScenarioId::OpenDoors => {
                let mut config = config;
                config.policy.rates = DecisionRates::lenient();
                config
            }
        }
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "baseline" | "default" => Ok(ScenarioId::Baseline),
            "late_rush" | "laterush" => Ok(ScenarioId::LateRush),
            "bottleneck" => Ok(ScenarioId::Bottleneck),
            "open_doors" | "opendoors" => Ok(ScenarioId::OpenDoors),
            _ => Err(format!("Unknown scenario: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for scenario in ScenarioId::all() {
            assert_eq!(scenario.name().parse::<ScenarioId>(), Ok(scenario));
        }
        assert!("chaos".parse::<ScenarioId>().is_err());
    }

    #[test]
    fn test_presets_adjust_defaults() {
        let base = SimConfig::default();
        assert_eq!(ScenarioId::Baseline.configure(base.clone()), base);
        assert_eq!(ScenarioId::LateRush.configure(base.clone()).deadline, Tick(100));
        assert_eq!(ScenarioId::Bottleneck.configure(base.clone()).queue_capacity, 1);
        assert_eq!(
            ScenarioId::OpenDoors.configure(base).policy.rates,
            DecisionRates::lenient()
        );
    }
}
