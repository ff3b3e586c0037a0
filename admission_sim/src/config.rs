//! Run configuration.

use admission_core::{AdmissionPolicy, PolicyError};
use admission_env::Tick;
use std::time::Duration;
use thiserror::Error;

/// Service time each role spends on one task.
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyConfig {
    /// Registrar handling a registration form
    pub registrar: Duration,
    /// Teacher reviewing supplementary information
    pub teacher: Duration,
    /// Administration evaluating a registration or closing out an applicant
    pub administration: Duration,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            registrar: Duration::from_micros(50_000),
            teacher: Duration::from_micros(20_000),
            administration: Duration::from_micros(10_000),
        }
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Master seed for the random streams
    pub seed: u64,

    /// Number of applicants to generate
    pub applicant_count: usize,

    /// Logical tick after which registrations are dropped and the deadline
    /// batches run
    pub deadline: Tick,

    /// Wall time between two clock ticks
    pub tick_interval: Duration,

    /// Per-role processing latency
    pub latency: LatencyConfig,

    /// Applicants wait a uniform delay in `[0, submission_delay)` before
    /// each submission
    pub submission_delay: Duration,

    /// Capacity of every queue
    pub queue_capacity: usize,

    /// Wall time after which the run is stopped and in-flight work abandoned
    pub budget: Duration,

    /// Eligibility rules and decision rates
    pub policy: AdmissionPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            applicant_count: 100,
            deadline: Tick(300),
            tick_interval: Duration::from_millis(1),
            latency: LatencyConfig::default(),
            submission_delay: Duration::from_millis(50),
            queue_capacity: 10_000,
            budget: Duration::from_secs(10),
            policy: AdmissionPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("applicant count must be at least 1")]
    NoApplicants,

    #[error("deadline must be after tick 0")]
    ZeroDeadline,

    #[error("tick interval must be non-zero")]
    ZeroTickInterval,

    #[error("queue capacity must be at least 1")]
    ZeroQueueCapacity,

    #[error("wall-time budget must be non-zero")]
    ZeroBudget,

    #[error("invalid admission policy: {0}")]
    Policy(#[from] PolicyError),
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.applicant_count == 0 {
            return Err(ConfigError::NoApplicants);
        }
        if self.deadline == Tick::ZERO {
            return Err(ConfigError::ZeroDeadline);
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }
        if self.budget.is_zero() {
            return Err(ConfigError::ZeroBudget);
        }
        self.policy.validate()?;
        Ok(())
    }
}
