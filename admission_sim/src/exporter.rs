//! Formatting phase: chronological trace, display dates, JSON and CSV.
//!
//! Runs after the simulation, single-threaded, over its finished output.
//! Nothing here feeds back into the run.

use crate::world::SimOutcome;
use admission_core::{Applicant, Event};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

/// Display format of derived dates.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Default origin of display dates: tick 0 maps here.
pub const DEFAULT_EPOCH: &str = "2022-12-14T05:00:00Z";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid epoch '{value}': {source}")]
    Epoch {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Parses an RFC 3339 epoch such as [`DEFAULT_EPOCH`].
pub fn parse_epoch(value: &str) -> Result<DateTime<Utc>, ExportError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| ExportError::Epoch {
            value: value.to_string(),
            source,
        })
}

/// Events sorted by logical timestamp; ties keep append order.
pub fn chronological(events: &[Event]) -> Vec<&Event> {
    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by_key(|e| e.timestamp);
    sorted
}

/// Display date of a tick: one tick is one second after `epoch`.
pub fn date_for(epoch: DateTime<Utc>, tick: admission_env::Tick) -> String {
    // chrono rejects second counts beyond i64::MAX / 1000
    let seconds = tick.value().min(i64::MAX as u64 / 1_000) as i64;
    let date = epoch
        .checked_add_signed(Duration::seconds(seconds))
        .unwrap_or(epoch);
    date.format(DATE_FORMAT).to_string()
}

/// Chronological copies of `events` with `date` filled in.
pub fn dated(events: &[Event], epoch: DateTime<Utc>) -> Vec<Event> {
    chronological(events)
        .into_iter()
        .map(|event| Event {
            date: Some(date_for(epoch, event.timestamp)),
            ..event.clone()
        })
        .collect()
}

/// Complete export of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceExport {
    /// Unique id of this export
    pub run_id: Uuid,

    /// Scenario name
    pub scenario: String,

    /// Seed used
    pub seed: u64,

    /// Clock reading at the end of the run
    pub final_tick: u64,

    /// Final applicants
    pub applicants: Vec<Applicant>,

    /// Dated events, chronological
    pub events: Vec<Event>,
}

impl TraceExport {
    /// Runs the formatting phase over a finished outcome.
    pub fn new(scenario: &str, seed: u64, outcome: &SimOutcome, epoch: DateTime<Utc>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            scenario: scenario.to_string(),
            seed,
            final_tick: outcome.final_tick.value(),
            applicants: outcome.applicants.clone(),
            events: dated(&outcome.events, epoch),
        }
    }

    /// Writes to a JSON file.
    pub fn write_json(&self, path: &Path) -> Result<(), ExportError> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Writes the events as CSV, one row per event.
    pub fn write_csv(&self, path: &Path) -> Result<(), ExportError> {
        let mut writer = csv::Writer::from_path(path)?;
        for event in &self.events {
            writer.serialize(event)?;
        }
        writer.flush()?;
        Ok(())
    }
}
