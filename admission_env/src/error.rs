//! Error types for the admission environment abstraction.

use thiserror::Error;

/// Errors that can occur in the environment abstraction layer.
///
/// A full queue is never an error: producers wait for room instead.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The consumer side of a queue was dropped (end of run)
    #[error("Queue closed: {0}")]
    QueueClosed(&'static str),
}
