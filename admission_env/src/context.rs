//! Core environment context trait for admission actors.

use async_trait::async_trait;
use rand_chacha::ChaCha8Rng;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// The central interface for Environment Interaction.
///
/// This trait abstracts the runtime so that actors can run either with real
/// entropy or with a seeded, reproducible random source.
///
/// # Implementations
///
/// - **Production**: `TokioContext` - wraps `tokio::time`, OS entropy
/// - **Simulation**: `SimContext` - wraps `tokio::time`, `ChaCha8Rng(seed)`
///
/// Both implementations read time from `tokio::time`, so a paused test
/// runtime drives them on auto-advancing virtual time.
#[async_trait]
pub trait AdmissionContext: Send + Sync + 'static {
    /// Returns the wall time elapsed since context creation.
    ///
    /// This is service time, not the logical clock: deadline decisions are
    /// always taken against [`crate::LogicalClock`].
    fn now(&self) -> Duration;

    /// Suspends execution for the given duration.
    ///
    /// Used to simulate per-role processing latency and applicant delays.
    async fn sleep(&self, duration: Duration);

    /// Spawns a named background task.
    ///
    /// The returned handle lets the owner abort the task once the run's
    /// wall-time budget is spent.
    fn spawn<F>(&self, name: &str, future: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static;

    /// Derives an independent random stream for one actor.
    ///
    /// # Arguments
    /// * `stream` - A value identifying the consumer (actor or batch)
    fn derive_rng(&self, stream: u64) -> ChaCha8Rng;

    /// Returns the context's seed (for logging/debugging).
    ///
    /// In production, returns 0 (not seeded).
    fn seed(&self) -> u64;
}
