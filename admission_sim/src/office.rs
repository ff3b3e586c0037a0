//! Handles shared by every actor of one run.

use crate::config::LatencyConfig;
use admission_core::{AdmissionPolicy, Applicant, Event, EventLog, Registry, RegistryError};
use admission_env::{AdmissionContext, ApplicantId, DeadlineLatch, LogicalClock, Tick};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;
use tracing::warn;

/// Everything an actor needs besides its own queues.
pub struct Office<Ctx: AdmissionContext> {
    pub context: Arc<Ctx>,
    pub clock: LogicalClock,
    pub deadline: Arc<DeadlineLatch>,
    pub registry: Arc<Registry>,
    pub log: EventLog,
    pub policy: Arc<AdmissionPolicy>,
    pub latency: LatencyConfig,
    pub tasks: TaskSet,
}

impl<Ctx: AdmissionContext> Clone for Office<Ctx> {
    fn clone(&self) -> Self {
        Self {
            context: Arc::clone(&self.context),
            clock: self.clock.clone(),
            deadline: Arc::clone(&self.deadline),
            registry: Arc::clone(&self.registry),
            log: self.log.clone(),
            policy: Arc::clone(&self.policy),
            latency: self.latency.clone(),
            tasks: self.tasks.clone(),
        }
    }
}

impl<Ctx: AdmissionContext> Office<Ctx> {
    /// Decides and records one action for `id`, atomically.
    ///
    /// `decide` runs under the applicant's lock with the current tick. If it
    /// returns an event, the event is appended before the lock is released,
    /// so events of one applicant enter the log in timestamp order.
    pub fn record(
        &self,
        id: ApplicantId,
        decide: impl FnOnce(&mut Applicant, Tick) -> Option<Event>,
    ) -> Result<Option<Event>, RegistryError> {
        self.registry.update(id, |applicant| {
            let now = self.clock.now();
            let event = decide(applicant, now)?;
            self.log.append(event.clone());
            Some(event)
        })
    }

    /// Spawns a task owned by the run.
    pub fn spawn<F>(&self, name: &str, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        self.tasks.track(self.context.spawn(name, future));
    }
}

/// Handles of every task spawned for a run, so they can be abandoned
/// together once the wall-time budget is spent.
#[derive(Clone, Default)]
pub struct TaskSet {
    handles: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&self, handle: JoinHandle<()>) {
        self.handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handle);
    }

    /// Aborts every tracked task and waits until each one has stopped.
    ///
    /// A task being polled on another worker finishes that poll before it
    /// observes the abort, so nothing it commits can land after this returns.
    /// Tasks spawned while draining are aborted in a further round. Returns
    /// the number of tasks that were cancelled rather than finished.
    pub async fn shutdown(&self) -> usize {
        let mut cancelled = 0;
        loop {
            let handles = std::mem::take(&mut *self.handles.lock().unwrap_or_else(PoisonError::into_inner));
            if handles.is_empty() {
                return cancelled;
            }
            for handle in &handles {
                handle.abort();
            }
            for handle in handles {
                match handle.await {
                    Ok(()) => {}
                    Err(e) if e.is_cancelled() => cancelled += 1,
                    Err(e) => warn!("task failed: {}", e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_counts_cancelled_tasks() {
        let tasks = TaskSet::new();
        tasks.track(tokio::spawn(async {}));
        tasks.track(tokio::spawn(async {
            loop {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        }));
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(tasks.shutdown().await, 1);
        assert_eq!(tasks.shutdown().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_nested_tasks() {
        let tasks = TaskSet::new();
        let nested_ran = Arc::new(AtomicBool::new(false));

        let inner_tasks = tasks.clone();
        let flag = Arc::clone(&nested_ran);
        tasks.track(tokio::spawn(async move {
            inner_tasks.track(tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(60)).await;
                flag.store(true, Ordering::SeqCst);
            }));
        }));
        tokio::time::sleep(Duration::from_millis(10)).await;

        tasks.shutdown().await;
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert!(!nested_ran.load(Ordering::SeqCst));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_no_write_after_shutdown() {
        let tasks = TaskSet::new();
        let writes = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        for _ in 0..4 {
            let writes = Arc::clone(&writes);
            tasks.track(tokio::spawn(async move {
                loop {
                    writes.fetch_add(1, Ordering::SeqCst);
                    tokio::task::yield_now().await;
                }
            }));
        }
        tokio::time::sleep(Duration::from_millis(5)).await;

        assert_eq!(tasks.shutdown().await, 4);
        let settled = writes.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(writes.load(Ordering::SeqCst), settled);
    }
}
