//! Admission Environment Abstraction Layer
//!
//! This crate provides the runtime seams the admission pipeline runs on, so
//! the actors can be driven by a production context (OS entropy) or a seeded
//! simulation context without changing their code.
//!
//! # Core Concept
//!
//! Every source of non-determinism an actor touches goes through here:
//! - Time (`sleep()`, the [`LogicalClock`])
//! - Task spawning (`spawn()`)
//! - Randomness (`derive_rng()`)
//! - Messaging (bounded [`queue`]s)
//!
//! # Example
//!
//! ```ignore
//! use admission_env::{AdmissionContext, queue};
//!
//! async fn registrar_loop<Ctx: AdmissionContext>(
//!     ctx: &Ctx,
//!     mut inbox: queue::QueueReceiver<Form>,
//! ) {
//!     while let Some(form) = inbox.recv().await {
//!         ctx.sleep(Duration::from_millis(50)).await;
//!         handle(form);
//!     }
//! }
//! ```

mod clock;
mod context;
mod error;
pub mod queue;
mod tokio_impl;
mod types;

pub use clock::{DeadlineLatch, LogicalClock};
pub use context::AdmissionContext;
pub use error::EnvError;
pub use queue::{QueueReceiver, QueueSender};
pub use tokio_impl::TokioContext;
pub use types::{ApplicantId, Tick};
