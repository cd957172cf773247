//! # Actor abstraction.
//!
//! An [`Actor`] is an independently running unit of work with a `run` and an
//! `interrupt` operation. The [`ActorGroup`](crate::ActorGroup) runs every actor
//! concurrently and, as soon as the first `run` returns, delivers exactly one
//! [`Interrupt`] to each actor.
//!
//! ## Contract
//! - `run` must observe its stop condition and return promptly once `interrupt` was called.
//!   An actor that ignores interrupts blocks group shutdown indefinitely.
//! - `interrupt` may arrive after `run` already returned, and must tolerate it.
//! - `interrupt` should honor [`Interrupt::context`]; interrupts are delivered one after another,
//!   so a slow one delays every actor registered after it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::Context;
use crate::error::{ActorError, ShutdownError};

/// Shared handle to an actor.
pub type ActorRef = Arc<dyn Actor>;

/// # Long-lived, interruptible unit of work.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use storagevisor::{Actor, ActorError, Interrupt, ShutdownError};
/// use tokio_util::sync::CancellationToken;
///
/// struct Ticker {
///     stop: CancellationToken,
/// }
///
/// #[async_trait]
/// impl Actor for Ticker {
///     fn name(&self) -> &str { "ticker" }
///
///     async fn run(&self) -> Result<(), ActorError> {
///         self.stop.cancelled().await;
///         Ok(())
///     }
///
///     async fn interrupt(&self, _interrupt: Interrupt) -> Result<(), ShutdownError> {
///         self.stop.cancel();
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Actor: Send + Sync + 'static {
    /// Returns a stable, human-readable actor name.
    fn name(&self) -> &str;

    /// Executes until the actor completes or is asked to stop.
    async fn run(&self) -> Result<(), ActorError>;

    /// Requests early termination of `run`.
    ///
    /// Errors are soft failures: the group logs them and keeps the triggering error.
    async fn interrupt(&self, interrupt: Interrupt) -> Result<(), ShutdownError>;
}

/// What an actor receives when the group shuts down.
#[derive(Clone, Debug)]
pub struct Interrupt {
    cause: Option<ActorError>,
    ctx: Context,
}

impl Interrupt {
    /// Creates an interrupt carrying the triggering error and a shutdown context.
    pub fn new(cause: Option<ActorError>, ctx: Context) -> Self {
        Self { cause, ctx }
    }

    /// The error returned by the first actor to finish (`None` if it finished cleanly).
    pub fn cause(&self) -> Option<&ActorError> {
        self.cause.as_ref()
    }

    /// Context bounded by the actor's shutdown budget (unbounded if none was set).
    pub fn context(&self) -> &Context {
        &self.ctx
    }
}
