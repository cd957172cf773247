//! # LogWriter: lifecycle events as structured logs
//!
//! A subscriber that renders incoming [`Event`]s through `tracing`.
//!
//! ## Example output
//! ```text
//! INFO  actor="storage-public-link-data" starting
//! INFO  actor="signal" stopped
//! INFO  actor="signal" err=None stopping group
//! WARN  actor="storage-public-link-data-debug" err="shutdown deadline exceeded" budget_ms=5000 interrupt failed
//! INFO  err=None group stopped
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let actor = e.actor.as_deref().unwrap_or("-");
        let reason = e.reason.as_deref();

        match e.kind {
            EventKind::ActorStarting => tracing::info!(actor, "starting"),
            EventKind::ActorStopped => tracing::info!(actor, "stopped"),
            EventKind::ActorFailed => tracing::error!(actor, err = ?reason, "failed"),
            EventKind::GroupStopping => tracing::info!(actor, err = ?reason, "stopping group"),
            EventKind::InterruptRequested => {
                tracing::debug!(actor, budget_ms = ?e.budget_ms, "interrupting")
            }
            EventKind::InterruptCompleted => tracing::debug!(actor, "interrupted"),
            EventKind::InterruptFailed => tracing::warn!(
                actor,
                err = ?reason,
                budget_ms = ?e.budget_ms,
                "interrupt failed"
            ),
            EventKind::GroupStopped => tracing::info!(err = ?reason, "group stopped"),
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
