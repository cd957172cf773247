//! # Lifecycle events emitted by the actor group.
//!
//! The [`EventKind`] enum classifies event types across two categories:
//! - **Actor events**: per-actor execution and interrupt flow
//! - **Group events**: the shutdown broadcast and its completion
//!
//! The [`Event`] struct carries additional metadata such as timestamps, actor name,
//! reasons, and shutdown budgets.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use storagevisor::{ActorState, Event, EventKind};
//!
//! let ev = Event::new(EventKind::InterruptFailed)
//!     .with_actor("debug")
//!     .with_reason("shutdown deadline exceeded")
//!     .with_budget(Duration::from_secs(5));
//!
//! assert_eq!(ev.kind, EventKind::InterruptFailed);
//! assert_eq!(ev.actor.as_deref(), Some("debug"));
//! assert_eq!(ev.budget_ms, Some(5_000));
//! assert_eq!(ev.actor_state(), Some(ActorState::Interrupted));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Actor execution ===
    /// Actor `run` is about to start.
    ///
    /// Sets: `actor`
    ActorStarting,

    /// Actor `run` returned `Ok(())`.
    ///
    /// Sets: `actor`
    ActorStopped,

    /// Actor `run` returned an error (or panicked).
    ///
    /// Sets: `actor`, `reason`
    ActorFailed,

    // === Shutdown broadcast ===
    /// First actor returned; interrupts are about to be broadcast.
    ///
    /// Sets: `actor` (the triggering actor), `reason` (triggering error, if any)
    GroupStopping,

    /// Interrupt is being delivered to an actor.
    ///
    /// Sets: `actor`, `budget_ms` (if bounded)
    InterruptRequested,

    /// Actor interrupt returned successfully.
    ///
    /// Sets: `actor`
    InterruptCompleted,

    /// Actor interrupt failed or overran its budget (soft failure).
    ///
    /// Sets: `actor`, `reason`, `budget_ms` (if bounded)
    InterruptFailed,

    /// Every actor has returned; the group is about to return.
    ///
    /// Sets: `reason` (triggering error, if any)
    GroupStopped,
}

/// Per-actor lifecycle state.
///
/// ```text
/// Idle ──► Running ──► Interrupted ──► Stopped
///             └──────────────────────────┘ (completed before any interrupt)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorState {
    /// Registered, `run` not started.
    Idle,
    /// `run` is executing.
    Running,
    /// Interrupt delivered, `run` may still be executing.
    Interrupted,
    /// `run` has returned.
    Stopped,
}

/// Lifecycle event with optional metadata.
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the actor, if applicable.
    pub actor: Option<Arc<str>>,
    /// Human-readable reason (errors, shutdown failures).
    pub reason: Option<Arc<str>>,
    /// Shutdown budget in milliseconds (compact).
    pub budget_ms: Option<u32>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            actor: None,
            reason: None,
            budget_ms: None,
        }
    }

    /// Attaches an actor name.
    #[inline]
    pub fn with_actor(mut self, actor: impl Into<Arc<str>>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a shutdown budget (stored as milliseconds).
    #[inline]
    pub fn with_budget(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.budget_ms = Some(ms);
        self
    }

    /// State the named actor is in once this event has been published.
    ///
    /// Group-level events return `None`.
    pub fn actor_state(&self) -> Option<ActorState> {
        match self.kind {
            EventKind::ActorStarting => Some(ActorState::Running),
            EventKind::InterruptRequested
            | EventKind::InterruptCompleted
            | EventKind::InterruptFailed => Some(ActorState::Interrupted),
            EventKind::ActorStopped | EventKind::ActorFailed => Some(ActorState::Stopped),
            EventKind::GroupStopping | EventKind::GroupStopped => None,
        }
    }
}
