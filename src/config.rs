//! # Actor group configuration.
//!
//! Provides [`GroupConfig`] centralized settings for the actor group.
//!
//! Config is used in two ways:
//! 1. **Group creation**: `ActorGroup::new(config)`
//! 2. **ActorSpec defaults**: `ActorSpec::with_defaults(actor, &config)`
//!
//! ## Sentinel values
//! - `shutdown_budget = 0s` → unbounded interrupt (treated as `None` by `ActorSpec::with_defaults`)

use std::time::Duration;

/// Global configuration for an [`ActorGroup`](crate::ActorGroup).
///
/// ## Field semantics
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by Bus)
/// - `shutdown_budget`: Default per-actor interrupt budget (`0s` = unbounded)
#[derive(Clone, Debug)]
pub struct GroupConfig {
    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` messages will
    /// skip older items. Minimum value is 1 (enforced by Bus).
    pub bus_capacity: usize,

    /// Default time an actor's `interrupt` may take.
    ///
    /// - `Duration::ZERO` = no budget (interrupt context has no deadline)
    /// - `> 0` = interrupt context expires after the budget; overruns are soft failures
    ///
    /// Used by `ActorSpec::with_defaults()`. Can be overridden per actor.
    pub shutdown_budget: Duration,
}

impl GroupConfig {
    /// Returns the default shutdown budget as an `Option`.
    ///
    /// - `None` → unbounded
    /// - `Some(d)` → interrupt context expires after `d`
    #[inline]
    pub fn default_shutdown_budget(&self) -> Option<Duration> {
        if self.shutdown_budget == Duration::ZERO {
            None
        } else {
            Some(self.shutdown_budget)
        }
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for GroupConfig {
    /// Default configuration:
    ///
    /// - `bus_capacity = 1024`
    /// - `shutdown_budget = 0s` (unbounded)
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            shutdown_budget: Duration::ZERO,
        }
    }
}
