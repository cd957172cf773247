//! # Actor registration spec.
//!
//! Defines [`ActorSpec`], which bundles an actor with the budget its `interrupt`
//! may take during group shutdown.
//!
//! A spec can be created:
//! - **Explicitly** with [`ActorSpec::new`] (full control)
//! - **From config** with [`ActorSpec::with_defaults`] (inherit defaults)

use std::time::Duration;

use crate::{actors::actor::ActorRef, config::GroupConfig, context::Context};

/// Specification for running an actor inside an [`ActorGroup`](crate::ActorGroup).
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use storagevisor::{ActorError, ActorFn, ActorSpec, GroupConfig, Interrupt, ShutdownError};
///
/// let actor = ActorFn::arc(
///     "noop",
///     || async { Ok::<(), ActorError>(()) },
///     |_: Interrupt| async { Ok::<(), ShutdownError>(()) },
/// );
///
/// let spec = ActorSpec::new(actor.clone(), Some(Duration::from_secs(5)));
/// assert_eq!(spec.shutdown_budget(), Some(Duration::from_secs(5)));
///
/// // `GroupConfig::default()` has no budget.
/// let spec = ActorSpec::with_defaults(actor, &GroupConfig::default());
/// assert!(spec.shutdown_budget().is_none());
/// ```
#[derive(Clone)]
pub struct ActorSpec {
    actor: ActorRef,
    shutdown_budget: Option<Duration>,
}

impl ActorSpec {
    /// Creates a spec with an explicit shutdown budget (`None` = unbounded).
    pub fn new(actor: ActorRef, shutdown_budget: Option<Duration>) -> Self {
        Self {
            actor,
            shutdown_budget,
        }
    }

    /// Creates a spec inheriting the budget from the group config.
    pub fn with_defaults(actor: ActorRef, cfg: &GroupConfig) -> Self {
        Self {
            actor,
            shutdown_budget: cfg.default_shutdown_budget(),
        }
    }

    /// Returns reference to the actor.
    pub fn actor(&self) -> &ActorRef {
        &self.actor
    }

    /// Convenience: returns the actor name.
    pub fn name(&self) -> &str {
        self.actor.name()
    }

    /// Returns the shutdown budget, if configured.
    pub fn shutdown_budget(&self) -> Option<Duration> {
        self.shutdown_budget
    }

    /// Returns a new spec with updated shutdown budget.
    pub fn with_shutdown_budget(mut self, budget: Option<Duration>) -> Self {
        self.shutdown_budget = budget.filter(|d| *d > Duration::ZERO);
        self
    }

    /// Context handed to this actor's interrupt.
    ///
    /// Derived from a fresh root rather than the shared service context, which is
    /// usually already cancelled by the time later actors are interrupted.
    pub(crate) fn shutdown_context(&self) -> Context {
        match self.shutdown_budget {
            Some(budget) => Context::background().with_timeout(budget),
            None => Context::background(),
        }
    }
}
