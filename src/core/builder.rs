use std::sync::Arc;

use crate::{config::GroupConfig, subscribers::Subscribe};

use super::group::ActorGroup;

/// Builder for constructing an [`ActorGroup`] with optional subscribers.
pub struct ActorGroupBuilder {
    cfg: GroupConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl ActorGroupBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: GroupConfig) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive lifecycle events through dedicated workers with bounded
    /// queues; all queued events are handled before `run` returns.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds an empty group, ready for registration.
    pub fn build(self) -> ActorGroup {
        ActorGroup::new_internal(self.cfg, self.subscribers)
    }
}
