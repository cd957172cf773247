//! # Runtime actor: wraps an opaque [`ServiceRuntime`].
//!
//! `run` blocks in [`ServiceRuntime::start`] until the runtime exits; `interrupt`
//! forwards to [`ServiceRuntime::stop`] and cancels the shared context.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    actors::actor::{Actor, Interrupt},
    context::Context,
    error::{ActorError, ShutdownError},
    runtime::{RuntimeDescriptor, ServiceRuntime},
};

/// Actor driving the external storage runtime.
pub struct RuntimeActor {
    name: String,
    runtime: Arc<dyn ServiceRuntime>,
    descriptor: RuntimeDescriptor,
    pid_file: PathBuf,
    ctx: Context,
}

impl RuntimeActor {
    /// Creates the actor; nothing starts until the group runs it.
    pub fn new(
        name: impl Into<String>,
        runtime: Arc<dyn ServiceRuntime>,
        descriptor: RuntimeDescriptor,
        pid_file: PathBuf,
        ctx: Context,
    ) -> Self {
        Self {
            name: name.into(),
            runtime,
            descriptor,
            pid_file,
            ctx,
        }
    }

    /// Pid file handed to the runtime.
    pub fn pid_file(&self) -> &PathBuf {
        &self.pid_file
    }
}

#[async_trait]
impl Actor for RuntimeActor {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self) -> Result<(), ActorError> {
        self.runtime.start(&self.descriptor, &self.pid_file).await
    }

    async fn interrupt(&self, _interrupt: Interrupt) -> Result<(), ShutdownError> {
        tracing::info!(server = %self.name, "Shutting down server");
        self.runtime.stop();
        self.ctx.cancel();
        Ok(())
    }
}
