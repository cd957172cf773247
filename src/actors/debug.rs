//! # Debug actor: runs a [`DebugServer`] inside the group.
//!
//! `interrupt` performs a graceful shutdown bounded by the interrupt context. A
//! timeout is logged and reported as a soft failure; it never changes the group
//! outcome.

use async_trait::async_trait;

use crate::{
    actors::actor::{Actor, Interrupt},
    context::Context,
    debug::DebugServer,
    error::{ActorError, ShutdownError},
};

/// Actor serving the debug/health endpoints.
pub struct DebugActor {
    server: DebugServer,
    ctx: Context,
}

impl DebugActor {
    /// Wraps an already bound server.
    pub fn new(server: DebugServer, ctx: Context) -> Self {
        Self { server, ctx }
    }

    /// The wrapped server.
    pub fn server(&self) -> &DebugServer {
        &self.server
    }
}

#[async_trait]
impl Actor for DebugActor {
    fn name(&self) -> &str {
        self.server.name()
    }

    async fn run(&self) -> Result<(), ActorError> {
        self.server.listen_and_serve().await
    }

    async fn interrupt(&self, interrupt: Interrupt) -> Result<(), ShutdownError> {
        let res = self.server.shutdown(interrupt.context()).await;
        self.ctx.cancel();

        match &res {
            Ok(()) => tracing::info!(server = %self.name(), "Shutting down server"),
            Err(e) => tracing::info!(err = %e, server = %self.name(), "Failed to shutdown server"),
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;
    use crate::debug::DebugOptions;

    #[tokio::test]
    async fn interrupt_stops_server_and_cancels_shared_context() {
        let shared = Context::background();
        let server = DebugServer::bind(DebugOptions::new("debug").addr("127.0.0.1:0"))
            .await
            .unwrap();
        let actor = Arc::new(DebugActor::new(server, shared.clone()));

        let run = tokio::spawn({
            let actor = actor.clone();
            async move { actor.run().await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;

        let ctx = Context::background().with_timeout(Duration::from_secs(5));
        actor.interrupt(Interrupt::new(None, ctx)).await.unwrap();

        assert!(shared.is_done());
        run.await.unwrap().unwrap();
    }
}
