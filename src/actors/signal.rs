//! # Signal actor: bridges OS interrupt signals into the group.
//!
//! ```text
//! run():        register interest ──► select { signal, stop } ──► Ok(())
//! interrupt():  stop.cancel() + shared ctx.cancel()   (both idempotent)
//! ```
//!
//! A received signal makes this actor the first to return, which triggers the
//! group-wide interrupt with no error, so the process exits cleanly.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{
    actors::actor::{Actor, Interrupt},
    context::Context,
    error::{ActorError, ShutdownError},
    signals::{OsInterrupt, SignalSource},
};

/// Actor that returns when the process interrupt signal arrives.
pub struct SignalActor<S = OsInterrupt> {
    source: S,
    stop: CancellationToken,
    ctx: Context,
}

impl SignalActor<OsInterrupt> {
    /// Creates an actor listening for the OS interrupt signal.
    pub fn new(ctx: Context) -> Self {
        Self::with_source(OsInterrupt, ctx)
    }
}

impl<S: SignalSource> SignalActor<S> {
    /// Creates an actor driven by an arbitrary signal source.
    pub fn with_source(source: S, ctx: Context) -> Self {
        Self {
            source,
            stop: CancellationToken::new(),
            ctx,
        }
    }
}

#[async_trait]
impl<S: SignalSource> Actor for SignalActor<S> {
    fn name(&self) -> &str {
        "signal"
    }

    async fn run(&self) -> Result<(), ActorError> {
        tokio::select! {
            res = self.source.recv() => {
                res?;
                tracing::info!("interrupt signal received");
            }
            _ = self.stop.cancelled() => {}
        }
        Ok(())
    }

    async fn interrupt(&self, _interrupt: Interrupt) -> Result<(), ShutdownError> {
        self.stop.cancel();
        self.ctx.cancel();
        Ok(())
    }
}
