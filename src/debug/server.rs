//! # Debug/health HTTP server.
//!
//! The listener is bound eagerly in [`DebugServer::bind`], so an unusable address is
//! an initialization failure reported before any actor runs.
//!
//! ```text
//! listen_and_serve():  take listener ─► serve until stop (graceful) or abandon
//! shutdown(ctx):       stop.cancel() ─► select {
//!                                          serve finished    ─► Ok
//!                                          ctx done          ─► abandon, Err
//!                                       }
//! ```
//!
//! `stop` is a child of the parent context's token, so cancelling the shared service
//! context also starts a graceful shutdown.

use std::net::SocketAddr;

use axum::Router;
use tokio::{net::TcpListener, sync::Mutex};
use tokio_util::sync::CancellationToken;

use crate::{
    context::Context,
    debug::handlers,
    error::{ActorError, ShutdownError, StartupError},
};

/// Options for [`DebugServer::bind`].
///
/// ## Example
/// ```rust
/// use storagevisor::{Context, DebugOptions};
///
/// let opts = DebugOptions::new("storage-public-link-data-debug")
///     .addr("127.0.0.1:0")
///     .context(Context::background())
///     .config(serde_json::json!({ "addr": "0.0.0.0:9180" }));
/// assert_eq!(opts.name(), "storage-public-link-data-debug");
/// ```
#[derive(Clone, Debug)]
pub struct DebugOptions {
    name: String,
    addr: String,
    ctx: Context,
    config: Option<serde_json::Value>,
    routes: Option<Router>,
}

impl DebugOptions {
    /// Options for a server called `name` on `0.0.0.0:0`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            addr: "0.0.0.0:0".to_string(),
            ctx: Context::background(),
            config: None,
            routes: None,
        }
    }

    /// Listen address (`host:port`).
    pub fn addr(mut self, addr: impl Into<String>) -> Self {
        self.addr = addr.into();
        self
    }

    /// Parent context; cancelling it starts a graceful shutdown.
    pub fn context(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self
    }

    /// Configuration exposed at `/config`.
    pub fn config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }

    /// Additional routes merged into the debug router.
    pub fn routes(mut self, routes: Router) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Server name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Debug/health HTTP server.
pub struct DebugServer {
    name: String,
    local_addr: SocketAddr,
    listener: Mutex<Option<TcpListener>>,
    router: Router,
    stop: CancellationToken,
    abandon: CancellationToken,
    stopped: CancellationToken,
}

impl DebugServer {
    /// Binds the listen address and prepares the router.
    pub async fn bind(opts: DebugOptions) -> Result<Self, StartupError> {
        let bind_err = |source| StartupError::Bind {
            addr: opts.addr.clone(),
            source,
        };
        let listener = TcpListener::bind(opts.addr.as_str())
            .await
            .map_err(bind_err)?;
        let local_addr = listener.local_addr().map_err(bind_err)?;

        let mut router = handlers::router(&opts.name, opts.config);
        if let Some(extra) = opts.routes {
            router = router.merge(extra);
        }

        Ok(Self {
            name: opts.name,
            local_addr,
            listener: Mutex::new(Some(listener)),
            router,
            stop: opts.ctx.token().child_token(),
            abandon: CancellationToken::new(),
            stopped: CancellationToken::new(),
        })
    }

    /// Server name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serves requests until shut down.
    ///
    /// Returns `Ok(())` immediately if the server was shut down before it started.
    pub async fn listen_and_serve(&self) -> Result<(), ActorError> {
        let listener = self.listener.lock().await.take();
        let Some(listener) = listener else {
            return Ok(());
        };

        tracing::info!(server = %self.name, addr = %self.local_addr, "starting debug server");
        let stop = self.stop.clone();
        let serve = axum::serve(listener, self.router.clone())
            .with_graceful_shutdown(async move { stop.cancelled().await });

        let res = tokio::select! {
            res = serve.into_future() => res.map_err(ActorError::from),
            _ = self.abandon.cancelled() => {
                tracing::warn!(server = %self.name, "abandoning in-flight connections");
                Ok(())
            }
        };
        self.stopped.cancel();
        res
    }

    /// Gracefully shuts the server down, giving up when `ctx` is done.
    ///
    /// Safe to call before, during or after [`listen_and_serve`](Self::listen_and_serve),
    /// and more than once.
    pub async fn shutdown(&self, ctx: &Context) -> Result<(), ShutdownError> {
        self.stop.cancel();
        if self.listener.lock().await.take().is_some() {
            // never served
            self.stopped.cancel();
        }

        tokio::select! {
            biased;
            _ = self.stopped.cancelled() => Ok(()),
            reason = ctx.done() => {
                self.abandon.cancel();
                Err(reason.into())
            }
        }
    }
}
