//! # Function-backed actor (`ActorFn`)
//!
//! [`ActorFn`] wraps a `run` closure `Fn() -> Fut` and an `interrupt` closure
//! `Fn(Interrupt) -> Fut`, producing a fresh future per call. Shared state between the
//! two halves is captured explicitly (`Arc`, `CancellationToken`, [`Context`](crate::Context)).
//!
//! ## Example
//! ```rust
//! use storagevisor::{ActorError, ActorFn, ActorRef, Interrupt, ShutdownError};
//! use tokio_util::sync::CancellationToken;
//!
//! let stop = CancellationToken::new();
//! let (run_stop, int_stop) = (stop.clone(), stop.clone());
//!
//! let actor: ActorRef = ActorFn::arc(
//!     "waiter",
//!     move || {
//!         let stop = run_stop.clone();
//!         async move {
//!             stop.cancelled().await;
//!             Ok::<(), ActorError>(())
//!         }
//!     },
//!     move |_: Interrupt| {
//!         let stop = int_stop.clone();
//!         async move {
//!             stop.cancel();
//!             Ok::<(), ShutdownError>(())
//!         }
//!     },
//! );
//! assert_eq!(actor.name(), "waiter");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::actors::actor::{Actor, Interrupt};
use crate::error::{ActorError, ShutdownError};

/// Function-backed actor implementation.
pub struct ActorFn<R, I> {
    name: Cow<'static, str>,
    run: R,
    interrupt: I,
}

impl<R, I> ActorFn<R, I> {
    /// Creates a new function-backed actor.
    ///
    /// Prefer [`ActorFn::arc`] when you immediately need an [`ActorRef`](crate::ActorRef).
    pub fn new(name: impl Into<Cow<'static, str>>, run: R, interrupt: I) -> Self {
        Self {
            name: name.into(),
            run,
            interrupt,
        }
    }

    /// Creates the actor and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, run: R, interrupt: I) -> Arc<Self> {
        Arc::new(Self::new(name, run, interrupt))
    }
}

#[async_trait]
impl<R, RFut, I, IFut> Actor for ActorFn<R, I>
where
    R: Fn() -> RFut + Send + Sync + 'static,
    RFut: Future<Output = Result<(), ActorError>> + Send + 'static,
    I: Fn(Interrupt) -> IFut + Send + Sync + 'static,
    IFut: Future<Output = Result<(), ShutdownError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self) -> Result<(), ActorError> {
        (self.run)().await
    }

    async fn interrupt(&self, interrupt: Interrupt) -> Result<(), ShutdownError> {
        (self.interrupt)(interrupt).await
    }
}
