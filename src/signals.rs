//! # Process signal sources.
//!
//! [`SignalSource`] abstracts "wait for the process interrupt signal" so the
//! [`SignalActor`](crate::SignalActor) can be driven by a fake source in tests.
//!
//! ## Sources
//! - [`OsInterrupt`]: the OS interrupt signal (`SIGINT` on Unix, Ctrl-C on Windows).
//!   No other signals are handled.
//! - [`ManualSignal`]: fired programmatically via [`ManualSignal::fire`].

use std::io;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Source of a single "please stop" signal.
#[async_trait]
pub trait SignalSource: Send + Sync + 'static {
    /// Waits for the signal.
    ///
    /// Returns `Err` if interest in the signal cannot be registered.
    async fn recv(&self) -> io::Result<()>;
}

/// The process interrupt signal.
///
/// Each call to [`recv`](SignalSource::recv) creates an independent listener.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsInterrupt;

#[async_trait]
impl SignalSource for OsInterrupt {
    #[cfg(unix)]
    async fn recv(&self) -> io::Result<()> {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigint = signal(SignalKind::interrupt())?;
        sigint.recv().await;
        Ok(())
    }

    #[cfg(not(unix))]
    async fn recv(&self) -> io::Result<()> {
        tokio::signal::ctrl_c().await
    }
}

/// Programmatic signal; clones share the same trigger.
///
/// ## Example
/// ```rust
/// use storagevisor::{ManualSignal, SignalSource};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let signal = ManualSignal::new();
/// signal.clone().fire();
/// signal.recv().await.unwrap();
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualSignal {
    fired: CancellationToken,
}

impl ManualSignal {
    /// Creates an unfired signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers the signal to every current and future waiter.
    pub fn fire(&self) {
        self.fired.cancel();
    }
}

#[async_trait]
impl SignalSource for ManualSignal {
    async fn recv(&self) -> io::Result<()> {
        self.fired.cancelled().await;
        Ok(())
    }
}
