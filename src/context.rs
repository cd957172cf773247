//! # Cancellation context shared by all actors.
//!
//! [`Context`] pairs a [`CancellationToken`] with an optional deadline. It is created once
//! at process start, handed to every actor constructor, and cancelled through
//! [`Context::cancel`], which is idempotent.
//!
//! ## Rules
//! - Cancelling a parent cancels every context derived from it.
//! - Cancelling a child never affects the parent.
//! - A derived deadline is never later than the parent's deadline.
//!
//! ```text
//! background ──child()──► shared ──with_timeout(5s)──► shutdown ctx
//!     │                     │                             │
//!   cancel() ─────────────► cancelled ──────────────────► cancelled
//! ```
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use storagevisor::{Context, ContextError};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let root = Context::background();
//! let bounded = root.with_timeout(Duration::from_millis(10));
//!
//! assert_eq!(bounded.done().await, ContextError::DeadlineExceeded);
//! assert!(root.err().is_none());
//!
//! root.cancel();
//! root.cancel(); // no-op
//! assert_eq!(root.err(), Some(ContextError::Canceled));
//! # }
//! ```

use std::time::Duration;

use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

use crate::error::ContextError;

/// Cooperative cancellation signal with an optional deadline.
///
/// Cloning is cheap and yields a handle to the **same** context.
#[derive(Clone, Debug, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// Creates a root context with no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derives a child context that inherits cancellation and deadline.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Derives a child context that is done after `timeout` at the latest.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Derives a child context that is done at `deadline` at the latest.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(parent) => parent.min(deadline),
            None => deadline,
        };
        Self {
            token: self.token.child_token(),
            deadline: Some(deadline),
        }
    }

    /// Cancels this context and all contexts derived from it.
    #[inline]
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns the deadline, if any.
    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns the underlying token (for APIs that take a [`CancellationToken`]).
    #[inline]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Returns `true` once the context is cancelled or past its deadline.
    pub fn is_done(&self) -> bool {
        self.err().is_some()
    }

    /// Returns why the context is done, or `None` while it is still live.
    ///
    /// Cancellation wins over an elapsed deadline.
    pub fn err(&self) -> Option<ContextError> {
        if self.token.is_cancelled() {
            return Some(ContextError::Canceled);
        }
        match self.deadline {
            Some(at) if Instant::now() >= at => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Waits until the context is done and returns the reason.
    pub async fn done(&self) -> ContextError {
        match self.deadline {
            Some(at) => {
                tokio::select! {
                    biased;
                    _ = self.token.cancelled() => ContextError::Canceled,
                    _ = time::sleep_until(at) => ContextError::DeadlineExceeded,
                }
            }
            None => {
                self.token.cancelled().await;
                ContextError::Canceled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cancelling_parent_reaches_children() {
        let root = Context::background();
        let child = root.child();
        let bounded = child.with_timeout(Duration::from_secs(60));

        root.cancel();

        assert_eq!(child.err(), Some(ContextError::Canceled));
        assert_eq!(bounded.done().await, ContextError::Canceled);
    }

    #[tokio::test]
    async fn cancelling_child_leaves_parent_alive() {
        let root = Context::background();
        let child = root.child();

        child.cancel();
        child.cancel();

        assert!(child.is_done());
        assert!(!root.is_done());
    }

    #[tokio::test]
    async fn deadline_never_extends_past_parent() {
        let root = Context::background();
        let short = root.with_timeout(Duration::from_millis(20));
        let nested = short.with_timeout(Duration::from_secs(60));

        assert_eq!(nested.deadline(), short.deadline());
        assert_eq!(nested.done().await, ContextError::DeadlineExceeded);
        assert!(root.err().is_none());
    }
}
