//! Error types used by the actor group, its actors and the service launcher.
//!
//! This module defines the following error enums:
//!
//! - [`ActorError`]: returned by an actor's `run`; the first one becomes the group outcome.
//! - [`ShutdownError`]: returned by an actor's `interrupt`; always a soft failure.
//! - [`ContextError`]: why a [`Context`](crate::Context) is done.
//! - [`StartupError`]: raised while assembling actors, before anything runs.
//! - [`CommandError`]: what a launcher command ultimately reports to the binary.
//!
//! The runtime-facing types provide helper methods (`as_label`, `as_message`) for logs.

use std::{io, sync::Arc, time::Duration};

use thiserror::Error;

/// # Errors produced by actor execution.
///
/// The first actor whose `run` returns decides the group outcome: if it returns one of
/// these, [`ActorGroup::run`](crate::ActorGroup::run) returns the same value.
///
/// The type is `Clone` because the triggering error is handed to every actor's
/// interrupt before it is returned to the caller.
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum ActorError {
    /// Actor execution failed with a message.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Actor hit an I/O error (listener, signal registration, process spawn).
    #[error("io error: {0}")]
    Io(Arc<io::Error>),

    /// A supervised process exited on its own with a non-success status.
    #[error("process exited unexpectedly (code: {code:?})")]
    Exited {
        /// Exit code if the process was not terminated by a signal.
        code: Option<i32>,
    },

    /// The actor's `run` panicked.
    #[error("actor '{actor}' panicked: {info}")]
    Panicked {
        /// Name of the panicking actor.
        actor: String,
        /// Panic payload rendered as text.
        info: String,
    },

    /// The actor's execution unit was torn down before it could report.
    #[error("actor execution aborted")]
    Aborted,
}

impl ActorError {
    /// Shorthand for [`ActorError::Fail`].
    ///
    /// # Example
    /// ```
    /// use storagevisor::ActorError;
    ///
    /// let err = ActorError::fail("boom");
    /// assert_eq!(err.to_string(), "execution failed: boom");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        ActorError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ActorError::Fail { .. } => "actor_failed",
            ActorError::Io(_) => "actor_io",
            ActorError::Exited { .. } => "actor_exited",
            ActorError::Panicked { .. } => "actor_panicked",
            ActorError::Aborted => "actor_aborted",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ActorError::Fail { error } => format!("error: {error}"),
            ActorError::Io(e) => format!("io: {e}"),
            ActorError::Exited { code: Some(code) } => format!("exited with code {code}"),
            ActorError::Exited { code: None } => "terminated by signal".to_string(),
            ActorError::Panicked { actor, info } => format!("panic in {actor}: {info}"),
            ActorError::Aborted => "aborted".to_string(),
        }
    }
}

impl From<io::Error> for ActorError {
    fn from(e: io::Error) -> Self {
        ActorError::Io(Arc::new(e))
    }
}

/// # Errors produced while interrupting an actor.
///
/// These never change the group outcome; the group logs them and moves on.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShutdownError {
    /// Graceful shutdown did not complete before its deadline and was abandoned.
    #[error("shutdown deadline exceeded (budget: {budget:?})")]
    DeadlineExceeded {
        /// The configured shutdown budget, if known.
        budget: Option<Duration>,
    },

    /// The shutdown context was cancelled before shutdown completed.
    #[error("shutdown cancelled")]
    Canceled,

    /// Shutdown failed for another reason.
    #[error("shutdown failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },
}

impl ShutdownError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use storagevisor::ShutdownError;
    ///
    /// let err = ShutdownError::DeadlineExceeded { budget: None };
    /// assert_eq!(err.as_label(), "shutdown_timeout");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ShutdownError::DeadlineExceeded { .. } => "shutdown_timeout",
            ShutdownError::Canceled => "shutdown_canceled",
            ShutdownError::Failed { .. } => "shutdown_failed",
        }
    }

    /// Indicates whether the error is a deadline overrun.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ShutdownError::DeadlineExceeded { .. })
    }
}

impl From<ContextError> for ShutdownError {
    fn from(e: ContextError) -> Self {
        match e {
            ContextError::Canceled => ShutdownError::Canceled,
            ContextError::DeadlineExceeded => ShutdownError::DeadlineExceeded { budget: None },
        }
    }
}

/// Reason a [`Context`](crate::Context) is done.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    /// The context (or one of its parents) was cancelled.
    #[error("context canceled")]
    Canceled,
    /// The context deadline passed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// # Errors raised while assembling actors.
///
/// Any of these aborts startup before a single actor runs.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum StartupError {
    /// The debug server could not bind its listen address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that was requested.
        addr: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Logging could not be initialized.
    #[error("failed to initialize logging: {0}")]
    Logging(String),

    /// The runtime descriptor could not be serialized.
    #[error("failed to serialize runtime descriptor: {0}")]
    Descriptor(#[from] toml::ser::Error),

    /// The configuration exposed by the debug server could not be rendered.
    #[error("failed to render configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// What a launcher command reports back to the process entry point.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Startup failed before the actor group ran.
    #[error(transparent)]
    Startup(#[from] StartupError),
    /// The actor group terminated with an actor failure.
    #[error(transparent)]
    Actor(#[from] ActorError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_are_shared_on_clone() {
        let err: ActorError = io::Error::new(io::ErrorKind::AddrInUse, "taken").into();
        let copy = err.clone();
        assert_eq!(err.as_label(), "actor_io");
        assert_eq!(copy.to_string(), "io error: taken");
    }

    #[test]
    fn context_errors_map_to_shutdown_errors() {
        assert_eq!(
            ShutdownError::from(ContextError::DeadlineExceeded),
            ShutdownError::DeadlineExceeded { budget: None }
        );
        assert_eq!(
            ShutdownError::from(ContextError::Canceled),
            ShutdownError::Canceled
        );
        assert!(ShutdownError::DeadlineExceeded { budget: None }.is_timeout());
        assert!(!ShutdownError::Canceled.is_timeout());
    }

    #[test]
    fn exited_message_distinguishes_signal_termination() {
        assert_eq!(
            ActorError::Exited { code: Some(3) }.as_message(),
            "exited with code 3"
        );
        assert_eq!(
            ActorError::Exited { code: None }.as_message(),
            "terminated by signal"
        );
    }
}
