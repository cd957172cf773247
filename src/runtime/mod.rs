//! # External service runtime boundary.
//!
//! The storage runtime is opaque: the launcher only knows how to start it with a
//! [`RuntimeDescriptor`] and a pid file, and how to ask it to stop.
//!
//! - [`ServiceRuntime`]: capability interface `{start, stop}`
//! - [`ProcessRuntime`]: runs the runtime as a child process
//! - [`RuntimeDescriptor`]: configuration tree handed to the runtime

mod descriptor;
mod process;

use std::path::Path;

use async_trait::async_trait;

use crate::error::ActorError;

pub use descriptor::{
    CoreSection, DataProvider, Drivers, HttpSection, HttpServices, OwnCloudDriver,
    RuntimeDescriptor, SharedSection, pid_file_path,
};
pub use process::ProcessRuntime;

/// Start/stop capability of an external runtime.
#[async_trait]
pub trait ServiceRuntime: Send + Sync + 'static {
    /// Starts the runtime and blocks until it exits.
    ///
    /// Returns `Ok(())` when the runtime exits normally or because `stop` was called.
    async fn start(&self, descriptor: &RuntimeDescriptor, pid_file: &Path)
    -> Result<(), ActorError>;

    /// Asks the runtime to stop. Idempotent; may be called before `start`.
    fn stop(&self);
}
