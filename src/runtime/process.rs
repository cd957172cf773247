//! # Child-process runtime.
//!
//! [`ProcessRuntime`] runs the external runtime binary (`revad` by default):
//!
//! ```text
//! start(descriptor, pid_file)
//!   ├─► write descriptor to <pid_file>.toml
//!   ├─► spawn <program> [args..] -c <pid_file>.toml -p <pid_file>
//!   ├─► select {
//!   │     child exits  ─► Ok if success, Err(Exited) otherwise
//!   │     stop()       ─► SIGTERM (kill on non-unix), wait, Ok
//!   │   }
//!   └─► remove the descriptor file
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;

use crate::error::ActorError;
use crate::runtime::{RuntimeDescriptor, ServiceRuntime};

/// Runs the storage runtime as a supervised child process.
#[derive(Debug)]
pub struct ProcessRuntime {
    program: PathBuf,
    args: Vec<OsString>,
    stop: CancellationToken,
}

impl ProcessRuntime {
    /// Creates a runtime launching `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stop: CancellationToken::new(),
        }
    }

    /// Arguments placed before `-c <config> -p <pidfile>`.
    pub fn with_args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    async fn supervise(&self, mut child: Child) -> Result<(), ActorError> {
        let pid = child.id();
        let exited = tokio::select! {
            status = child.wait() => Some(status?),
            _ = self.stop.cancelled() => None,
        };
        if let Some(status) = exited {
            return exit_result(status);
        }

        tracing::info!(?pid, program = %self.program.display(), "stopping runtime process");
        terminate(&mut child)?;
        let status = child.wait().await?;
        tracing::debug!(?status, "runtime process stopped");
        Ok(())
    }
}

#[async_trait]
impl ServiceRuntime for ProcessRuntime {
    async fn start(
        &self,
        descriptor: &RuntimeDescriptor,
        pid_file: &Path,
    ) -> Result<(), ActorError> {
        if self.stop.is_cancelled() {
            return Ok(());
        }

        let config = pid_file.with_extension("toml");
        let rendered = descriptor
            .to_toml()
            .map_err(|e| ActorError::fail(e.to_string()))?;
        tokio::fs::write(&config, rendered).await?;

        let spawned = Command::new(&self.program)
            .args(&self.args)
            .arg("-c")
            .arg(&config)
            .arg("-p")
            .arg(pid_file)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .spawn();

        let res = match spawned {
            Ok(child) => {
                tracing::info!(
                    pid = ?child.id(),
                    program = %self.program.display(),
                    config = %config.display(),
                    "runtime process started"
                );
                self.supervise(child).await
            }
            Err(e) => Err(e.into()),
        };

        if let Err(e) = tokio::fs::remove_file(&config).await {
            tracing::debug!(err = %e, config = %config.display(), "descriptor cleanup failed");
        }
        res
    }

    fn stop(&self) {
        self.stop.cancel();
    }
}

fn exit_result(status: ExitStatus) -> Result<(), ActorError> {
    if status.success() {
        Ok(())
    } else {
        Err(ActorError::Exited {
            code: status.code(),
        })
    }
}

#[cfg(unix)]
fn terminate(child: &mut Child) -> std::io::Result<()> {
    use rustix::process::{Pid, Signal, kill_process};

    match child.id().and_then(|id| Pid::from_raw(id as i32)) {
        Some(pid) => kill_process(pid, Signal::Term).map_err(Into::into),
        // already reaped
        None => Ok(()),
    }
}

#[cfg(not(unix))]
fn terminate(child: &mut Child) -> std::io::Result<()> {
    child.start_kill()
}
