//! # Launcher commands.
//!
//! A command turns parsed options into an [`ActorGroup`] of three actors sharing one
//! [`Context`]:
//!
//! ```text
//! storage-public-link-data ─► RuntimeActor  (external runtime, named after the command)
//!                          ─► DebugActor    ("<command>-debug", bounded shutdown)
//!                          ─► SignalActor   (process interrupt)
//! ```
//!
//! Anything that fails while assembling the group is a [`StartupError`]; no actor
//! runs in that case.

use std::sync::Arc;

use crate::{
    actors::{ActorSpec, DebugActor, RuntimeActor, SignalActor},
    config::GroupConfig,
    context::Context,
    core::ActorGroup,
    debug::{DebugOptions, DebugServer},
    error::{CommandError, StartupError},
    runtime::{ProcessRuntime, ServiceRuntime, pid_file_path},
    signals::{OsInterrupt, SignalSource},
    subscribers::{LogWriter, Subscribe},
};

use super::{
    options::{Command, STORAGE_PUBLIC_LINK_DATA, StoragePublicLinkDataOptions},
    telemetry,
};

/// Runs the selected command to completion.
pub async fn execute(command: Command) -> Result<(), CommandError> {
    match command {
        Command::StoragePublicLinkData(opts) => storage_public_link_data(opts).await,
    }
}

/// Launches the storage public-link data provider and supervises it until shutdown.
pub async fn storage_public_link_data(
    opts: StoragePublicLinkDataOptions,
) -> Result<(), CommandError> {
    let runtime = Arc::new(ProcessRuntime::new(&opts.revad_bin));
    let group = assemble(&opts, runtime, OsInterrupt).await?;
    group.run().await?;
    Ok(())
}

/// Builds the actor group for the storage public-link data provider.
pub async fn assemble<S: SignalSource>(
    opts: &StoragePublicLinkDataOptions,
    runtime: Arc<dyn ServiceRuntime>,
    signals: S,
) -> Result<ActorGroup, StartupError> {
    telemetry::check_tracing(&opts.tracing);

    let ctx = Context::background();
    let descriptor = opts.descriptor();
    descriptor.to_toml()?;
    let pid_file = pid_file_path(&std::env::temp_dir(), STORAGE_PUBLIC_LINK_DATA);

    let debug_name = format!("{STORAGE_PUBLIC_LINK_DATA}-debug");
    let debug_opts = DebugOptions::new(debug_name.as_str())
        .addr(opts.debug_addr.as_str())
        .context(ctx.clone())
        .config(serde_json::to_value(opts)?);
    let server = match DebugServer::bind(debug_opts).await {
        Ok(server) => server,
        Err(e) => {
            tracing::info!(err = %e, server = %debug_name, "Failed to initialize server");
            return Err(e);
        }
    };

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let mut group = ActorGroup::builder(GroupConfig::default())
        .with_subscribers(subs)
        .build();
    group
        .add_actor(Arc::new(RuntimeActor::new(
            STORAGE_PUBLIC_LINK_DATA,
            runtime,
            descriptor,
            pid_file,
            ctx.clone(),
        )))
        .add(ActorSpec::new(
            Arc::new(DebugActor::new(server, ctx.clone())),
            opts.debug_shutdown_budget(),
        ))
        .add_actor(Arc::new(SignalActor::with_source(signals, ctx)));

    Ok(group)
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use clap::Parser;
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::{
        error::ActorError,
        runtime::RuntimeDescriptor,
        service::options::Opts,
        signals::ManualSignal,
    };

    #[derive(Default)]
    struct FakeRuntime {
        fail: bool,
        started: AtomicBool,
        pid_file: Mutex<Option<std::path::PathBuf>>,
        stop: CancellationToken,
    }

    #[async_trait]
    impl ServiceRuntime for FakeRuntime {
        async fn start(
            &self,
            _descriptor: &RuntimeDescriptor,
            pid_file: &Path,
        ) -> Result<(), ActorError> {
            self.started.store(true, Ordering::SeqCst);
            *self.pid_file.lock().unwrap() = Some(pid_file.to_path_buf());
            if self.fail {
                tokio::time::sleep(Duration::from_millis(20)).await;
                return Err(ActorError::fail("runtime crashed"));
            }
            self.stop.cancelled().await;
            Ok(())
        }

        fn stop(&self) {
            self.stop.cancel();
        }
    }

    fn options(debug_addr: &str, extra: &[&str]) -> StoragePublicLinkDataOptions {
        let argv = [
            "storagevisor",
            STORAGE_PUBLIC_LINK_DATA,
            "--debug-addr",
            debug_addr,
        ]
        .into_iter()
        .chain(extra.iter().copied());
        match Opts::try_parse_from(argv).unwrap().command {
            Command::StoragePublicLinkData(opts) => opts,
        }
    }

    #[tokio::test]
    async fn runtime_failure_is_the_command_error() {
        let runtime = Arc::new(FakeRuntime {
            fail: true,
            ..Default::default()
        });
        let group = assemble(&options("127.0.0.1:0", &[]), runtime.clone(), ManualSignal::new())
            .await
            .unwrap();
        assert_eq!(group.len(), 3);

        let err = group.run().await.unwrap_err();
        assert_eq!(err.to_string(), ActorError::fail("runtime crashed").to_string());

        let pid_file = runtime.pid_file.lock().unwrap().clone().unwrap();
        let file_name = pid_file.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file_name.starts_with("revad-storage-public-link-data-"));
        assert!(file_name.ends_with(".pid"));
    }

    #[tokio::test]
    async fn interrupt_signal_stops_runtime_and_debug_server() {
        let runtime = Arc::new(FakeRuntime::default());
        let signal = ManualSignal::new();
        let group = assemble(&options("127.0.0.1:0", &[]), runtime.clone(), signal.clone())
            .await
            .unwrap();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            signal.fire();
        });

        group.run().await.unwrap();
        assert!(runtime.started.load(Ordering::SeqCst));
        assert!(runtime.stop.is_cancelled());
    }

    #[tokio::test]
    async fn bind_failure_aborts_before_any_actor_runs() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = taken.local_addr().unwrap().to_string();
        let runtime = Arc::new(FakeRuntime::default());

        let res = assemble(
            &options(addr.as_str(), &[]),
            runtime.clone(),
            ManualSignal::new(),
        )
        .await;

        assert!(matches!(res, Err(StartupError::Bind { .. })));
        assert!(!runtime.started.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn unsupported_tracing_backend_still_starts() {
        let runtime = Arc::new(FakeRuntime::default());
        let opts = options("127.0.0.1:0", &["--tracing-enabled", "--tracing-type", "zipkin"]);
        let group = assemble(&opts, runtime, ManualSignal::new()).await;
        assert!(group.is_ok());
    }
}
