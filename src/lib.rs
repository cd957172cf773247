//! # storagevisor
//!
//! **Storagevisor** launches the storage public-link data provider and supervises it
//! together with a debug/health server and the process interrupt signal.
//!
//! The core is a small actor-group lifecycle manager: every actor is a
//! `(run, interrupt)` pair, all actors run concurrently, and the first one to return
//! stops the rest.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │ RuntimeActor │   │  DebugActor  │   │ SignalActor  │
//!     │ (revad child)│   │ (health http)│   │   (SIGINT)   │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  ActorGroup (lifecycle supervisor)                                │
//! │  - JoinSet (one task per actor, panics isolated)                  │
//! │  - Bus (broadcast events)                                         │
//! │  - SubscriberSet (fans out to user subscribers)                   │
//! └──────┬────────────────────────────────────────────────────┬──────┘
//!        │ first run() returns                                │
//!        ▼                                                    ▼
//!   interrupt(every actor, once, in order)           Bus ─► listener
//!        │                                                    │
//!        ▼                                                    ▼
//!   join remaining run()s ─► return first error        LogWriter, ...
//! ```
//!
//! All three built-in actors share one [`Context`]; whichever actor is interrupted
//! first cancels it, and everything derived from it observes the cancellation.
//!
//! ## Features
//! | Area              | Description                                                      | Key types / traits                          |
//! |-------------------|------------------------------------------------------------------|---------------------------------------------|
//! | **Group**         | Run actors together, stop them together.                         | [`ActorGroup`], [`ActorSpec`]               |
//! | **Actors**        | Define actors from closures or implement the trait.              | [`Actor`], [`ActorFn`], [`ActorRef`]        |
//! | **Cancellation**  | Shared cancellation with optional deadlines.                     | [`Context`]                                 |
//! | **Subscriber API**| Hook into lifecycle events (logging, custom subscribers).         | [`Subscribe`], [`LogWriter`]                |
//! | **Runtime**       | Start/stop the external storage runtime.                         | [`ServiceRuntime`], [`ProcessRuntime`]      |
//! | **Debug server**  | Health, readiness and configuration endpoints.                   | [`DebugServer`], [`DebugOptions`]           |
//! | **Errors**        | Typed errors for actors, shutdown and startup.                   | [`ActorError`], [`ShutdownError`]           |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use storagevisor::{
//!     ActorError, ActorGroup, ActorSpec, Context, GroupConfig, Interrupt, LogWriter,
//!     ManualSignal, ShutdownError, SignalActor, Subscribe,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), ActorError> {
//!     let ctx = Context::background();
//!     let signal = ManualSignal::new();
//!
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
//!     let mut group = ActorGroup::builder(GroupConfig::default())
//!         .with_subscribers(subs)
//!         .build();
//!
//!     let worker_ctx = ctx.clone();
//!     group
//!         .add_fn(
//!             "worker",
//!             move || {
//!                 let ctx = worker_ctx.clone();
//!                 async move {
//!                     ctx.done().await;
//!                     Ok::<(), ActorError>(())
//!                 }
//!             },
//!             |_: Interrupt| async { Ok::<(), ShutdownError>(()) },
//!         )
//!         .add(ActorSpec::new(
//!             Arc::new(SignalActor::with_source(signal.clone(), ctx)),
//!             Some(Duration::from_secs(1)),
//!         ));
//!
//!     // Simulate Ctrl-C.
//!     signal.fire();
//!     group.run().await
//! }
//! ```
mod actors;
mod config;
mod context;
mod core;
mod debug;
mod error;
mod events;
mod runtime;
pub mod service;
mod signals;
mod subscribers;

// ---- Public re-exports ----

pub use actors::{
    Actor, ActorFn, ActorRef, ActorSpec, DebugActor, Interrupt, RuntimeActor, SignalActor,
};
pub use config::GroupConfig;
pub use context::Context;
pub use crate::core::{ActorGroup, ActorGroupBuilder};
pub use debug::{DebugOptions, DebugServer};
pub use error::{ActorError, CommandError, ContextError, ShutdownError, StartupError};
pub use events::{ActorState, Event, EventKind};
pub use runtime::{
    CoreSection, DataProvider, Drivers, HttpSection, HttpServices, OwnCloudDriver,
    ProcessRuntime, RuntimeDescriptor, ServiceRuntime, SharedSection, pid_file_path,
};
pub use signals::{ManualSignal, OsInterrupt, SignalSource};
pub use subscribers::{LogWriter, Subscribe, SubscriberSet};
