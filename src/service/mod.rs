//! # Service launcher.
//!
//! Command-line surface ([`Opts`]), process logging ([`logging::init`]) and the
//! commands that assemble and run the actor group ([`execute`]).

mod command;
pub mod logging;
mod options;
mod telemetry;

pub use command::{assemble, execute, storage_public_link_data};
pub use options::{
    Command, LogOptions, Opts, STORAGE_PUBLIC_LINK_DATA, StoragePublicLinkDataOptions,
    TracingOptions,
};
pub use telemetry::{TracingBackend, check_tracing};
