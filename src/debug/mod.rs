//! # Debug/health server.
//!
//! A small HTTP server that runs next to the storage runtime and answers
//! `/healthz`, `/readyz` and `/config`. See [`DebugServer`].

mod handlers;
mod server;

pub use server::{DebugOptions, DebugServer};
