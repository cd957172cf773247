//! # Event subscribers for the actor group.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out and
//! the built-in [`LogWriter`].
//!
//! ```text
//! runner / group ── publish(Event) ──► Bus ──► listener ──► SubscriberSet
//!                                                               │
//!                                                    ┌──────────┼──────────┐
//!                                                    ▼          ▼          ▼
//!                                                LogWriter   Custom      ...
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use storagevisor::{Event, EventKind, Subscribe};
//! use async_trait::async_trait;
//!
//! struct ShutdownAudit;
//!
//! #[async_trait]
//! impl Subscribe for ShutdownAudit {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::InterruptFailed {
//!             // record the slow actor
//!         }
//!     }
//! }
//! ```

mod log;
mod set;
mod subscribe;

pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
