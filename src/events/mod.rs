//! Lifecycle events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted by the actor group and its runners.
//!
//! ## Contents
//! - [`EventKind`], [`Event`], [`ActorState`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `ActorGroup::run` (shutdown broadcast), `runner::run_actor` (per actor).
//! - **Consumers**: the group listener, which fans out to the `SubscriberSet`.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{ActorState, Event, EventKind};
