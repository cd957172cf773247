//! Runtime core: the actor group and its per-actor runner.
//!
//! The only public API from this module is [`ActorGroup`] (and its builder), which
//! runs actors concurrently and coordinates their shutdown.
//!
//! Internal modules:
//! - [`runner`]: runs/interrupts one actor with panic isolation and event publishing;
//! - [`group`]: registration, first-exit detection, interrupt broadcast, final join;
//! - [`builder`]: group construction with subscribers.

mod builder;
mod group;
mod runner;

pub use builder::ActorGroupBuilder;
pub use group::ActorGroup;

pub(crate) use runner::panic_message;
