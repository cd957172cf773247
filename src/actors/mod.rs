//! # Actor abstractions and built-in actors.
//!
//! This module provides the actor-related types:
//! - [`Actor`] - trait for long-lived, interruptible units of work
//! - [`ActorFn`] - closure-backed actor (`run` + `interrupt`)
//! - [`ActorRef`] - shared reference to an actor (`Arc<dyn Actor>`)
//! - [`ActorSpec`] - actor plus its shutdown budget
//! - [`Interrupt`] - triggering error and shutdown context delivered on interrupt
//!
//! Built-in actors:
//! - [`SignalActor`] - returns on the process interrupt signal
//! - [`RuntimeActor`] - drives an external [`ServiceRuntime`](crate::ServiceRuntime)
//! - [`DebugActor`] - serves the debug/health endpoints

mod actor;
mod actor_fn;
mod debug;
mod runtime;
mod signal;
mod spec;

pub use actor::{Actor, ActorRef, Interrupt};
pub use actor_fn::ActorFn;
pub use debug::DebugActor;
pub use runtime::RuntimeActor;
pub use signal::SignalActor;
pub use spec::ActorSpec;
