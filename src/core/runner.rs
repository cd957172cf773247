//! # Run and interrupt a single actor.
//!
//! ## Event flow
//!
//! ```text
//! run_actor:
//!   publish ActorStarting → actor.run() → Ok  → publish ActorStopped
//!                                       → Err → publish ActorFailed
//!                                       → panic → Err(Panicked) → publish ActorFailed
//!
//! interrupt_actor:
//!   publish InterruptRequested → actor.interrupt(Interrupt) → Ok  → publish InterruptCompleted
//!                                                           → Err → publish InterruptFailed
//! ```
//!
//! ## Rules
//! - Always publishes **exactly one** terminal event per call.
//! - Panics are caught; they never tear down the group.
//! - Interrupt failures are returned to nobody: they are soft and only published.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::{
    actors::{ActorRef, ActorSpec, Interrupt},
    error::{ActorError, ShutdownError},
    events::{Bus, Event, EventKind},
};

/// Runs `actor` to completion, publishing lifecycle events to `bus`.
pub(crate) async fn run_actor(actor: ActorRef, bus: Bus) -> Result<(), ActorError> {
    bus.publish(Event::new(EventKind::ActorStarting).with_actor(actor.name()));

    let res = match AssertUnwindSafe(actor.run()).catch_unwind().await {
        Ok(res) => res,
        Err(panic) => Err(ActorError::Panicked {
            actor: actor.name().to_string(),
            info: panic_message(panic),
        }),
    };

    match &res {
        Ok(()) => bus.publish(Event::new(EventKind::ActorStopped).with_actor(actor.name())),
        Err(e) => bus.publish(
            Event::new(EventKind::ActorFailed)
                .with_actor(actor.name())
                .with_reason(e.to_string()),
        ),
    }
    res
}

/// Delivers one interrupt to the actor described by `spec`.
///
/// The interrupt context is bounded by the actor's shutdown budget; the actor is
/// expected to honor it.
pub(crate) async fn interrupt_actor(spec: &ActorSpec, cause: Option<ActorError>, bus: &Bus) {
    let budget = spec.shutdown_budget();
    bus.publish(with_budget(
        Event::new(EventKind::InterruptRequested).with_actor(spec.name()),
        budget,
    ));

    let interrupt = Interrupt::new(cause, spec.shutdown_context());
    let res = match AssertUnwindSafe(spec.actor().interrupt(interrupt))
        .catch_unwind()
        .await
    {
        Ok(res) => res,
        Err(panic) => Err(ShutdownError::Failed {
            error: format!("interrupt panicked: {}", panic_message(panic)),
        }),
    };

    match res {
        Ok(()) => {
            bus.publish(Event::new(EventKind::InterruptCompleted).with_actor(spec.name()));
        }
        Err(e) => {
            let e = match e {
                ShutdownError::DeadlineExceeded { budget: None } => {
                    ShutdownError::DeadlineExceeded { budget }
                }
                e => e,
            };
            bus.publish(with_budget(
                Event::new(EventKind::InterruptFailed)
                    .with_actor(spec.name())
                    .with_reason(e.to_string()),
                budget,
            ));
        }
    }
}

fn with_budget(ev: Event, budget: Option<std::time::Duration>) -> Event {
    match budget {
        Some(b) => ev.with_budget(b),
        None => ev,
    }
}

/// Renders a panic payload as text.
pub(crate) fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
