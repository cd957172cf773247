//! # ActorGroup: run actors together, stop them together.
//!
//! [`ActorGroup`] owns an ordered list of [`ActorSpec`]s and runs every actor's `run`
//! concurrently. The first `run` to return, with or without an error, triggers an
//! interrupt of **every** actor (the returning one included). The group then waits
//! for all remaining `run`s and returns the triggering result.
//!
//! ## Lifecycle
//! ```text
//! run(self)
//!   ├─► spawn listener: Bus ─► SubscriberSet
//!   ├─► spawn run_actor(spec) for each spec ─► JoinSet
//!   ├─► first join ─► (origin, cause)
//!   ├─► publish GroupStopping
//!   ├─► for spec in specs (registration order): interrupt_actor(spec, cause)
//!   ├─► join the rest (later errors are logged and discarded)
//!   ├─► publish GroupStopped
//!   └─► drop Bus ─► listener drains subscribers ─► return cause
//! ```
//!
//! ## Rules
//! - `run` consumes the group: no registration after start, no second run.
//! - Each actor is interrupted **exactly once**, sequentially, in registration order.
//! - Interrupt errors never replace the triggering result.
//! - An empty group returns `Ok(())` immediately.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use storagevisor::{ActorError, ActorGroup, GroupConfig, Interrupt, ShutdownError};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let stop = CancellationToken::new();
//! let (run_stop, int_stop) = (stop.clone(), stop);
//!
//! let mut group = ActorGroup::new(GroupConfig::default());
//! group
//!     .add_fn(
//!         "short",
//!         || async {
//!             tokio::time::sleep(Duration::from_millis(10)).await;
//!             Ok::<(), ActorError>(())
//!         },
//!         |_: Interrupt| async { Ok::<(), ShutdownError>(()) },
//!     )
//!     .add_fn(
//!         "blocking",
//!         move || {
//!             let stop = run_stop.clone();
//!             async move {
//!                 stop.cancelled().await;
//!                 Ok::<(), ActorError>(())
//!             }
//!         },
//!         move |_: Interrupt| {
//!             let stop = int_stop.clone();
//!             async move {
//!                 stop.cancel();
//!                 Ok::<(), ShutdownError>(())
//!             }
//!         },
//!     );
//!
//! assert!(group.run().await.is_ok());
//! # }
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use tokio::{
    sync::broadcast::error::RecvError,
    task::{JoinError, JoinHandle, JoinSet},
};

use crate::{
    actors::{ActorFn, ActorRef, ActorSpec, Interrupt},
    config::GroupConfig,
    error::{ActorError, ShutdownError},
    events::{Bus, Event, EventKind},
    subscribers::{Subscribe, SubscriberSet},
};

use super::{builder::ActorGroupBuilder, runner};

/// Ordered set of actors that run and stop as a unit.
pub struct ActorGroup {
    cfg: GroupConfig,
    actors: Vec<ActorSpec>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl ActorGroup {
    /// Creates an empty group without subscribers.
    pub fn new(cfg: GroupConfig) -> Self {
        Self::new_internal(cfg, Vec::new())
    }

    /// Returns a builder for a group with subscribers.
    pub fn builder(cfg: GroupConfig) -> ActorGroupBuilder {
        ActorGroupBuilder::new(cfg)
    }

    pub(crate) fn new_internal(cfg: GroupConfig, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        Self {
            cfg,
            actors: Vec::new(),
            subscribers,
        }
    }

    /// Registers an actor with an explicit spec.
    pub fn add(&mut self, spec: ActorSpec) -> &mut Self {
        self.actors.push(spec);
        self
    }

    /// Registers an actor with the group's default shutdown budget.
    pub fn add_actor(&mut self, actor: ActorRef) -> &mut Self {
        let spec = ActorSpec::with_defaults(actor, &self.cfg);
        self.add(spec)
    }

    /// Registers a `(run, interrupt)` pair as an actor.
    pub fn add_fn<R, RFut, I, IFut>(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        run: R,
        interrupt: I,
    ) -> &mut Self
    where
        R: Fn() -> RFut + Send + Sync + 'static,
        RFut: Future<Output = Result<(), ActorError>> + Send + 'static,
        I: Fn(Interrupt) -> IFut + Send + Sync + 'static,
        IFut: Future<Output = Result<(), ShutdownError>> + Send + 'static,
    {
        self.add_actor(ActorFn::arc(name, run, interrupt))
    }

    /// Number of registered actors.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// True if no actor has been registered.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Runs every actor and blocks until all of them have returned.
    ///
    /// Returns the result of the first actor to return.
    pub async fn run(self) -> Result<(), ActorError> {
        let Self {
            cfg,
            actors,
            subscribers,
        } = self;
        if actors.is_empty() {
            return Ok(());
        }

        let bus = Bus::new(cfg.bus_capacity_clamped());
        let listener = spawn_listener(&bus, subscribers);

        let outcome = drive(&actors, &bus).await;

        let mut ev = Event::new(EventKind::GroupStopped);
        if let Err(e) = &outcome {
            ev = ev.with_reason(e.to_string());
        }
        bus.publish(ev);

        drop(bus);
        let _ = listener.await;
        outcome
    }
}

/// Forwards bus events to the subscriber set until every publisher is gone.
fn spawn_listener(bus: &Bus, subscribers: Vec<Arc<dyn Subscribe>>) -> JoinHandle<()> {
    let mut rx = bus.subscribe();
    let set = SubscriberSet::new(subscribers);

    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(ev) => set.emit(&ev),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event listener lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
        set.shutdown().await;
    })
}

async fn drive(actors: &[ActorSpec], bus: &Bus) -> Result<(), ActorError> {
    let mut set = JoinSet::new();
    for (idx, spec) in actors.iter().enumerate() {
        let actor = Arc::clone(spec.actor());
        let bus = bus.clone();
        set.spawn(async move { (idx, runner::run_actor(actor, bus).await) });
    }

    let (origin, cause) = match set.join_next().await {
        Some(joined) => settle(joined),
        None => return Ok(()),
    };

    let mut ev = Event::new(EventKind::GroupStopping);
    if let Some(idx) = origin {
        ev = ev.with_actor(actors[idx].name());
    }
    if let Some(e) = &cause {
        ev = ev.with_reason(e.to_string());
    }
    bus.publish(ev);

    for spec in actors {
        runner::interrupt_actor(spec, cause.clone(), bus).await;
    }

    while let Some(joined) = set.join_next().await {
        let (idx, res) = settle(joined);
        if let Some(e) = res {
            tracing::debug!(
                actor = idx.map(|i| actors[i].name()),
                err = %e,
                "actor error after shutdown began"
            );
        }
    }

    match cause {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Splits a join result into the actor index (if known) and its error (if any).
fn settle(
    joined: Result<(usize, Result<(), ActorError>), JoinError>,
) -> (Option<usize>, Option<ActorError>) {
    match joined {
        Ok((idx, res)) => (Some(idx), res.err()),
        Err(_) => (None, Some(ActorError::Aborted)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::time::Instant;
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::{actors::SignalActor, context::Context, signals::ManualSignal};

    #[derive(Default)]
    struct Probe {
        interrupts: AtomicUsize,
        stopped: AtomicBool,
    }

    impl Probe {
        fn interrupts(&self) -> usize {
            self.interrupts.load(Ordering::SeqCst)
        }
        fn stopped(&self) -> bool {
            self.stopped.load(Ordering::SeqCst)
        }
    }

    /// Blocks until interrupted, then returns `result` after `linger`.
    fn blocking(
        name: &'static str,
        probe: Arc<Probe>,
        linger: Duration,
        result: Result<(), ActorError>,
    ) -> ActorRef {
        let stop = CancellationToken::new();
        let (run_stop, int_stop) = (stop.clone(), stop);
        let (run_probe, int_probe) = (probe.clone(), probe);

        ActorFn::arc(
            name,
            move || {
                let stop = run_stop.clone();
                let probe = run_probe.clone();
                let result = result.clone();
                async move {
                    stop.cancelled().await;
                    tokio::time::sleep(linger).await;
                    probe.stopped.store(true, Ordering::SeqCst);
                    result
                }
            },
            move |_: Interrupt| {
                let stop = int_stop.clone();
                let probe = int_probe.clone();
                async move {
                    probe.interrupts.fetch_add(1, Ordering::SeqCst);
                    stop.cancel();
                    Ok::<(), ShutdownError>(())
                }
            },
        )
    }

    /// Returns `result` on its own after `after`.
    fn finishing(
        name: &'static str,
        probe: Arc<Probe>,
        after: Duration,
        result: Result<(), ActorError>,
    ) -> ActorRef {
        let (run_probe, int_probe) = (probe.clone(), probe);
        ActorFn::arc(
            name,
            move || {
                let probe = run_probe.clone();
                let result = result.clone();
                async move {
                    tokio::time::sleep(after).await;
                    probe.stopped.store(true, Ordering::SeqCst);
                    result
                }
            },
            move |_: Interrupt| {
                let probe = int_probe.clone();
                async move {
                    probe.interrupts.fetch_add(1, Ordering::SeqCst);
                    Ok::<(), ShutdownError>(())
                }
            },
        )
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Event>>);

    impl Recorder {
        fn events(&self) -> Vec<Event> {
            self.0.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Subscribe for Recorder {
        async fn on_event(&self, event: &Event) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    #[tokio::test]
    async fn clean_exit_interrupts_every_actor() {
        let (a, b) = (Arc::new(Probe::default()), Arc::new(Probe::default()));
        let mut group = ActorGroup::new(GroupConfig::default());
        group
            .add_actor(finishing("a", a.clone(), Duration::from_millis(10), Ok(())))
            .add_actor(blocking("b", b.clone(), Duration::ZERO, Ok(())));

        let started = Instant::now();
        group.run().await.unwrap();

        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(a.interrupts(), 1);
        assert_eq!(b.interrupts(), 1);
        assert!(b.stopped());
    }

    #[tokio::test]
    async fn first_error_is_returned() {
        let (a, b) = (Arc::new(Probe::default()), Arc::new(Probe::default()));
        let mut group = ActorGroup::new(GroupConfig::default());
        group
            .add_actor(finishing(
                "a",
                a,
                Duration::from_millis(5),
                Err(ActorError::fail("boom")),
            ))
            .add_actor(blocking("b", b.clone(), Duration::ZERO, Ok(())));

        let err = group.run().await.unwrap_err();
        assert_eq!(err.to_string(), ActorError::fail("boom").to_string());
        assert_eq!(b.interrupts(), 1);
        assert!(b.stopped());
    }

    #[tokio::test]
    async fn later_errors_do_not_override_the_trigger() {
        let (a, b) = (Arc::new(Probe::default()), Arc::new(Probe::default()));
        let mut group = ActorGroup::new(GroupConfig::default());
        group
            .add_actor(finishing("a", a, Duration::from_millis(5), Ok(())))
            .add_actor(blocking(
                "b",
                b.clone(),
                Duration::ZERO,
                Err(ActorError::fail("late")),
            ));
        assert!(group.run().await.is_ok());

        let (a, b) = (Arc::new(Probe::default()), Arc::new(Probe::default()));
        let mut group = ActorGroup::new(GroupConfig::default());
        group
            .add_actor(finishing(
                "a",
                a,
                Duration::from_millis(5),
                Err(ActorError::fail("first")),
            ))
            .add_actor(blocking(
                "b",
                b,
                Duration::ZERO,
                Err(ActorError::fail("second")),
            ));
        let err = group.run().await.unwrap_err();
        assert_eq!(err.to_string(), ActorError::fail("first").to_string());
    }

    #[tokio::test]
    async fn run_waits_for_every_actor() {
        let (a, b) = (Arc::new(Probe::default()), Arc::new(Probe::default()));
        let mut group = ActorGroup::new(GroupConfig::default());
        group
            .add_actor(finishing("a", a, Duration::from_millis(5), Ok(())))
            .add_actor(blocking("b", b.clone(), Duration::from_millis(100), Ok(())));

        group.run().await.unwrap();
        assert!(b.stopped());
    }

    #[tokio::test]
    async fn interrupt_signal_stops_the_group_cleanly() {
        let shared = Context::background();
        let signal = ManualSignal::new();
        let (a, b) = (Arc::new(Probe::default()), Arc::new(Probe::default()));

        let mut group = ActorGroup::new(GroupConfig::default());
        group
            .add_actor(blocking("a", a.clone(), Duration::ZERO, Ok(())))
            .add_actor(blocking("b", b.clone(), Duration::ZERO, Ok(())))
            .add_actor(Arc::new(SignalActor::with_source(
                signal.clone(),
                shared.clone(),
            )));

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            signal.fire();
        });

        group.run().await.unwrap();
        assert_eq!(a.interrupts(), 1);
        assert_eq!(b.interrupts(), 1);
        assert!(shared.is_done());
    }

    #[tokio::test]
    async fn empty_group_returns_immediately() {
        let group = ActorGroup::new(GroupConfig::default());
        assert!(group.is_empty());
        assert!(group.run().await.is_ok());
    }

    #[tokio::test]
    async fn panic_becomes_the_triggering_error() {
        let b = Arc::new(Probe::default());
        let mut group = ActorGroup::new(GroupConfig::default());
        group
            .add_fn(
                "explodes",
                || async {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    if true {
                        panic!("kaboom");
                    }
                    Ok::<(), ActorError>(())
                },
                |_: Interrupt| async { Ok::<(), ShutdownError>(()) },
            )
            .add_actor(blocking("b", b.clone(), Duration::ZERO, Ok(())));

        match group.run().await {
            Err(ActorError::Panicked { actor, info }) => {
                assert_eq!(actor, "explodes");
                assert!(info.contains("kaboom"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(b.interrupts(), 1);
    }

    #[tokio::test]
    async fn interrupt_overrun_is_a_soft_failure() {
        let recorder = Arc::new(Recorder::default());
        let (a, b) = (Arc::new(Probe::default()), Arc::new(Probe::default()));
        let stop = CancellationToken::new();
        let (run_stop, int_stop) = (stop.clone(), stop);

        let slow = ActorFn::arc(
            "slow",
            move || {
                let stop = run_stop.clone();
                async move {
                    stop.cancelled().await;
                    Ok::<(), ActorError>(())
                }
            },
            move |interrupt: Interrupt| {
                let stop = int_stop.clone();
                async move {
                    stop.cancel();
                    Err::<(), ShutdownError>(interrupt.context().done().await.into())
                }
            },
        );

        let subs: Vec<Arc<dyn Subscribe>> = vec![recorder.clone()];
        let mut group = ActorGroup::builder(GroupConfig::default())
            .with_subscribers(subs)
            .build();
        group
            .add_actor(finishing(
                "a",
                a,
                Duration::from_millis(5),
                Err(ActorError::fail("boom")),
            ))
            .add(ActorSpec::new(slow, Some(Duration::from_millis(50))))
            .add_actor(blocking("b", b.clone(), Duration::ZERO, Ok(())));

        let err = group.run().await.unwrap_err();
        assert_eq!(err.to_string(), ActorError::fail("boom").to_string());
        assert_eq!(b.interrupts(), 1);

        let failed: Vec<_> = recorder
            .events()
            .into_iter()
            .filter(|e| e.kind == EventKind::InterruptFailed)
            .collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].actor.as_deref(), Some("slow"));
        assert_eq!(failed[0].budget_ms, Some(50));
    }

    #[tokio::test]
    async fn subscribers_see_each_interrupt_exactly_once() {
        let recorder = Arc::new(Recorder::default());
        let (a, b) = (Arc::new(Probe::default()), Arc::new(Probe::default()));

        let subs: Vec<Arc<dyn Subscribe>> = vec![recorder.clone()];
        let mut group = ActorGroup::builder(GroupConfig::default())
            .with_subscribers(subs)
            .build();
        group
            .add_actor(finishing("a", a, Duration::from_millis(5), Ok(())))
            .add_actor(blocking("b", b, Duration::ZERO, Ok(())));
        assert_eq!(group.len(), 2);
        group.run().await.unwrap();

        let events = recorder.events();
        let requested: Vec<_> = events
            .iter()
            .filter(|e| e.kind == EventKind::InterruptRequested)
            .filter_map(|e| e.actor.as_deref())
            .collect();
        assert_eq!(requested, ["a", "b"]);

        let stopping = events
            .iter()
            .find(|e| e.kind == EventKind::GroupStopping)
            .unwrap();
        assert_eq!(stopping.actor.as_deref(), Some("a"));
        assert_eq!(events.last().map(|e| e.kind), Some(EventKind::GroupStopped));
    }
}
