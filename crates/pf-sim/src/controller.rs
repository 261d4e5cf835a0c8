//! Real-time orchestration: the start / stop / reset lifecycle.
//!
//! ```text
//!            start()                  stop()
//!   Idle ──────────────▶ Running ──────────────▶ Stopped
//!    ▲                     │  ▲                     │
//!    │       reset()       │  └──────── start() ────┘
//!    └─────────────────────┴──────── reset() ───────┘
//! ```
//!
//! # Locking
//!
//! Three locks, always taken in this order and never held across a join:
//!
//! 1. `lifecycle` — state, config, and the scheduler handle.
//! 2. `sim`       — the engine; held by the clock thread for one step.
//! 3. `latest`    — the published snapshot; held only to swap an `Arc`.
//!
//! Subscribers run on the clock thread after `sim` is released, so a
//! subscriber may call any controller method, including `stop` and `reset`.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use log::{debug, info};
use pf_core::{FlowConfig, SubscriberId};

use crate::{MetricsSnapshot, NoopObserver, Scheduler, Sim, SimBuilder, SimError, SimResult, SubscriberList};

// ── SimState ──────────────────────────────────────────────────────────────────

/// Lifecycle state of a [`FlowController`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SimState {
    /// No simulation exists.  Initial state and the state after `reset`.
    #[default]
    Idle,
    /// The clock thread is ticking.
    Running,
    /// Halted with the final state preserved for inspection.
    Stopped,
}

impl fmt::Display for SimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SimState::Idle    => "idle",
            SimState::Running => "running",
            SimState::Stopped => "stopped",
        })
    }
}

/// Builds the [`Sim`] for each run from the controller's current config.
pub type SimFactory = Box<dyn Fn(&FlowConfig) -> SimResult<Sim> + Send + Sync>;

// ── Shared state (clock thread + controller handles) ──────────────────────────

struct Shared {
    sim:         Mutex<Option<Sim>>,
    latest:      Mutex<Arc<MetricsSnapshot>>,
    subscribers: SubscriberList,
    /// Bumped by every start and reset; a tick from an older run is dropped.
    epoch:       AtomicU64,
}

impl Shared {
    fn tick(&self, epoch: u64) -> SimResult<()> {
        let snapshot = {
            let mut sim = lock(&self.sim);
            if self.epoch.load(Ordering::Acquire) != epoch {
                return Ok(());
            }
            let sim = sim
                .as_mut()
                .ok_or_else(|| SimError::Scheduler("tick fired with no simulation".into()))?;
            let snapshot = sim.step(&mut NoopObserver);
            self.publish(Arc::clone(&snapshot));
            snapshot
        };
        self.subscribers.notify(&snapshot);
        Ok(())
    }

    fn publish(&self, snapshot: Arc<MetricsSnapshot>) {
        *lock(&self.latest) = snapshot;
    }
}

struct Lifecycle {
    state:     SimState,
    config:    FlowConfig,
    scheduler: Option<Scheduler>,
}

// ── FlowController ────────────────────────────────────────────────────────────

/// Owns one simulation and drives it in real time.
///
/// Cloning yields another handle to the same simulation.  The clock thread
/// stops when the last handle is dropped, or earlier on `stop` / `reset`.
///
/// Subscribers that need to control the simulation should capture a
/// [`WeakFlowController`]: a strong handle stored inside a subscriber keeps
/// the controller alive from its own clock thread.
#[derive(Clone)]
pub struct FlowController {
    lifecycle: Arc<Mutex<Lifecycle>>,
    shared:    Arc<Shared>,
    factory:   Arc<SimFactory>,
}

impl FlowController {
    /// Controller in `Idle` that builds runs with [`SimBuilder`] defaults.
    pub fn new(config: FlowConfig) -> Self {
        Self::with_factory(config, |cfg: &FlowConfig| SimBuilder::new(cfg.clone()).build())
    }

    /// Controller whose runs are built by `factory`, e.g. to inject a custom
    /// zone graph or arrival process.
    pub fn with_factory<F>(config: FlowConfig, factory: F) -> Self
    where
        F: Fn(&FlowConfig) -> SimResult<Sim> + Send + Sync + 'static,
    {
        let factory: SimFactory = Box::new(factory);
        Self {
            lifecycle: Arc::new(Mutex::new(Lifecycle {
                state: SimState::Idle,
                config,
                scheduler: None,
            })),
            shared: Arc::new(Shared {
                sim:         Mutex::new(None),
                latest:      Mutex::new(Arc::new(MetricsSnapshot::empty())),
                subscribers: SubscriberList::new(),
                epoch:       AtomicU64::new(0),
            }),
            factory: Arc::new(factory),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Begin a fresh run.
    ///
    /// From `Idle` or `Stopped`: validates the config, discards any previous
    /// run, and starts the clock.  An invalid config changes nothing.  From
    /// `Running` this is a no-op.
    pub fn start(&self) -> SimResult<()> {
        let mut lc = lock(&self.lifecycle);
        if lc.state == SimState::Running {
            debug!("start ignored: already running");
            return Ok(());
        }

        lc.config.validate()?;
        let sim = (self.factory)(&lc.config)?;

        let epoch = self.shared.epoch.fetch_add(1, Ordering::AcqRel) + 1;
        *lock(&self.shared.sim) = Some(sim);
        self.shared.publish(Arc::new(MetricsSnapshot::empty()));

        let shared = Arc::clone(&self.shared);
        let scheduler = match Scheduler::start(lc.config.tick_interval(), move || shared.tick(epoch)) {
            Ok(s) => s,
            Err(e) => {
                *lock(&self.shared.sim) = None;
                return Err(e);
            }
        };
        lc.scheduler = Some(scheduler);
        let from = lc.state;
        lc.state = SimState::Running;
        info!(
            "simulation started from {from}: {} passengers/min, {} ms ticks",
            lc.config.arrival_rate_per_min, lc.config.tick_interval_ms
        );
        Ok(())
    }

    /// Halt the clock, keeping the current state for inspection.
    ///
    /// Only valid while `Running`; otherwise returns
    /// [`SimError::InvalidTransition`] and changes nothing.  Called from
    /// another thread it returns after the in-flight tick; called from a
    /// subscriber the current tick is the last one.
    pub fn stop(&self) -> SimResult<()> {
        let scheduler = {
            let mut lc = lock(&self.lifecycle);
            if lc.state != SimState::Running {
                return Err(SimError::InvalidTransition { from: lc.state, op: "stop" });
            }
            lc.state = SimState::Stopped;
            lc.scheduler.take()
        };
        if let Some(mut scheduler) = scheduler {
            scheduler.stop();
        }
        let snap = self.snapshot();
        info!("simulation stopped at {} ({} processed)", snap.elapsed_label(), snap.total_processed);
        Ok(())
    }

    /// Stop if running, discard all state, and return to `Idle`.
    ///
    /// Idempotent.  Once it returns no tick from the discarded run mutates
    /// state or publishes a snapshot.
    pub fn reset(&self) {
        let scheduler = {
            let mut lc = lock(&self.lifecycle);
            let from = lc.state;
            lc.state = SimState::Idle;
            self.shared.epoch.fetch_add(1, Ordering::AcqRel);
            *lock(&self.shared.sim) = None;
            self.shared.publish(Arc::new(MetricsSnapshot::empty()));
            if from == SimState::Idle {
                debug!("reset: already idle");
            } else {
                info!("simulation reset from {from}");
            }
            lc.scheduler.take()
        };
        if let Some(mut scheduler) = scheduler {
            scheduler.stop();
        }
    }

    // ── Configuration ─────────────────────────────────────────────────────

    /// Replace the configuration used by the next `start`.  Rejected while
    /// `Running`.  Validation happens at `start`.
    pub fn set_config(&self, config: FlowConfig) -> SimResult<()> {
        let mut lc = lock(&self.lifecycle);
        if lc.state == SimState::Running {
            return Err(SimError::InvalidTransition { from: lc.state, op: "change config" });
        }
        lc.config = config;
        Ok(())
    }

    pub fn config(&self) -> FlowConfig {
        lock(&self.lifecycle).config.clone()
    }

    // ── Observation ───────────────────────────────────────────────────────

    pub fn state(&self) -> SimState {
        lock(&self.lifecycle).state
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> Arc<MetricsSnapshot> {
        Arc::clone(&lock(&self.shared.latest))
    }

    /// Read the full simulation state.  `None` while `Idle`.
    ///
    /// `f` runs with the simulation locked, so the clock thread waits for
    /// it while running; prefer [`snapshot`](Self::snapshot) for periodic
    /// reads.  `f` must not call back into the controller: `start`, `stop`,
    /// `reset`, `config` or `state` from inside it deadlock.
    pub fn inspect<R>(&self, f: impl FnOnce(&Sim) -> R) -> Option<R> {
        lock(&self.shared.sim).as_ref().map(f)
    }

    /// Register `callback` to receive every tick's snapshot, on the clock
    /// thread, in registration order.
    pub fn subscribe<F>(&self, callback: F) -> SubscriberId
    where
        F: Fn(&MetricsSnapshot) + Send + Sync + 'static,
    {
        self.shared.subscribers.subscribe(callback)
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.shared.subscribers.unsubscribe(id)
    }

    /// A handle that does not keep the controller alive.
    pub fn downgrade(&self) -> WeakFlowController {
        WeakFlowController {
            lifecycle: Arc::downgrade(&self.lifecycle),
            shared:    Arc::downgrade(&self.shared),
            factory:   Arc::downgrade(&self.factory),
        }
    }
}

// ── WeakFlowController ────────────────────────────────────────────────────────

/// Non-owning [`FlowController`] handle.
#[derive(Clone)]
pub struct WeakFlowController {
    lifecycle: Weak<Mutex<Lifecycle>>,
    shared:    Weak<Shared>,
    factory:   Weak<SimFactory>,
}

impl WeakFlowController {
    /// `None` once every strong handle has been dropped.
    pub fn upgrade(&self) -> Option<FlowController> {
        Some(FlowController {
            lifecycle: self.lifecycle.upgrade()?,
            shared:    self.shared.upgrade()?,
            factory:   self.factory.upgrade()?,
        })
    }
}

/// Lock, recovering the data if a panicking tick poisoned the mutex.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
