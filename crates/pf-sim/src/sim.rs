//! The `Sim` struct and its tick loop.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use pf_agent::{PassengerGenerator, PassengerStore};
use pf_core::{FlowConfig, SimClock, Tick};
use pf_mobility::MovementEngine;

use crate::builder::ArrivalFactory;
use crate::metrics::Totals;
use crate::{MetricsAggregator, MetricsSnapshot, SimObserver, SimResult};

/// The deterministic simulation engine.
///
/// `Sim` holds all simulation state and drives the four-phase tick loop:
///
/// 1. **Move**: the movement engine steps every active passenger; those
///    reaching `Complete` are removed and counted processed.
/// 2. **Arrive**: the generator emits every passenger due at or before the
///    start of the tick.  They get their first movement update next tick.
/// 3. **Advance**: the clock moves on by one tick.
/// 4. **Measure**: the aggregator publishes a fresh snapshot.
///
/// `Sim` owns no threads and never sleeps; the same seed and config always
/// produce the same sequence of snapshots.  Create via
/// [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Configuration this run was built from.
    pub config: FlowConfig,

    /// Simulation clock: ticks processed so far and the tick duration.
    pub clock: SimClock,

    /// The active set.
    pub passengers: PassengerStore,

    pub generator: PassengerGenerator,

    /// Movement model plus the zone graph it walks.
    pub engine: MovementEngine,

    pub metrics: MetricsAggregator,

    /// Passengers ever created.  Never decreases within a run.
    pub total_created: u64,

    /// Passengers that reached `Complete`.  Never decreases within a run.
    pub total_processed: u64,

    /// Passenger steps skipped because of a movement fault.
    pub faults: u64,

    pub(crate) arrivals: ArrivalFactory,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Process exactly one tick and return its snapshot.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> Arc<MetricsSnapshot> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        // ── Phase 1: movement ─────────────────────────────────────────────
        let report = self.engine.tick(&mut self.passengers);
        for (id, err) in &report.faults {
            warn!("{now}: skipped {id}: {err}");
        }
        self.faults += report.faults.len() as u64;
        self.total_processed += report.completed as u64;

        // ── Phase 2: arrivals ─────────────────────────────────────────────
        let now_secs = self.clock.ms_at(now) as f64 / 1_000.0;
        let created = self.generator.emit_due(now_secs, now, &mut self.passengers);
        self.total_created += created as u64;

        // ── Phase 3: clock ────────────────────────────────────────────────
        self.clock.advance();

        // ── Phase 4: metrics ──────────────────────────────────────────────
        let totals = self.totals();
        let (snapshot, sample) = self.metrics.record(&self.clock, &self.passengers, totals);
        if let Some(sample) = sample {
            debug!(
                "flow sample at {:.0}s: {} processed",
                sample.elapsed_secs, sample.processed
            );
            observer.on_flow_sample(&sample);
        }
        observer.on_tick_end(now, &snapshot);
        snapshot
    }

    /// Run exactly `n` ticks from the current position.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    /// Run until the clock reaches `end`, then call
    /// [`SimObserver::on_sim_end`].  Does nothing but the end hook if the
    /// clock is already at or past `end`.
    pub fn run_until<O: SimObserver>(&mut self, end: Tick, observer: &mut O) -> Arc<MetricsSnapshot> {
        while self.clock.current_tick < end {
            self.step(observer);
        }
        let last = self.snapshot();
        observer.on_sim_end(&last);
        last
    }

    /// Run for `duration` of simulated time (rounded up to whole ticks).
    pub fn run_for<O: SimObserver>(&mut self, duration: Duration, observer: &mut O) -> Arc<MetricsSnapshot> {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        let ticks = ms.div_ceil(self.clock.tick_duration_ms.max(1));
        let end = self.clock.current_tick.offset(ticks);
        self.run_until(end, observer)
    }

    /// Clear all state and return to tick 0 with a fresh arrival schedule.
    pub fn reset(&mut self) -> SimResult<()> {
        let first = self.engine.graph.first();
        self.generator = PassengerGenerator::new(self.config.entrance, first, (self.arrivals)(&self.config)?);
        self.passengers.clear();
        self.clock.rewind();
        self.metrics.reset();
        self.total_created = 0;
        self.total_processed = 0;
        self.faults = 0;
        Ok(())
    }

    /// Snapshot of the most recent tick (all zero before the first one).
    #[inline]
    pub fn snapshot(&self) -> Arc<MetricsSnapshot> {
        self.metrics.latest()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn totals(&self) -> Totals {
        Totals {
            created:   self.total_created,
            processed: self.total_processed,
            faults:    self.faults,
        }
    }
}
