//! Per-tick metrics: immutable snapshots and the processed-over-time series.

use std::sync::Arc;

use pf_agent::PassengerStore;
use pf_core::{FlowConfig, SimClock, Tick, Zone};

// ── MetricsSnapshot ───────────────────────────────────────────────────────────

/// Read-only view of the simulation after one tick.
///
/// Snapshots are shared as `Arc<MetricsSnapshot>` and never mutated after
/// publication, so readers on other threads always see a consistent tick.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricsSnapshot {
    /// Ticks processed so far.
    pub tick:                  Tick,
    pub elapsed_ms:            u64,
    /// Active passengers per zone, in `Zone::PROCESSING` order.
    pub count_by_zone:         [usize; 4],
    pub active:                usize,
    pub total_created:         u64,
    pub total_processed:       u64,
    /// Passenger steps skipped because of a movement fault, cumulative.
    pub faults:                u64,
    pub throughput_per_minute: f64,
}

/// One labelled line of the metrics table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricRow {
    pub name:  &'static str,
    pub value: String,
}

impl MetricsSnapshot {
    /// The state before the first tick: everything zero.
    pub fn empty() -> Self {
        Self {
            tick:                  Tick::ZERO,
            elapsed_ms:            0,
            count_by_zone:         [0; 4],
            active:                0,
            total_created:         0,
            total_processed:       0,
            faults:                0,
            throughput_per_minute: 0.0,
        }
    }

    /// Active passengers currently in `zone`.  `Complete` is always 0.
    pub fn count(&self, zone: Zone) -> usize {
        self.count_by_zone.get(zone.ordinal()).copied().unwrap_or(0)
    }

    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ms as f64 / 1_000.0
    }

    /// Elapsed simulated time as `MM:SS`.
    pub fn elapsed_label(&self) -> String {
        let secs = self.elapsed_ms / 1_000;
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    /// The metrics table shown next to the terminal view.
    pub fn rows(&self) -> Vec<MetricRow> {
        let row = |name, value: String| MetricRow { name, value };
        vec![
            row("Total Passengers", self.total_created.to_string()),
            row("Check-in Queue",   self.count(Zone::CheckIn).to_string()),
            row("Security Queue",   self.count(Zone::Security).to_string()),
            row("Gate Queue",       self.count(Zone::Gate).to_string()),
            row("Boarded",          self.count(Zone::Boarding).to_string()),
            row("Processed",        self.total_processed.to_string()),
            row("Processing Rate",  format!("{:.1} /min", self.throughput_per_minute)),
            row("Simulation Time",  self.elapsed_label()),
        ]
    }
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// `processed / elapsed minutes`, or 0 before any time has elapsed.
pub fn throughput_per_minute(processed: u64, elapsed_secs: f64) -> f64 {
    if elapsed_secs > 0.0 {
        processed as f64 / (elapsed_secs / 60.0)
    } else {
        0.0
    }
}

// ── FlowSeries ────────────────────────────────────────────────────────────────

/// Cumulative processed passengers at one point in simulated time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlowSample {
    pub elapsed_secs: f64,
    pub processed:    u64,
}

/// Samples of processed-over-time, taken at a fixed simulated interval.
#[derive(Clone, Debug, Default)]
pub struct FlowSeries {
    samples: Vec<FlowSample>,
}

impl FlowSeries {
    pub fn samples(&self) -> &[FlowSample] {
        &self.samples
    }

    pub fn last(&self) -> Option<&FlowSample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    fn push(&mut self, sample: FlowSample) {
        self.samples.push(sample);
    }

    fn clear(&mut self) {
        self.samples.clear();
    }
}

// ── MetricsAggregator ─────────────────────────────────────────────────────────

/// Recomputes the snapshot after every tick and maintains the flow series.
pub struct MetricsAggregator {
    latest:             Arc<MetricsSnapshot>,
    series:             FlowSeries,
    sample_interval_ms: u64,
    next_sample_ms:     u64,
}

/// Cumulative counters kept by the engine, passed in once per tick.
#[derive(Copy, Clone, Debug, Default)]
pub struct Totals {
    pub created:   u64,
    pub processed: u64,
    pub faults:    u64,
}

impl MetricsAggregator {
    pub fn new(config: &FlowConfig) -> Self {
        let sample_interval_ms = config.sample_interval_secs.saturating_mul(1_000);
        Self {
            latest: Arc::new(MetricsSnapshot::empty()),
            series: FlowSeries::default(),
            sample_interval_ms,
            next_sample_ms: sample_interval_ms,
        }
    }

    /// Build the snapshot for the state after the tick `clock` just advanced
    /// past.  Returns the flow sample too when this tick crossed a sample
    /// boundary.
    pub fn record(
        &mut self,
        clock:  &SimClock,
        store:  &PassengerStore,
        totals: Totals,
    ) -> (Arc<MetricsSnapshot>, Option<FlowSample>) {
        let elapsed_ms = clock.elapsed_ms();
        let elapsed_secs = clock.elapsed_secs();
        let snapshot = Arc::new(MetricsSnapshot {
            tick: clock.current_tick,
            elapsed_ms,
            count_by_zone: store.counts_by_zone(),
            active: store.len(),
            total_created: totals.created,
            total_processed: totals.processed,
            faults: totals.faults,
            throughput_per_minute: throughput_per_minute(totals.processed, elapsed_secs),
        });
        self.latest = Arc::clone(&snapshot);

        let mut sample = None;
        if self.sample_interval_ms > 0 && elapsed_ms >= self.next_sample_ms {
            let s = FlowSample { elapsed_secs, processed: totals.processed };
            self.series.push(s);
            sample = Some(s);
            while self.next_sample_ms <= elapsed_ms {
                self.next_sample_ms += self.sample_interval_ms;
            }
        }
        (snapshot, sample)
    }

    #[inline]
    pub fn latest(&self) -> Arc<MetricsSnapshot> {
        Arc::clone(&self.latest)
    }

    pub fn series(&self) -> &FlowSeries {
        &self.series
    }

    pub fn reset(&mut self) {
        self.latest = Arc::new(MetricsSnapshot::empty());
        self.series.clear();
        self.next_sample_ms = self.sample_interval_ms;
    }
}
