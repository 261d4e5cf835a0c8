//! Simulation observer trait for progress reporting and data collection.

use pf_core::Tick;

use crate::{FlowSample, MetricsSnapshot};

/// Callbacks invoked by [`Sim::step`][crate::Sim::step] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { every: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, snap: &MetricsSnapshot) {
///         if tick.0 % self.every == 0 {
///             println!("{tick}: {} active, {} processed", snap.active, snap.total_processed);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once the tick's snapshot has been computed.
    fn on_tick_end(&mut self, _tick: Tick, _snapshot: &MetricsSnapshot) {}

    /// Called whenever a flow sample is appended to the series.
    fn on_flow_sample(&mut self, _sample: &FlowSample) {}

    /// Called once by [`Sim::run_until`][crate::Sim::run_until] after the
    /// final tick.
    fn on_sim_end(&mut self, _final_snapshot: &MetricsSnapshot) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
