//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use pf_core::Tick;
use pf_sim::{FlowSample, MetricsSnapshot, SimObserver};

use crate::row::{FlowSampleRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes tick summaries and flow samples to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After the run returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:        W,
    summary_every: u64,
    last_error:    Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Observer that writes a summary row for every tick.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            summary_every: 1,
            last_error:    None,
        }
    }

    /// Only write a summary row every `n` ticks (`0` disables summaries).
    /// Flow samples are always written.
    pub fn with_summary_every(mut self, n: u64) -> Self {
        self.summary_every = n;
        self
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, snapshot: &MetricsSnapshot) {
        if self.summary_every == 0 || !tick.0.is_multiple_of(self.summary_every) {
            return;
        }
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(snapshot));
        self.store_err(result);
    }

    fn on_flow_sample(&mut self, sample: &FlowSample) {
        let result = self.writer.write_flow_sample(&FlowSampleRow::from(sample));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_snapshot: &MetricsSnapshot) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
