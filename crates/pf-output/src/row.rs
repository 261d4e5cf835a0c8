//! Plain data row types written by output backends.

use pf_core::Zone;
use pf_sim::{FlowSample, MetricsSnapshot};

/// Metrics after one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:                  u64,
    pub elapsed_secs:          f64,
    pub check_in:              u64,
    pub security:              u64,
    pub gate:                  u64,
    pub boarding:              u64,
    pub active:                u64,
    pub total_created:         u64,
    pub total_processed:       u64,
    pub faults:                u64,
    pub throughput_per_minute: f64,
}

impl From<&MetricsSnapshot> for TickSummaryRow {
    fn from(s: &MetricsSnapshot) -> Self {
        Self {
            tick:                  s.tick.0,
            elapsed_secs:          s.elapsed_secs(),
            check_in:              s.count(Zone::CheckIn) as u64,
            security:              s.count(Zone::Security) as u64,
            gate:                  s.count(Zone::Gate) as u64,
            boarding:              s.count(Zone::Boarding) as u64,
            active:                s.active as u64,
            total_created:         s.total_created,
            total_processed:       s.total_processed,
            faults:                s.faults,
            throughput_per_minute: s.throughput_per_minute,
        }
    }
}

/// One point of the processed-over-time chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowSampleRow {
    pub elapsed_secs: f64,
    pub processed:    u64,
}

impl From<&FlowSample> for FlowSampleRow {
    fn from(s: &FlowSample) -> Self {
        Self { elapsed_secs: s.elapsed_secs, processed: s.processed }
    }
}
