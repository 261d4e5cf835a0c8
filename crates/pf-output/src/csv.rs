//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `tick_summaries.csv`
//! - `flow_samples.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{FlowSampleRow, OutputResult, TickSummaryRow};

pub const TICK_SUMMARY_HEADER: [&str; 11] = [
    "tick",
    "elapsed_secs",
    "check_in",
    "security",
    "gate",
    "boarding",
    "active",
    "total_created",
    "total_processed",
    "faults",
    "throughput_per_minute",
];

pub const FLOW_SAMPLE_HEADER: [&str; 2] = ["elapsed_secs", "processed"];

/// Writes run output to two CSV files.
pub struct CsvWriter {
    summaries: Writer<File>,
    samples:   Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(TICK_SUMMARY_HEADER)?;

        let mut samples = Writer::from_path(dir.join("flow_samples.csv"))?;
        samples.write_record(FLOW_SAMPLE_HEADER)?;

        Ok(Self {
            summaries,
            samples,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            format!("{:.3}", row.elapsed_secs),
            row.check_in.to_string(),
            row.security.to_string(),
            row.gate.to_string(),
            row.boarding.to_string(),
            row.active.to_string(),
            row.total_created.to_string(),
            row.total_processed.to_string(),
            row.faults.to_string(),
            format!("{:.3}", row.throughput_per_minute),
        ])?;
        Ok(())
    }

    fn write_flow_sample(&mut self, row: &FlowSampleRow) -> OutputResult<()> {
        self.samples.write_record(&[
            format!("{:.3}", row.elapsed_secs),
            row.processed.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.samples.flush()?;
        Ok(())
    }
}
