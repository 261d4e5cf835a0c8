//! Integration tests for pf-output.

#[cfg(test)]
mod csv_tests {
    use std::time::Duration;

    use tempfile::TempDir;

    use pf_core::FlowConfig;
    use pf_sim::SimBuilder;

    use crate::csv::{CsvWriter, FLOW_SAMPLE_HEADER, TICK_SUMMARY_HEADER};
    use crate::observer::SimOutputObserver;
    use crate::row::{FlowSampleRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow {
            tick,
            elapsed_secs:          tick as f64 * 0.25,
            check_in:              3,
            security:              2,
            gate:                  1,
            boarding:              0,
            active:                6,
            total_created:         9,
            total_processed:       3,
            faults:                0,
            throughput_per_minute: 1.5,
        }
    }

    fn read_all(path: std::path::PathBuf) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("tick_summaries.csv").exists());
        assert!(dir.path().join("flow_samples.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, TICK_SUMMARY_HEADER);
        assert_eq!(headers[0], "tick");

        let mut rdr2 = csv::Reader::from_path(dir.path().join("flow_samples.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, FLOW_SAMPLE_HEADER);
    }

    #[test]
    fn csv_tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(8)).unwrap();
        w.finish().unwrap();

        let rows = read_all(dir.path().join("tick_summaries.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "8");       // tick
        assert_eq!(&rows[0][1], "2.000");   // elapsed_secs
        assert_eq!(&rows[0][2], "3");       // check_in
        assert_eq!(&rows[0][8], "3");       // total_processed
        assert_eq!(&rows[0][10], "1.500");  // throughput
    }

    #[test]
    fn csv_flow_sample_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_flow_sample(&FlowSampleRow { elapsed_secs: 5.0, processed: 2 }).unwrap();
        w.write_flow_sample(&FlowSampleRow { elapsed_secs: 10.0, processed: 4 }).unwrap();
        w.finish().unwrap();

        let rows = read_all(dir.path().join("flow_samples.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "10.000");
        assert_eq!(&rows[1][1], "4");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // second call should not panic
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        let missing = dir.path().join("does/not/exist");
        assert!(CsvWriter::new(&missing).is_err());
    }

    #[test]
    fn integration_csv() {
        let mut sim = SimBuilder::new(FlowConfig::default()).build().unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        sim.run_for(Duration::from_secs(60), &mut obs);
        assert!(obs.take_error().is_none(), "no write errors expected");

        // 60 s at 250 ms = 240 ticks; one sample every 5 s.
        let summaries = read_all(dir.path().join("tick_summaries.csv"));
        assert_eq!(summaries.len(), 240);
        assert_eq!(&summaries[239][0], "240");

        let samples = read_all(dir.path().join("flow_samples.csv"));
        assert_eq!(samples.len(), 12);
        assert_eq!(&samples[11][0], "60.000");
    }

    #[test]
    fn summary_interval_thins_rows() {
        let mut sim = SimBuilder::new(FlowConfig::default()).build().unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer).with_summary_every(4);
        sim.run_for(Duration::from_secs(10), &mut obs);
        assert!(obs.take_error().is_none());

        // Ticks 0, 4, ..., 36 of 40.
        let summaries = read_all(dir.path().join("tick_summaries.csv"));
        assert_eq!(summaries.len(), 10);
    }
}

// ── Observer error handling ───────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use pf_core::FlowConfig;
    use pf_sim::{NoopObserver, SimBuilder};

    use crate::observer::SimOutputObserver;
    use crate::row::{FlowSampleRow, TickSummaryRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    /// Fails every summary write after the first `ok` ones.
    #[derive(Default)]
    struct FlakyWriter {
        ok:        usize,
        summaries: usize,
        finished:  bool,
    }

    impl OutputWriter for FlakyWriter {
        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            self.summaries += 1;
            if self.summaries > self.ok {
                let msg = format!("disk full at row {}", self.summaries);
                return Err(OutputError::Io(std::io::Error::other(msg)));
            }
            Ok(())
        }
        fn write_flow_sample(&mut self, _row: &FlowSampleRow) -> OutputResult<()> {
            Ok(())
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.finished = true;
            Ok(())
        }
    }

    #[test]
    fn keeps_only_the_first_error() {
        let mut sim = SimBuilder::new(FlowConfig::default()).build().unwrap();
        let mut obs = SimOutputObserver::new(FlakyWriter { ok: 2, ..Default::default() });
        sim.run_until(pf_core::Tick(5), &mut obs);

        let err = obs.take_error().expect("write error stored");
        assert!(err.to_string().contains("row 3"), "{err}");
        assert!(obs.take_error().is_none());

        let writer = obs.into_writer();
        assert_eq!(writer.summaries, 5);
        assert!(writer.finished);
    }

    #[test]
    fn run_ticks_does_not_finish() {
        let mut sim = SimBuilder::new(FlowConfig::default()).build().unwrap();
        let mut obs = SimOutputObserver::new(FlakyWriter { ok: usize::MAX, ..Default::default() });
        sim.run_ticks(3, &mut obs);
        assert!(!obs.writer().finished);
        sim.run_ticks(1, &mut NoopObserver);
        assert_eq!(obs.writer().summaries, 3);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use crate::row::{FlowSampleRow, TickSummaryRow};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow {
            tick,
            elapsed_secs:          tick as f64 * 0.25,
            check_in:              1,
            security:              0,
            gate:                  0,
            boarding:              0,
            active:                1,
            total_created:         1,
            total_processed:       0,
            faults:                0,
            throughput_per_minute: 0.0,
        }
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_tick_summaries() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        for t in 1..=3 {
            w.write_tick_summary(&summary_row(t)).unwrap();
        }
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM tick_summaries", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(count, 3);
        let elapsed: f64 = conn.query_row(
            "SELECT elapsed_secs FROM tick_summaries WHERE tick = 2", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(elapsed, 0.5);
    }

    #[test]
    fn sqlite_duplicate_tick_rejected() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(1)).unwrap();
        assert!(w.write_tick_summary(&summary_row(1)).is_err());
    }

    #[test]
    fn sqlite_flow_samples() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_flow_sample(&FlowSampleRow { elapsed_secs: 5.0, processed: 0 }).unwrap();
        w.write_flow_sample(&FlowSampleRow { elapsed_secs: 10.0, processed: 2 }).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (secs, processed): (f64, i64) = conn.query_row(
            "SELECT elapsed_secs, processed FROM flow_samples ORDER BY elapsed_secs DESC LIMIT 1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        ).unwrap();
        assert_eq!(secs, 10.0);
        assert_eq!(processed, 2);
    }
}
