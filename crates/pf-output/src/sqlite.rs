//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `tick_summaries` and `flow_samples`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{FlowSampleRow, OutputResult, TickSummaryRow};

/// Writes run output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick                  INTEGER PRIMARY KEY,
                 elapsed_secs          REAL    NOT NULL,
                 check_in              INTEGER NOT NULL,
                 security              INTEGER NOT NULL,
                 gate                  INTEGER NOT NULL,
                 boarding              INTEGER NOT NULL,
                 active                INTEGER NOT NULL,
                 total_created         INTEGER NOT NULL,
                 total_processed       INTEGER NOT NULL,
                 faults                INTEGER NOT NULL,
                 throughput_per_minute REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS flow_samples (
                 elapsed_secs REAL    NOT NULL,
                 processed    INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO tick_summaries \
             (tick, elapsed_secs, check_in, security, gate, boarding, active, \
              total_created, total_processed, faults, throughput_per_minute) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )?;
        stmt.execute(rusqlite::params![
            row.tick,
            row.elapsed_secs,
            row.check_in,
            row.security,
            row.gate,
            row.boarding,
            row.active,
            row.total_created,
            row.total_processed,
            row.faults,
            row.throughput_per_minute,
        ])?;
        Ok(())
    }

    fn write_flow_sample(&mut self, row: &FlowSampleRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO flow_samples (elapsed_secs, processed) VALUES (?1, ?2)",
            rusqlite::params![row.elapsed_secs, row.processed],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
