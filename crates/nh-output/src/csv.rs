//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `tick_metrics.csv`
//! - `vertex_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use tracing::debug;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickMetricsRow, VertexSnapshotRow};

pub const METRICS_FILE: &str = "tick_metrics.csv";
pub const SNAPSHOTS_FILE: &str = "vertex_snapshots.csv";

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    metrics:   Writer<File>,
    snapshots: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create (or truncate) the two CSV files in `dir` and write the header
    /// rows.  `dir` must already exist.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut metrics = Writer::from_path(dir.join(METRICS_FILE))?;
        metrics.write_record([
            "tick",
            "hitpoints",
            "ill_vertices",
            "live_agents",
            "cured",
            "total_energy",
            "halted",
        ])?;

        let mut snapshots = Writer::from_path(dir.join(SNAPSHOTS_FILE))?;
        snapshots.write_record(["tick", "vertex", "heat", "ill", "illness", "agent_count"])?;

        debug!(dir = %dir.display(), "csv output opened");
        Ok(Self { metrics, snapshots, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_metrics(&mut self, row: &TickMetricsRow) -> OutputResult<()> {
        self.metrics.write_record(&[
            row.tick.to_string(),
            row.hitpoints.to_string(),
            row.ill_vertices.to_string(),
            row.live_agents.to_string(),
            row.cured.to_string(),
            row.total_energy.to_string(),
            (row.halted as u8).to_string(),
        ])?;
        Ok(())
    }

    fn write_snapshot(&mut self, rows: &[VertexSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.vertex.to_string(),
                row.heat.to_string(),
                (row.is_ill as u8).to_string(),
                row.illness.clone(),
                row.agent_count.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.metrics.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
