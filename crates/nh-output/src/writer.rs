//! The `OutputWriter` trait.

use crate::{OutputResult, TickMetricsRow, VertexSnapshotRow};

/// A destination for metrics and snapshot rows.
///
/// The observer never sees these errors directly; they are stored and
/// retrieved with [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one row of per-tick metrics.
    fn write_metrics(&mut self, row: &TickMetricsRow) -> OutputResult<()>;

    /// Write a batch of vertex rows taken at the same tick.
    fn write_snapshot(&mut self, rows: &[VertexSnapshotRow]) -> OutputResult<()>;

    /// Flush every underlying file.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
