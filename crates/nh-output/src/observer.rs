//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use nh_core::Tick;
use nh_sim::{Metrics, SimObserver, VertexSnapshot};
use tracing::warn;

use crate::row::{TickMetricsRow, VertexSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes every tick's metrics and every snapshot to
/// an [`OutputWriter`].
///
/// `SimObserver` methods have no return value, so the first write error is
/// kept and later writes still go through.  After `sim.run()` returns,
/// check with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            warn!(error = %e, "output write failed");
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, _tick: Tick, metrics: &Metrics) {
        let result = self.writer.write_metrics(&TickMetricsRow::from(metrics));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, vertices: &[VertexSnapshot]) {
        let rows: Vec<VertexSnapshotRow> =
            vertices.iter().map(|v| VertexSnapshotRow::new(tick, v)).collect();
        if !rows.is_empty() {
            let result = self.writer.write_snapshot(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _metrics: &Metrics) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
