//! `nh-output`: CSV sink for simulation metrics and vertex snapshots.
//!
//! | File                   | One row per                         |
//! |------------------------|-------------------------------------|
//! | `tick_metrics.csv`     | tick (from `on_tick_end`)           |
//! | `vertex_snapshots.csv` | vertex per snapshot (`on_snapshot`) |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `nh_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use nh_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{TickMetricsRow, VertexSnapshotRow};
pub use writer::OutputWriter;
