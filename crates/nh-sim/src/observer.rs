//! Hooks for watching a run tick by tick.

use nh_core::Tick;

use crate::{Metrics, VertexSnapshot};

/// Tick-boundary callbacks from [`Simulation::run`][crate::Simulation::run]
/// and [`Simulation::run_ticks`][crate::Simulation::run_ticks].
///
/// Every method defaults to doing nothing.
///
/// ```rust,ignore
/// struct HealthLog;
///
/// impl SimObserver for HealthLog {
///     fn on_tick_end(&mut self, tick: Tick, m: &Metrics) {
///         println!("{tick}: {} hp, {} ill, {} cured", m.hitpoints, m.ill_vertices, m.cured);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Before health is charged for the tick.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with the metrics after it.
    ///
    /// On the tick where global health runs out, `metrics.halted` is set and
    /// no agent ran.
    fn on_tick_end(&mut self, _tick: Tick, _metrics: &Metrics) {}

    /// Called every `config.snapshot_interval_ticks` ticks with the state of
    /// every vertex.
    fn on_snapshot(&mut self, _tick: Tick, _vertices: &[VertexSnapshot]) {}

    /// Called once when `run` returns.
    fn on_sim_end(&mut self, _final_tick: Tick, _metrics: &Metrics) {}
}

/// Ignores every callback.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
