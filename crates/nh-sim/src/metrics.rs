//! Reporting metrics and telemetry views.

use nh_core::{AgentId, Tick, VertexId};
use nh_env::Illness;

/// Per-tick reporting metrics read back by drivers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    /// Ticks completed so far.
    pub tick:         Tick,
    pub hitpoints:    i64,
    pub ill_vertices: usize,
    /// Navigators plus responders on the roster.
    pub live_agents:  usize,
    /// Vertices cured since the start of the run.
    pub cured:        u64,
    /// Remaining energy summed over all navigators.
    pub total_energy: i64,
    pub halted:       bool,
}

/// One vertex as shown to renderers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexSnapshot {
    pub vertex:  VertexId,
    pub heat:    f32,
    pub is_ill:  bool,
    pub illness: Option<Illness>,
    /// Every agent on this vertex, ascending.
    pub agents:  Vec<AgentId>,
}
