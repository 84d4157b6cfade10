//! Flat row types written by output backends.

use nh_core::Tick;
use nh_sim::{Metrics, VertexSnapshot};

/// [`Metrics`] flattened to plain columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickMetricsRow {
    pub tick:         u64,
    pub hitpoints:    i64,
    pub ill_vertices: u64,
    pub live_agents:  u64,
    pub cured:        u64,
    pub total_energy: i64,
    pub halted:       bool,
}

impl From<&Metrics> for TickMetricsRow {
    fn from(m: &Metrics) -> Self {
        Self {
            tick:         m.tick.0,
            hitpoints:    m.hitpoints,
            ill_vertices: m.ill_vertices as u64,
            live_agents:  m.live_agents as u64,
            cured:        m.cured,
            total_energy: m.total_energy,
            halted:       m.halted,
        }
    }
}

/// One vertex at one snapshot tick.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexSnapshotRow {
    pub tick:        u64,
    pub vertex:      u32,
    pub heat:        f32,
    pub is_ill:      bool,
    /// Empty when the vertex is healthy.
    pub illness:     String,
    pub agent_count: u32,
}

impl VertexSnapshotRow {
    pub fn new(tick: Tick, v: &VertexSnapshot) -> Self {
        Self {
            tick:        tick.0,
            vertex:      v.vertex.0,
            heat:        v.heat,
            is_ill:      v.is_ill,
            illness:     v.illness.as_ref().map(|i| i.as_str().to_owned()).unwrap_or_default(),
            agent_count: v.agents.len() as u32,
        }
    }
}
