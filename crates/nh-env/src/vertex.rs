//! Per-vertex illness and heat state.

use nh_core::VertexId;

use crate::Illness;

/// Heat of an ill vertex.
pub const HEAT_ILL: f32 = 1.0;
/// Heat of a healthy vertex next to an ill one.
pub const HEAT_NEAR_ILL: f32 = 0.5;
/// Heat of a healthy vertex with no ill neighbour.
pub const HEAT_CLEAR: f32 = 0.0;

/// Mutable state of one vertex, owned by the environment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexState {
    pub is_ill:  bool,
    /// `Some` exactly when `is_ill`.
    pub illness: Option<Illness>,
    /// Inflammation signal in `[0, 1]`; see the crate-level heat table.
    pub heat:    f32,
}

/// Read-only copy of one vertex for snapshots and telemetry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexView {
    pub vertex:  VertexId,
    pub is_ill:  bool,
    pub illness: Option<Illness>,
    pub heat:    f32,
}
