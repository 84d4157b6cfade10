//! Vessel flow classes and their energy costs.
//!
//! Every directed vessel either runs with the circulation (cheap to travel,
//! and lets a navigator recharge) or against it (expensive).  Graph
//! construction picks the class; the cost is stored per edge so loaders may
//! override it.

/// Default energy cost of a move along the circulation.
pub const WITH_FLOW_COST: u32 = 2;

/// Default energy cost of a move against the circulation.
pub const AGAINST_FLOW_COST: u32 = 4;

/// Direction of a vessel edge relative to the blood flow.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlowClass {
    /// Low-cost edge travelling with the circulation.
    #[default]
    With,
    /// High-cost edge travelling against the circulation.
    Against,
}

impl FlowClass {
    /// Default energy cost for an edge of this class.
    #[inline]
    pub fn default_cost(self) -> u32 {
        match self {
            FlowClass::With    => WITH_FLOW_COST,
            FlowClass::Against => AGAINST_FLOW_COST,
        }
    }

    /// `true` for edges that let a navigator recharge on traversal.
    #[inline]
    pub fn recharges(self) -> bool {
        matches!(self, FlowClass::With)
    }

    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            FlowClass::With    => "with",
            FlowClass::Against => "against",
        }
    }
}

impl std::fmt::Display for FlowClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
