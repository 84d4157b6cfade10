//! Typed identifiers for agents, vertices and edges.
//!
//! The wrapped integer is `pub`: per-vertex and per-edge state lives in
//! `Vec`s indexed by `id.index()`.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $prefix:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl $name {
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// Roster identity of an agent.  Assigned monotonically; never reused
    /// after the agent is removed.
    pub struct AgentId(u32) => "a";
}

typed_id! {
    /// A vertex of the circulatory network.
    pub struct VertexId(u32) => "v";
}

typed_id! {
    /// A directed vessel edge, in CSR order.
    pub struct EdgeId(u32) => "e";
}

impl VertexId {
    /// Every vertex id of a network with `count` vertices, ascending.
    pub fn all(count: usize) -> impl Iterator<Item = VertexId> {
        (0..count as u32).map(VertexId)
    }
}
