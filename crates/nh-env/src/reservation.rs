//! Per-tick reservation board for coordinating navigators.
//!
//! When a coordinating navigator picks its next vertex, it claims that vertex
//! for every peer standing on the same vertex this tick.  Claims are keyed by
//! the vertex the agents stand on, so "co-located peers' lists" are one shared
//! set per vertex.  The scheduler clears the whole board at the end of every
//! tick.

use std::collections::BTreeSet;

use nh_core::VertexId;

#[cfg(feature = "fx-hash")]
type ClaimMap<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type ClaimMap<K, V> = std::collections::HashMap<K, V>;

#[derive(Debug, Default)]
pub struct ReservationBoard {
    claims: ClaimMap<VertexId, BTreeSet<VertexId>>,
}

impl ReservationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if an agent at `at` has already claimed `target` this tick.
    pub fn is_reserved(&self, at: VertexId, target: VertexId) -> bool {
        self.claims.get(&at).is_some_and(|s| s.contains(&target))
    }

    /// Vertices claimed by agents standing on `at`, ascending.
    pub fn reserved_from(&self, at: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.claims.get(&at).into_iter().flatten().copied()
    }

    /// Claim `target` for the agents standing on `at`.
    pub fn reserve(&mut self, at: VertexId, target: VertexId) {
        self.claims.entry(at).or_default().insert(target);
    }

    /// Drop every claim made at `at` (fairness reset).
    pub fn reset(&mut self, at: VertexId) {
        self.claims.remove(&at);
    }

    /// Drop every claim on the board.
    pub fn clear(&mut self) {
        self.claims.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.claims.values().all(BTreeSet::is_empty)
    }
}
