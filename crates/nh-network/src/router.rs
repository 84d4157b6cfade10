//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The environment calls routing through the [`Router`] trait, so drivers can
//! swap in another implementation without touching the agents.
//!
//! # Cost and tie-breaking
//!
//! A path's `cost` is the sum of its edge costs, each pair priced by its
//! first parallel edge.  [`Router::shortest_paths`] returns **every** path of
//! minimum cost; choosing among them is the caller's business.
//! [`Router::best_path`] applies the navigators' rule: minimise
//! `vertex count + cost`, keeping the first candidate on ties.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use nh_core::{EdgeId, VertexId};

use crate::network::VesselNetwork;
use crate::{NetworkError, NetworkResult};

/// Upper bound on how many equal-cost paths one query enumerates.
pub const MAX_SHORTEST_PATHS: usize = 1_024;

// ── Path ──────────────────────────────────────────────────────────────────────

/// One route through the network, source first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    /// Visited vertices from source to target inclusive.
    pub vertices: Vec<VertexId>,
    /// Traversed edges; `edges.len() == vertices.len() - 1`.
    pub edges: Vec<EdgeId>,
    /// Sum of edge costs.
    pub cost: u32,
}

impl Path {
    /// The zero-length path that stays at `v`.
    pub fn trivial(v: VertexId) -> Self {
        Self { vertices: vec![v], edges: vec![], cost: 0 }
    }

    /// `true` if the source and target are the same vertex.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    /// The vertex one hop along the path, `None` for a trivial path.
    pub fn next_hop(&self) -> Option<VertexId> {
        self.vertices.get(1).copied()
    }

    /// Selection metric used by navigators: path length plus energy cost.
    pub fn combined_cost(&self) -> u64 {
        self.vertices.len() as u64 + self.cost as u64
    }
}

/// Pick the path with the lowest [`Path::combined_cost`], first on ties.
pub fn select_best(paths: Vec<Path>) -> Option<Path> {
    // `min_by_key` returns the first minimum.
    paths.into_iter().min_by_key(Path::combined_cost)
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// Implementations must be `Send + Sync` so perception can run on Rayon
/// workers with the `parallel` feature of `nh-sim`.
pub trait Router: Send + Sync {
    /// Every least-cost path from `from` to `to`, in a deterministic order.
    ///
    /// `from == to` yields the single trivial path.
    fn shortest_paths(
        &self,
        network: &VesselNetwork,
        from: VertexId,
        to: VertexId,
    ) -> NetworkResult<Vec<Path>>;

    /// The least-cost path a navigator would follow.
    fn best_path(
        &self,
        network: &VesselNetwork,
        from: VertexId,
        to: VertexId,
    ) -> NetworkResult<Path> {
        select_best(self.shortest_paths(network, from, to)?)
            .ok_or(NetworkError::NoPath { from, to })
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dijkstra's algorithm over the CSR graph, recording every tight
/// predecessor so all equal-cost paths can be enumerated.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn shortest_paths(
        &self,
        network: &VesselNetwork,
        from: VertexId,
        to: VertexId,
    ) -> NetworkResult<Vec<Path>> {
        network.check(from)?;
        network.check(to)?;
        if from == to {
            return Ok(vec![Path::trivial(from)]);
        }
        let preds = dijkstra(network, from, to).ok_or(NetworkError::NoPath { from, to })?;
        Ok(enumerate_paths(network, &preds, from, to))
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Shortest-path DAG towards `to`: `preds[v]` holds every first-parallel edge
/// `u → v` with `dist[u] + cost == dist[v]`.  `None` if `to` is unreachable.
fn dijkstra(network: &VesselNetwork, from: VertexId, to: VertexId) -> Option<Vec<Vec<EdgeId>>> {
    let n = network.vertex_count();
    let mut dist  = vec![u32::MAX; n];
    let mut preds: Vec<Vec<EdgeId>> = vec![Vec::new(); n];

    dist[from.index()] = 0;

    // Min-heap: (cost, vertex).  Secondary key VertexId keeps pops deterministic.
    let mut heap: BinaryHeap<Reverse<(u32, VertexId)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, v))) = heap.pop() {
        // Nothing past the target's distance can lie on a shortest path to it.
        if cost > dist[to.index()] {
            break;
        }
        if cost > dist[v.index()] {
            continue;
        }

        for edge in network.first_edges(v) {
            let next     = network.edge_to[edge.index()];
            let new_cost = cost.saturating_add(network.edge_cost(edge));
            let known    = dist[next.index()];

            if new_cost < known {
                dist[next.index()] = new_cost;
                preds[next.index()].clear();
                preds[next.index()].push(edge);
                heap.push(Reverse((new_cost, next)));
            } else if new_cost == known && known != u32::MAX {
                preds[next.index()].push(edge);
            }
        }
    }

    (dist[to.index()] != u32::MAX).then_some(preds)
}

/// Walk the predecessor DAG back from `to`, emitting paths ordered by
/// ascending predecessor vertex at every branch.
fn enumerate_paths(
    network: &VesselNetwork,
    preds:   &[Vec<EdgeId>],
    from:    VertexId,
    to:      VertexId,
) -> Vec<Path> {
    let mut sorted: Vec<Vec<EdgeId>> = preds.to_vec();
    for list in &mut sorted {
        list.sort_by_key(|e| network.edge_from[e.index()]);
    }

    let mut out   = Vec::new();
    // Edges collected from `to` backwards.
    let mut stack: Vec<EdgeId> = Vec::new();
    let mut on_path = vec![false; network.vertex_count()];
    on_path[to.index()] = true;
    walk(network, &sorted, from, to, &mut stack, &mut on_path, &mut out);
    out
}

fn walk(
    network: &VesselNetwork,
    preds:   &[Vec<EdgeId>],
    from:    VertexId,
    cur:     VertexId,
    stack:   &mut Vec<EdgeId>,
    on_path: &mut [bool],
    out:     &mut Vec<Path>,
) {
    if out.len() >= MAX_SHORTEST_PATHS {
        return;
    }
    if cur == from {
        let edges: Vec<EdgeId> = stack.iter().rev().copied().collect();
        let mut vertices = Vec::with_capacity(edges.len() + 1);
        vertices.push(from);
        vertices.extend(edges.iter().map(|e| network.edge_to[e.index()]));
        let cost = edges.iter().map(|&e| network.edge_cost(e)).sum();
        out.push(Path { vertices, edges, cost });
        return;
    }
    for &edge in &preds[cur.index()] {
        let prev = network.edge_from[edge.index()];
        // Zero-cost cycles can make the predecessor graph cyclic.
        if on_path[prev.index()] {
            continue;
        }
        on_path[prev.index()] = true;
        stack.push(edge);
        walk(network, preds, from, prev, stack, on_path, out);
        stack.pop();
        on_path[prev.index()] = false;
    }
}
