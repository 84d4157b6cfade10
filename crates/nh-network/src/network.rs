//! Vessel network representation and builder.
//!
//! # Data layout
//!
//! The graph is a directed **multigraph** stored in Compressed Sparse Row
//! (CSR) form.  Given a `VertexId v`, its outgoing edges occupy the slice
//!
//! ```text
//! edge_to[ out_start[v] .. out_start[v+1] ]
//! ```
//!
//! Heat works on the undirected neighbourhood, so the builder also derives a
//! deduplicated adjacency list per vertex.
//!
//! # Parallel edges
//!
//! Two vertices may be joined by several edges in the same direction.  Edges
//! keep their insertion order within a source vertex (stable sort), and every
//! pairwise cost lookup uses the **first** parallel edge.

use nh_core::{EdgeId, FlowClass, VertexId};

use crate::{NetworkError, NetworkResult};

// ── VesselNetwork ─────────────────────────────────────────────────────────────

/// Directed weighted vessel graph in CSR format.
///
/// All edge arrays are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`VesselNetworkBuilder`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VesselNetwork {
    vertex_count: usize,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing edges of vertex `v` are at EdgeIds
    /// `out_start[v] .. out_start[v+1]`.  Length = `vertex_count + 1`.
    pub out_start: Vec<u32>,

    /// Source vertex of each edge.
    pub edge_from: Vec<VertexId>,

    /// Destination vertex of each edge.
    pub edge_to: Vec<VertexId>,

    /// Energy cost of traversing each edge.
    pub edge_cost: Vec<u32>,

    /// Flow class of each edge.
    pub edge_flow: Vec<FlowClass>,

    // ── Derived simple-graph views ────────────────────────────────────────
    /// Distinct successors per vertex, in first-edge order, self-loops removed.
    successors: Vec<Vec<VertexId>>,
    /// Distinct in- or out-neighbours per vertex, ascending, self-loops removed.
    adjacent: Vec<Vec<VertexId>>,
}

impl VesselNetwork {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        v.index() < self.vertex_count
    }

    /// `Ok(())` if `v` belongs to this network.
    pub fn check(&self, v: VertexId) -> NetworkResult<()> {
        if self.contains(v) { Ok(()) } else { Err(NetworkError::VertexNotFound(v)) }
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `v`, parallel
    /// edges included.
    #[inline]
    pub fn out_edges(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.out_start[v.index()] as usize;
        let end   = self.out_start[v.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, v: VertexId) -> usize {
        (self.out_start[v.index() + 1] - self.out_start[v.index()]) as usize
    }

    /// Vertices reachable from `v` in one hop (the movement neighbourhood).
    #[inline]
    pub fn successors(&self, v: VertexId) -> &[VertexId] {
        &self.successors[v.index()]
    }

    /// Vertices joined to `v` by an edge in either direction.  Heat depends
    /// on this neighbourhood.
    #[inline]
    pub fn adjacent(&self, v: VertexId) -> &[VertexId] {
        &self.adjacent[v.index()]
    }

    /// `true` where more than two distinct vertices meet at `v`.
    #[inline]
    pub fn is_junction(&self, v: VertexId) -> bool {
        self.adjacent[v.index()].len() > 2
    }

    /// First parallel edge from `from` to `to`, if any.
    pub fn edge_between(&self, from: VertexId, to: VertexId) -> Option<EdgeId> {
        self.out_edges(from).find(|e| self.edge_to[e.index()] == to)
    }

    /// Cost of the first parallel edge from `from` to `to`.
    pub fn cost(&self, from: VertexId, to: VertexId) -> Option<u32> {
        self.edge_between(from, to).map(|e| self.edge_cost[e.index()])
    }

    #[inline]
    pub fn edge_cost(&self, edge: EdgeId) -> u32 {
        self.edge_cost[edge.index()]
    }

    #[inline]
    pub fn edge_flow(&self, edge: EdgeId) -> FlowClass {
        self.edge_flow[edge.index()]
    }

    /// Outgoing edges of `v` with parallel duplicates removed, keeping the
    /// first edge to each successor.
    pub fn first_edges(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.successors(v)
            .iter()
            .filter_map(move |&to| self.edge_between(v, to))
    }
}

// ── VesselNetworkBuilder ──────────────────────────────────────────────────────

/// Construct a [`VesselNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use nh_network::VesselNetworkBuilder;
///
/// let mut b = VesselNetworkBuilder::new();
/// let heart = b.add_vertex();
/// let lung  = b.add_vertex();
/// b.add_vessel(heart, lung); // heart→lung with flow, lung→heart against
/// let net = b.build().unwrap();
/// assert_eq!(net.vertex_count(), 2);
/// assert_eq!(net.edge_count(), 2);
/// assert_eq!(net.cost(heart, lung), Some(2));
/// assert_eq!(net.cost(lung, heart), Some(4));
/// ```
#[derive(Default)]
pub struct VesselNetworkBuilder {
    vertex_count: usize,
    raw_edges:    Vec<RawEdge>,
}

struct RawEdge {
    from: VertexId,
    to:   VertexId,
    cost: u32,
    flow: FlowClass,
}

impl VesselNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder pre-populated with `n` vertices, ids `0..n`.
    pub fn with_vertices(n: usize) -> Self {
        Self { vertex_count: n, raw_edges: Vec::new() }
    }

    /// Add a vertex and return its `VertexId` (sequential from 0).
    pub fn add_vertex(&mut self) -> VertexId {
        let id = VertexId(self.vertex_count as u32);
        self.vertex_count += 1;
        id
    }

    /// Add a **directed** edge with an explicit cost.  Repeated calls for the
    /// same pair create parallel edges.
    pub fn add_directed_edge(&mut self, from: VertexId, to: VertexId, cost: u32, flow: FlowClass) {
        self.raw_edges.push(RawEdge { from, to, cost, flow });
    }

    /// Add a directed edge priced at its flow class's default cost.
    pub fn add_flow_edge(&mut self, from: VertexId, to: VertexId, flow: FlowClass) {
        self.add_directed_edge(from, to, flow.default_cost(), flow);
    }

    /// Add a vessel whose blood runs `from → to`: a cheap with-flow edge in
    /// that direction and an expensive against-flow edge back.
    pub fn add_vessel(&mut self, from: VertexId, to: VertexId) {
        self.add_flow_edge(from, to, FlowClass::With);
        self.add_flow_edge(to, from, FlowClass::Against);
    }

    pub fn vertex_count(&self) -> usize { self.vertex_count }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`VesselNetwork`].
    ///
    /// # Errors
    ///
    /// [`NetworkError::VertexNotFound`] if an edge names a vertex that was
    /// never added.
    pub fn build(self) -> NetworkResult<VesselNetwork> {
        let n = self.vertex_count;
        for e in &self.raw_edges {
            for v in [e.from, e.to] {
                if v.index() >= n {
                    return Err(NetworkError::VertexNotFound(v));
                }
            }
        }

        // Stable sort keeps parallel edges in insertion order.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from: Vec<VertexId>  = raw.iter().map(|e| e.from).collect();
        let edge_to:   Vec<VertexId>  = raw.iter().map(|e| e.to).collect();
        let edge_cost: Vec<u32>       = raw.iter().map(|e| e.cost).collect();
        let edge_flow: Vec<FlowClass> = raw.iter().map(|e| e.flow).collect();

        let mut out_start = vec![0u32; n + 1];
        for from in &edge_from {
            out_start[from.index() + 1] += 1;
        }
        for i in 1..=n {
            out_start[i] += out_start[i - 1];
        }
        debug_assert_eq!(out_start[n] as usize, raw.len());

        let mut successors: Vec<Vec<VertexId>> = vec![Vec::new(); n];
        let mut adjacent:   Vec<Vec<VertexId>> = vec![Vec::new(); n];
        for (&from, &to) in edge_from.iter().zip(&edge_to) {
            if from == to {
                continue;
            }
            if !successors[from.index()].contains(&to) {
                successors[from.index()].push(to);
            }
            adjacent[from.index()].push(to);
            adjacent[to.index()].push(from);
        }
        for list in &mut adjacent {
            list.sort_unstable();
            list.dedup();
        }

        Ok(VesselNetwork {
            vertex_count: n,
            out_start,
            edge_from,
            edge_to,
            edge_cost,
            edge_flow,
            successors,
            adjacent,
        })
    }
}
