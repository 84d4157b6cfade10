//! `NetworkEnvironment`: the vessel network plus everything that changes on it.
//!
//! # Mutation contract
//!
//! Agents never touch vertex state directly.  The scheduler calls
//! [`tick_begin`](NetworkEnvironment::tick_begin) and
//! [`maybe_infect`](NetworkEnvironment::maybe_infect) before perception, and
//! applies cures through [`restore_vertex`](NetworkEnvironment::restore_vertex)
//! after every agent has updated.  The only state agents write during `act`
//! is the [`ReservationBoard`], which is cleared at the end of each tick.

use std::collections::BTreeSet;

use nh_core::{SimConfig, SimRng, VertexId};
use nh_network::{DijkstraRouter, Path, Router, VesselNetwork};
use tracing::{debug, info, warn};

use crate::{
    EnvError, EnvResult, Illness, IllnessCatalog, ReservationBoard, VertexState, VertexView,
    HEAT_CLEAR, HEAT_ILL, HEAT_NEAR_ILL,
};

pub struct NetworkEnvironment {
    network:          VesselNetwork,
    router:           Box<dyn Router>,
    vertices:         Vec<VertexState>,
    ill:              BTreeSet<VertexId>,
    max_ill_vertices: usize,
    illness_chance:   f64,
    catalog:          IllnessCatalog,
    hitpoints:        i64,
    cured:            u64,
    halted:           bool,
    factory_location: VertexId,
    /// Next-vertex claims of coordinating navigators for the current tick.
    pub reservations: ReservationBoard,
}

impl NetworkEnvironment {
    /// Build an all-healthy environment from a validated config.
    ///
    /// `factory_location` is passed separately because the builder may have
    /// drawn it at random when the config leaves it unset.
    pub fn new(
        network: VesselNetwork,
        config: &SimConfig,
        factory_location: VertexId,
    ) -> EnvResult<Self> {
        if !network.contains(factory_location) {
            return Err(EnvError::FactoryOutsideNetwork(factory_location));
        }
        let n = network.vertex_count();
        Ok(Self {
            router:           Box::new(DijkstraRouter),
            vertices:         vec![VertexState::default(); n],
            ill:              BTreeSet::new(),
            max_ill_vertices: config.max_ill_vertices,
            illness_chance:   config.illness_chance,
            catalog:          IllnessCatalog::new(&config.illness_catalog),
            hitpoints:        config.initial_hitpoints,
            cured:            0,
            halted:           false,
            factory_location,
            reservations:     ReservationBoard::new(),
            network,
        })
    }

    /// Swap the routing engine.
    pub fn with_router(mut self, router: Box<dyn Router>) -> Self {
        self.router = router;
        self
    }

    // ── Tick hooks ───────────────────────────────────────────────────────────

    /// Charge one hitpoint per ill vertex.  Once hitpoints reach zero the
    /// environment halts for good; returns `false` from then on.
    pub fn tick_begin(&mut self) -> bool {
        if self.halted {
            return false;
        }
        let damage = self.ill.len() as i64;
        self.hitpoints -= damage;
        if self.hitpoints <= 0 {
            self.halted = true;
            warn!(hitpoints = self.hitpoints, ill = damage, "global health exhausted; halting");
            return false;
        }
        true
    }

    /// Possibly make one healthy vertex ill.
    ///
    /// Below the illness cap, with probability `illness_chance`, a uniformly
    /// chosen healthy vertex gets a uniformly chosen illness.  Returns the
    /// vertex that fell ill, if any.
    pub fn maybe_infect(&mut self, rng: &mut SimRng) -> Option<VertexId> {
        if self.ill.len() >= self.max_ill_vertices {
            return None;
        }
        if rng.random::<f64>() >= self.illness_chance {
            return None;
        }
        let healthy: Vec<VertexId> = VertexId::all(self.vertices.len())
            .filter(|v| !self.ill.contains(v))
            .collect();
        let target = *rng.choose(&healthy)?;
        let illness = self.catalog.draw(rng)?;
        info!(vertex = %target, illness = %illness, "vertex fell ill");
        self.mark_ill(target, illness);
        Some(target)
    }

    /// Make `v` ill with `illness`, honouring the illness cap.
    pub fn infect(&mut self, v: VertexId, illness: Illness) -> EnvResult<()> {
        self.network.check(v)?;
        if self.ill.contains(&v) {
            return Err(EnvError::AlreadyIll(v));
        }
        if self.ill.len() >= self.max_ill_vertices {
            return Err(EnvError::IllnessCapacity { vertex: v, max: self.max_ill_vertices });
        }
        debug!(vertex = %v, illness = %illness, "vertex infected");
        self.mark_ill(v, illness);
        Ok(())
    }

    /// Cure an ill vertex: clear it, refresh heat around it, and credit one
    /// hitpoint.  Fails with `InvalidState` if `v` is not ill.
    pub fn restore_vertex(&mut self, v: VertexId) -> EnvResult<()> {
        self.network.check(v)?;
        if !self.ill.remove(&v) {
            return Err(EnvError::InvalidState(v));
        }
        let state = &mut self.vertices[v.index()];
        state.is_ill = false;
        let illness = state.illness.take();
        self.refresh_around(v);
        self.hitpoints += 1;
        self.cured += 1;
        info!(
            vertex = %v,
            illness = illness.as_ref().map(Illness::as_str).unwrap_or("-"),
            hitpoints = self.hitpoints,
            "vertex restored"
        );
        Ok(())
    }

    fn mark_ill(&mut self, v: VertexId, illness: Illness) {
        self.ill.insert(v);
        let state = &mut self.vertices[v.index()];
        state.is_ill = true;
        state.illness = Some(illness);
        self.refresh_around(v);
    }

    /// Recompute heat for `v` and every vertex adjacent to it.
    fn refresh_around(&mut self, v: VertexId) {
        self.refresh_heat(v);
        let adjacent = self.network.adjacent(v).to_vec();
        for u in adjacent {
            self.refresh_heat(u);
        }
    }

    fn refresh_heat(&mut self, v: VertexId) {
        let heat = if self.ill.contains(&v) {
            HEAT_ILL
        } else if self.network.adjacent(v).iter().any(|u| self.ill.contains(u)) {
            HEAT_NEAR_ILL
        } else {
            HEAT_CLEAR
        };
        self.vertices[v.index()].heat = heat;
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn network(&self) -> &VesselNetwork {
        &self.network
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// State of `v`.  Panics if `v` is out of range.
    pub fn vertex(&self, v: VertexId) -> &VertexState {
        &self.vertices[v.index()]
    }

    pub fn is_ill(&self, v: VertexId) -> bool {
        self.ill.contains(&v)
    }

    pub fn heat(&self, v: VertexId) -> f32 {
        self.vertices.get(v.index()).map_or(HEAT_CLEAR, |s| s.heat)
    }

    pub fn illness(&self, v: VertexId) -> Option<&Illness> {
        self.vertices.get(v.index()).and_then(|s| s.illness.as_ref())
    }

    /// Ill vertices, ascending.
    pub fn ill_vertices(&self) -> &BTreeSet<VertexId> {
        &self.ill
    }

    pub fn ill_count(&self) -> usize {
        self.ill.len()
    }

    pub fn hitpoints(&self) -> i64 {
        self.hitpoints
    }

    /// Number of successful `restore_vertex` calls so far.
    pub fn cured_count(&self) -> u64 {
        self.cured
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn factory_location(&self) -> VertexId {
        self.factory_location
    }

    /// Distinct direct successors of `v` (outgoing edges only).
    pub fn neighbors(&self, v: VertexId) -> &[VertexId] {
        self.network.successors(v)
    }

    /// Every least-cost path from `from` to `to`.
    pub fn shortest_paths(&self, from: VertexId, to: VertexId) -> EnvResult<Vec<Path>> {
        Ok(self.router.shortest_paths(&self.network, from, to)?)
    }

    /// The least-cost path with the fewest vertices; first one on ties.
    pub fn best_path(&self, from: VertexId, to: VertexId) -> EnvResult<Path> {
        Ok(self.router.best_path(&self.network, from, to)?)
    }

    /// Copy of every vertex's state, in vertex order.
    pub fn snapshot(&self) -> Vec<VertexView> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, s)| VertexView {
                vertex:  VertexId(i as u32),
                is_ill:  s.is_ill,
                illness: s.illness.clone(),
                heat:    s.heat,
            })
            .collect()
    }
}

impl std::fmt::Debug for NetworkEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkEnvironment")
            .field("vertices", &self.vertices.len())
            .field("ill", &self.ill)
            .field("hitpoints", &self.hitpoints)
            .field("halted", &self.halted)
            .field("factory_location", &self.factory_location)
            .finish()
    }
}
