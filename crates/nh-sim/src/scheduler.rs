//! `StagedScheduler`: the roster and its three-phase barrier.

use std::collections::BTreeSet;

use nh_agent::{
    ActContext, Agent, Effect, Peer, Responder, SpawnRequest, StagedAgent, UpdateContext,
    WorldView,
};
use nh_core::{AgentId, SimRng, Tick, VertexId};
use nh_env::NetworkEnvironment;
use tracing::{debug, info, warn};

use crate::SimResult;

#[cfg(feature = "fx-hash")]
type ColocationMap<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type ColocationMap<K, V> = std::collections::HashMap<K, V>;

/// What one tick did to the roster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Agents that took part in the tick.
    pub participants: usize,
    pub retired:      Vec<AgentId>,
    pub spawned:      Vec<AgentId>,
}

/// Active agents in ascending `AgentId` order.
///
/// Ids are handed out monotonically and never reused, so appending a new
/// agent keeps the roster sorted.
#[derive(Debug, Default)]
pub struct StagedScheduler {
    agents:  Vec<Agent>,
    next_id: u32,
}

impl StagedScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next agent id.
    pub fn allocate_id(&mut self) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an agent built with an id from [`allocate_id`](Self::allocate_id).
    pub fn add(&mut self, agent: Agent) {
        debug_assert!(self.agents.last().is_none_or(|a| a.id() < agent.id()));
        self.agents.push(agent);
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents
            .binary_search_by_key(&id, |a| a.id())
            .ok()
            .map(|i| &self.agents[i])
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        match self.agents.binary_search_by_key(&id, |a| a.id()) {
            Ok(i) => Some(&mut self.agents[i]),
            Err(_) => None,
        }
    }

    pub fn navigator_count(&self) -> usize {
        self.agents.iter().filter(|a| a.as_navigator().is_some()).count()
    }

    pub fn responder_count(&self) -> usize {
        self.agents.iter().filter(|a| a.as_responder().is_some()).count()
    }

    /// Agents on `v`, ascending.
    pub fn agents_at(&self, v: VertexId) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.iter().filter(move |a| a.position() == v).map(|a| a.id())
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Run perceive, act, and update over the current roster, then apply the
    /// resulting effects.
    pub fn run_tick(
        &mut self,
        tick: Tick,
        env:  &mut NetworkEnvironment,
        rng:  &mut SimRng,
    ) -> SimResult<TickReport> {
        let participants = self.agents.len();

        // ── Perceive ──────────────────────────────────────────────────────
        //
        // Peer lists are collected up front so perception only reads.
        let peers = self.peer_lists();
        self.perceive(tick, env, &peers)?;
        debug!(tick = tick.0, agents = participants, "perceive done");

        // ── Act ───────────────────────────────────────────────────────────
        {
            let mut ctx = ActContext { tick, rng, reservations: &mut env.reservations };
            for agent in &mut self.agents {
                agent.act(&mut ctx)?;
            }
        }

        // ── Update ────────────────────────────────────────────────────────
        let mut effects: Vec<Effect> = Vec::new();
        {
            let mut ctx = UpdateContext { tick, env: &mut *env, effects: &mut effects };
            for agent in &mut self.agents {
                agent.update(&mut ctx)?;
            }
        }
        debug!(tick = tick.0, effects = effects.len(), "update done");

        // ── Effects ───────────────────────────────────────────────────────
        let mut retired: BTreeSet<AgentId> = BTreeSet::new();
        let mut spawns: Vec<SpawnRequest> = Vec::new();
        for effect in effects {
            match effect {
                Effect::Retire(id) => {
                    retired.insert(id);
                }
                Effect::Spawn(request) => spawns.push(request),
                Effect::AcknowledgeAlert(id) => {
                    match self.get_mut(id).and_then(Agent::as_navigator_mut) {
                        Some(nav) => {
                            nav.acknowledge_alert();
                        }
                        None => warn!(agent = %id, "alert acknowledged for unknown navigator"),
                    }
                }
                Effect::ResponderFinished { creator } => {
                    match self.get_mut(creator).and_then(Agent::as_dispatcher_mut) {
                        Some(d) => d.on_responder_finished(),
                        None => warn!(agent = %creator, "responder finished for unknown dispatcher"),
                    }
                }
            }
        }
        if !retired.is_empty() {
            self.agents.retain(|a| !retired.contains(&a.id()));
            info!(tick = tick.0, count = retired.len(), "agents retired");
        }

        env.reservations.clear();

        // ── Spawn (joins next tick) ───────────────────────────────────────
        let mut spawned = Vec::with_capacity(spawns.len());
        for request in spawns {
            let id = self.allocate_id();
            debug!(tick = tick.0, agent = %id, at = %request.at, target = %request.target, "responder spawned");
            self.add(Responder::new(id, request).into());
            spawned.push(id);
        }

        Ok(TickReport { participants, retired: retired.into_iter().collect(), spawned })
    }

    /// Other agents on each agent's vertex, aligned with the roster.
    fn peer_lists(&self) -> Vec<Vec<Peer>> {
        let mut index: ColocationMap<VertexId, Vec<usize>> = ColocationMap::default();
        for (i, agent) in self.agents.iter().enumerate() {
            index.entry(agent.position()).or_default().push(i);
        }
        self.agents
            .iter()
            .enumerate()
            .map(|(i, agent)| match index.get(&agent.position()) {
                None => Vec::new(),
                Some(here) => here
                    .iter()
                    .filter(|&&j| j != i)
                    .map(|&j| self.agents[j].as_peer())
                    .collect(),
            })
            .collect()
    }

    fn perceive(
        &mut self,
        tick:  Tick,
        env:   &NetworkEnvironment,
        peers: &[Vec<Peer>],
    ) -> SimResult<()> {
        let view = WorldView::new(tick, env);

        #[cfg(not(feature = "parallel"))]
        {
            for (agent, peers) in self.agents.iter_mut().zip(peers) {
                agent.perceive(&view, peers)?;
            }
            Ok(())
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.agents
                .par_iter_mut()
                .zip(peers.par_iter())
                .try_for_each(|(agent, peers)| agent.perceive(&view, peers))?;
            Ok(())
        }
    }
}
