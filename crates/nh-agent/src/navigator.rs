//! `Navigator`: the helper agent that patrols the network and reports illness.
//!
//! # Decision rules
//!
//! In priority order, from the percept taken at the start of the tick:
//!
//! 1. **Standing on an ill vertex**: raise an alert for it (unless one is
//!    already carried) and head for the factory along the best path.  If the
//!    factory is right here, stay put at zero cost.
//! 2. **Carrying an alert**: head for the factory the same way.
//! 3. **Go with the flow**: move to the hottest neighbour (random among equal
//!    heat); with no warm neighbour, to a cheapest neighbour (random among
//!    equal cost).  The coordinating variant first drops neighbours a
//!    co-located peer already claimed this tick.
//!
//! With a nonzero wrong-turn chance, a navigator standing on a junction after
//! its first tick may throw away the chosen move and take a random outgoing
//! vessel that does not lead back where it came from.
//!
//! # Energy
//!
//! Each move costs the traversed edge's weight.  A move with the flow then
//! recharges `recharge_amount`, capped at the initial energy.  A navigator
//! whose energy drops to zero or below retires at the end of the tick.

use nh_core::{AgentId, FlowClass, NavigatorVariant, SimConfig, SimRng, VertexId};
use nh_env::{Illness, ReservationBoard};
use nh_network::Path;
use tracing::{debug, info, warn};

use crate::{
    ActContext, AgentError, AgentResult, Alert, Effect, Peer, StagedAgent, UpdateContext,
    WorldView,
};

// ── Percept ───────────────────────────────────────────────────────────────────

/// One outgoing neighbour as seen at perception time.
#[derive(Clone, Debug, PartialEq)]
pub struct NeighborPercept {
    pub vertex: VertexId,
    pub heat:   f32,
    /// Weight of the first parallel edge towards `vertex`.
    pub cost:   u32,
    pub flow:   FlowClass,
}

impl NeighborPercept {
    fn as_move(&self) -> Decision {
        Decision::Move { to: self.vertex, cost: self.cost, flow: self.flow }
    }
}

/// Everything a navigator copies out of the world in `perceive`.
#[derive(Clone, Debug)]
pub struct NavigatorPercept {
    pub vertex:      VertexId,
    pub is_ill:      bool,
    pub illness:     Option<Illness>,
    pub heat:        f32,
    /// Distinct outgoing neighbours in edge order.
    pub neighbors:   Vec<NeighborPercept>,
    pub at_junction: bool,
    /// Best path to the factory; only computed when the navigator needs it.
    pub route_home:  Option<Path>,
    /// All least-cost paths to every reachable ill vertex.
    pub ill_paths:   Vec<(VertexId, Vec<Path>)>,
}

impl NavigatorPercept {
    fn neighbor(&self, v: VertexId) -> Option<&NeighborPercept> {
        self.neighbors.iter().find(|n| n.vertex == v)
    }
}

// ── Decision & state ──────────────────────────────────────────────────────────

/// What a navigator will do in `update`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Stay on the current vertex.  Costs nothing.
    Stay,
    Move { to: VertexId, cost: u32, flow: FlowClass },
}

impl Decision {
    pub fn cost(self) -> u32 {
        match self {
            Decision::Stay => 0,
            Decision::Move { cost, .. } => cost,
        }
    }

    pub fn target(self, here: VertexId) -> VertexId {
        match self {
            Decision::Stay => here,
            Decision::Move { to, .. } => to,
        }
    }
}

/// Derived behavioural state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavigatorState {
    Patrolling,
    /// Carrying an alert towards the factory.
    Alerting,
    /// Carrying an alert at the factory, waiting for the dispatcher.
    IdleAtFactory,
}

// ── Navigator ─────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Navigator {
    id:                AgentId,
    position:          VertexId,
    previous:          Option<VertexId>,
    ticks_alive:       u64,
    energy:            i64,
    initial_energy:    i64,
    recharge_amount:   i64,
    variant:           NavigatorVariant,
    wrong_turn_chance: f64,
    factory:           VertexId,
    alert:             Option<Alert>,
    percept:           Option<NavigatorPercept>,
    pending_alert:     Option<Alert>,
    decision:          Option<Decision>,
}

impl Navigator {
    pub fn new(id: AgentId, position: VertexId, config: &SimConfig, factory: VertexId) -> Self {
        Self {
            id,
            position,
            previous:          None,
            ticks_alive:       0,
            energy:            config.initial_energy,
            initial_energy:    config.initial_energy,
            recharge_amount:   config.recharge_amount,
            variant:           config.variant,
            wrong_turn_chance: config.wrong_turn_chance,
            factory,
            alert:             None,
            percept:           None,
            pending_alert:     None,
            decision:          None,
        }
    }

    pub fn energy(&self) -> i64 {
        self.energy
    }

    pub fn initial_energy(&self) -> i64 {
        self.initial_energy
    }

    pub fn variant(&self) -> NavigatorVariant {
        self.variant
    }

    /// The vertex this navigator left on its last move.
    pub fn previous(&self) -> Option<VertexId> {
        self.previous
    }

    pub fn ticks_alive(&self) -> u64 {
        self.ticks_alive
    }

    pub fn factory(&self) -> VertexId {
        self.factory
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn percept(&self) -> Option<&NavigatorPercept> {
        self.percept.as_ref()
    }

    /// The decision taken in this tick's `act`, until `update` commits it.
    pub fn decision(&self) -> Option<Decision> {
        self.decision
    }

    pub fn state(&self) -> NavigatorState {
        match self.alert {
            None => NavigatorState::Patrolling,
            Some(_) if self.position == self.factory => NavigatorState::IdleAtFactory,
            Some(_) => NavigatorState::Alerting,
        }
    }

    /// Clear the carried alert once the dispatcher has received it.
    pub fn acknowledge_alert(&mut self) -> Option<Alert> {
        self.alert.take()
    }

    /// Factory-bound move from the precomputed route.
    fn head_home(&self, percept: &NavigatorPercept) -> Decision {
        if percept.vertex == self.factory {
            return Decision::Stay;
        }
        let hop = percept.route_home.as_ref().and_then(Path::next_hop);
        match hop.and_then(|v| percept.neighbor(v)) {
            Some(n) => n.as_move(),
            None => {
                warn!(agent = %self.id, vertex = %percept.vertex, "no route to factory; staying");
                Decision::Stay
            }
        }
    }

    fn go_with_the_flow(
        &self,
        percept:      &NavigatorPercept,
        rng:          &mut SimRng,
        reservations: &mut ReservationBoard,
    ) -> Decision {
        let here = percept.vertex;
        let mut candidates: Vec<&NeighborPercept> = percept.neighbors.iter().collect();
        if candidates.is_empty() {
            warn!(agent = %self.id, vertex = %here, "dead end; staying");
            return Decision::Stay;
        }

        let coordinating = self.variant == NavigatorVariant::Coordinating;
        if coordinating {
            let free: Vec<&NeighborPercept> = candidates
                .iter()
                .copied()
                .filter(|n| !reservations.is_reserved(here, n.vertex))
                .collect();
            if free.is_empty() {
                debug!(agent = %self.id, vertex = %here, "every neighbour reserved; fairness reset");
                reservations.reset(here);
            } else {
                candidates = free;
            }
        }

        let Some(choice) = pick_flow_target(&candidates, rng) else {
            return Decision::Stay;
        };
        if coordinating {
            reservations.reserve(here, choice.vertex);
        }
        choice.as_move()
    }

    /// Junction detour: replace a move with a random outgoing vessel that
    /// does not lead back to the previous vertex.
    fn maybe_wrong_turn(
        &self,
        percept:  &NavigatorPercept,
        decision: Decision,
        rng:      &mut SimRng,
    ) -> Decision {
        if self.wrong_turn_chance <= 0.0
            || self.ticks_alive == 0
            || !percept.at_junction
            || decision == Decision::Stay
        {
            return decision;
        }
        if !rng.gen_bool(self.wrong_turn_chance) {
            return decision;
        }
        let options: Vec<&NeighborPercept> = percept
            .neighbors
            .iter()
            .filter(|n| Some(n.vertex) != self.previous)
            .collect();
        match rng.choose(&options) {
            Some(n) => {
                debug!(agent = %self.id, from = %percept.vertex, to = %n.vertex, "wrong turn");
                n.as_move()
            }
            None => decision,
        }
    }
}

/// Hottest candidate if any is warm, else a cheapest one; random among ties.
fn pick_flow_target<'a>(
    candidates: &[&'a NeighborPercept],
    rng:        &mut SimRng,
) -> Option<&'a NeighborPercept> {
    let hottest = candidates.iter().map(|n| n.heat).fold(0.0_f32, f32::max);
    let pool: Vec<&NeighborPercept> = if hottest > 0.0 {
        candidates.iter().copied().filter(|n| n.heat == hottest).collect()
    } else {
        let cheapest = candidates.iter().map(|n| n.cost).min()?;
        candidates.iter().copied().filter(|n| n.cost == cheapest).collect()
    };
    rng.choose(&pool).copied()
}

impl StagedAgent for Navigator {
    fn id(&self) -> AgentId {
        self.id
    }

    fn position(&self) -> VertexId {
        self.position
    }

    fn perceive(&mut self, view: &WorldView<'_>, _peers: &[Peer]) -> AgentResult<()> {
        let env = view.env;
        let net = env.network();
        let here = self.position;
        net.check(here)?;

        let state = env.vertex(here);
        let neighbors = env
            .neighbors(here)
            .iter()
            .filter_map(|&v| {
                let e = net.edge_between(here, v)?;
                Some(NeighborPercept {
                    vertex: v,
                    heat:   env.heat(v),
                    cost:   net.edge_cost(e),
                    flow:   net.edge_flow(e),
                })
            })
            .collect();

        // An unreachable factory leaves `route_home` empty; `head_home` then stays put.
        let heading_home = (state.is_ill || self.alert.is_some()) && here != self.factory;
        let route_home = if heading_home {
            env.best_path(here, self.factory).ok()
        } else {
            None
        };

        // Unreachable ill vertices are left out.
        let ill_paths = env
            .ill_vertices()
            .iter()
            .filter_map(|&v| env.shortest_paths(here, v).ok().map(|paths| (v, paths)))
            .collect();

        self.percept = Some(NavigatorPercept {
            vertex:      here,
            is_ill:      state.is_ill,
            illness:     state.illness.clone(),
            heat:        state.heat,
            neighbors,
            at_junction: net.is_junction(here),
            route_home,
            ill_paths,
        });
        Ok(())
    }

    fn act(&mut self, ctx: &mut ActContext<'_>) -> AgentResult<()> {
        let percept = self.percept.as_ref().ok_or(AgentError::NotPerceived(self.id))?;

        let mut pending_alert = None;
        let decision = if percept.is_ill {
            if self.alert.is_none() {
                pending_alert = percept
                    .illness
                    .clone()
                    .map(|illness| Alert { vertex: percept.vertex, illness });
            }
            self.head_home(percept)
        } else if self.alert.is_some() {
            self.head_home(percept)
        } else {
            self.go_with_the_flow(percept, ctx.rng, ctx.reservations)
        };
        let decision = self.maybe_wrong_turn(percept, decision, ctx.rng);

        self.pending_alert = pending_alert;
        self.decision = Some(decision);
        Ok(())
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) -> AgentResult<()> {
        let decision = self.decision.take().ok_or(AgentError::NotPerceived(self.id))?;
        self.percept = None;

        if let Some(alert) = self.pending_alert.take() {
            info!(
                tick = ctx.tick.0,
                agent = %self.id,
                vertex = %alert.vertex,
                illness = %alert.illness,
                "illness detected"
            );
            self.alert = Some(alert);
        }

        if let Decision::Move { to, cost, flow } = decision {
            self.previous = Some(self.position);
            self.position = to;
            self.energy -= i64::from(cost);
            if flow.recharges() {
                self.energy = (self.energy + self.recharge_amount).min(self.initial_energy);
            }
        }
        self.ticks_alive += 1;

        if self.energy <= 0 {
            info!(tick = ctx.tick.0, agent = %self.id, vertex = %self.position, "navigator exhausted");
            ctx.effects.push(Effect::Retire(self.id));
        }
        Ok(())
    }
}
