//! The `Simulation` struct and its run loop.

use nh_agent::{Agent, Dispatcher, StagedAgent};
use nh_core::{AgentId, SimConfig, SimRng, Tick};
use nh_env::NetworkEnvironment;
use tracing::{debug, info};

use crate::{Metrics, SimObserver, SimResult, StagedScheduler, VertexSnapshot};

/// The main simulation runner.
///
/// Owns the environment, the roster, and the single RNG every stochastic
/// decision draws from.  Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulation {
    /// Validated configuration the run was built from.
    pub config:    SimConfig,

    /// Graph, illness, heat, global health, and the reservation board.
    pub env:       NetworkEnvironment,

    /// Active agents, ascending by id.
    pub scheduler: StagedScheduler,

    /// The run's only randomness source.
    pub rng:       SimRng,

    pub(crate) dispatcher: AgentId,
    pub(crate) tick:       Tick,
}

impl Simulation {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until global health runs out or `config.max_ticks` ticks have
    /// completed.  With `max_ticks = None` only halting stops the run.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        loop {
            if self.env.is_halted() {
                break;
            }
            if self.config.max_ticks.is_some_and(|max| self.tick.0 >= max) {
                break;
            }
            self.step(observer)?;
        }
        let metrics = self.metrics();
        info!(
            tick = self.tick.0,
            hitpoints = metrics.hitpoints,
            cured = metrics.cured,
            halted = metrics.halted,
            "run finished"
        );
        observer.on_sim_end(self.tick, &metrics);
        Ok(())
    }

    /// Run up to `n` ticks from the current position, ignoring `max_ticks`.
    /// Stops early if the environment halts.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            if self.env.is_halted() {
                break;
            }
            self.step(observer)?;
        }
        Ok(())
    }

    /// Advance exactly one tick.  Returns `false` once the environment has
    /// halted; a halted simulation never runs another agent.
    pub fn tick(&mut self) -> SimResult<bool> {
        let now = self.tick;
        if !self.env.tick_begin() {
            return Ok(false);
        }
        if let Some(v) = self.env.maybe_infect(&mut self.rng) {
            debug!(tick = now.0, vertex = %v, "infection injected");
        }
        let report = self.scheduler.run_tick(now, &mut self.env, &mut self.rng)?;
        debug!(
            tick = now.0,
            agents = report.participants,
            retired = report.retired.len(),
            spawned = report.spawned.len(),
            "tick complete"
        );
        self.tick = now.next();
        Ok(true)
    }

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.tick;
        observer.on_tick_start(now);
        self.tick()?;
        observer.on_tick_end(now, &self.metrics());

        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.vertex_snapshot());
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Ticks completed so far.
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn is_halted(&self) -> bool {
        self.env.is_halted()
    }

    pub fn agents(&self) -> &[Agent] {
        self.scheduler.agents()
    }

    pub fn dispatcher_id(&self) -> AgentId {
        self.dispatcher
    }

    pub fn dispatcher(&self) -> Option<&Dispatcher> {
        self.scheduler.get(self.dispatcher).and_then(Agent::as_dispatcher)
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            tick:         self.tick,
            hitpoints:    self.env.hitpoints(),
            ill_vertices: self.env.ill_count(),
            live_agents:  self.scheduler.navigator_count() + self.scheduler.responder_count(),
            cured:        self.env.cured_count(),
            total_energy: self.agents().iter().filter_map(Agent::energy).sum(),
            halted:       self.env.is_halted(),
        }
    }

    /// Every vertex with its heat, illness, and occupants, in vertex order.
    pub fn vertex_snapshot(&self) -> Vec<VertexSnapshot> {
        let mut snapshot: Vec<VertexSnapshot> = self
            .env
            .snapshot()
            .into_iter()
            .map(|v| VertexSnapshot {
                vertex:  v.vertex,
                heat:    v.heat,
                is_ill:  v.is_ill,
                illness: v.illness,
                agents:  Vec::new(),
            })
            .collect();
        for agent in self.agents() {
            if let Some(s) = snapshot.get_mut(agent.position().index()) {
                s.agents.push(agent.id());
            }
        }
        snapshot
    }

    /// Remaining energy of a navigator; `None` for other agents and for
    /// agents no longer on the roster.
    pub fn agent_energy(&self, id: AgentId) -> Option<i64> {
        self.scheduler.get(id).and_then(Agent::energy)
    }

    /// `(id, energy)` of every navigator, ascending by id.
    pub fn agent_energies(&self) -> Vec<(AgentId, i64)> {
        self.agents()
            .iter()
            .filter_map(|a| a.energy().map(|e| (a.id(), e)))
            .collect()
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("tick", &self.tick)
            .field("halted", &self.env.is_halted())
            .field("agents", &self.scheduler.len())
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}
