//! Fluent builder for constructing a [`Simulation`].

use nh_agent::{Dispatcher, Navigator};
use nh_core::{SimConfig, SimRng, Tick, VertexId};
use nh_env::{Illness, NetworkEnvironment};
use nh_network::{Router, VesselNetwork};
use tracing::info;

use crate::{SimError, SimResult, Simulation, StagedScheduler};

/// Fluent builder for [`Simulation`].
///
/// # Required inputs
///
/// - [`SimConfig`]: agent count, health, illness, energy, variant, seed, …
/// - [`VesselNetwork`]: from [`nh_network::VesselNetworkBuilder`]
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                   |
/// |--------------------------|-------------------------------------------|
/// | `.initial_positions(v)`  | Uniformly random vertex per navigator     |
/// | `.router(r)`             | `DijkstraRouter`                          |
/// | `.infected(v, illness)`  | No vertex ill at tick 0                   |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, network)
///     .initial_positions(vec![VertexId(0), VertexId(3)])
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:    SimConfig,
    network:   VesselNetwork,
    positions: Option<Vec<VertexId>>,
    router:    Option<Box<dyn Router>>,
    infected:  Vec<(VertexId, Illness)>,
}

impl SimBuilder {
    pub fn new(config: SimConfig, network: VesselNetwork) -> Self {
        Self {
            config,
            network,
            positions: None,
            router:    None,
            infected:  Vec::new(),
        }
    }

    /// Start position for each navigator (must be length `agent_count`).
    pub fn initial_positions(mut self, positions: Vec<VertexId>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Replace the routing engine.
    pub fn router(mut self, router: Box<dyn Router>) -> Self {
        self.router = Some(router);
        self
    }

    /// Make `v` ill before the first tick.  Counts toward `max_ill_vertices`.
    pub fn infected(mut self, v: VertexId, illness: Illness) -> Self {
        self.infected.push((v, illness));
        self
    }

    /// Validate inputs, place the factory and the agents, and return a
    /// ready-to-run [`Simulation`].
    pub fn build(self) -> SimResult<Simulation> {
        let config = self.config;
        let n = self.network.vertex_count();
        config.validate(n)?;

        // ── Validate optional inputs ──────────────────────────────────────
        if let Some(p) = &self.positions {
            if p.len() != config.agent_count {
                return Err(SimError::AgentCountMismatch {
                    expected: config.agent_count,
                    got:      p.len(),
                    what:     "initial positions",
                });
            }
            if let Some(bad) = p.iter().find(|v| v.index() >= n) {
                return Err(SimError::Config(format!(
                    "initial position {bad} is outside a network of {n} vertices"
                )));
            }
        }

        let mut rng = SimRng::new(config.seed);

        // ── Environment ───────────────────────────────────────────────────
        let factory = match config.factory_location {
            Some(v) => v,
            None => VertexId(rng.gen_range(0..n as u32)),
        };
        let mut env = NetworkEnvironment::new(self.network, &config, factory)?;
        if let Some(router) = self.router {
            env = env.with_router(router);
        }
        for (v, illness) in self.infected {
            env.infect(v, illness)?;
        }

        // ── Roster: navigators first, then the dispatcher ─────────────────
        let positions = match self.positions {
            Some(p) => p,
            None => (0..config.agent_count)
                .map(|_| VertexId(rng.gen_range(0..n as u32)))
                .collect(),
        };
        let mut scheduler = StagedScheduler::new();
        for pos in positions {
            let id = scheduler.allocate_id();
            scheduler.add(Navigator::new(id, pos, &config, factory).into());
        }
        let dispatcher = scheduler.allocate_id();
        scheduler.add(Dispatcher::new(dispatcher, factory).into());

        info!(
            vertices = n,
            navigators = config.agent_count,
            variant = %config.variant,
            factory = %factory,
            seed = config.seed,
            "simulation built"
        );

        Ok(Simulation {
            config,
            env,
            scheduler,
            rng,
            dispatcher,
            tick: Tick::ZERO,
        })
    }
}
