//! Unit tests for nh-agent.

#[cfg(test)]
mod helpers {
    use nh_core::{SimConfig, SimRng, Tick, VertexId};
    use nh_env::NetworkEnvironment;
    use nh_network::{VesselNetwork, VesselNetworkBuilder};

    use crate::{ActContext, Effect, Peer, StagedAgent, UpdateContext, WorldView};

    /// Five-vertex circulation loop 0 → 1 → 2 → 3 → 4 → 0; with-flow
    /// vessels cost 2, the reverse vessels cost 4.
    pub fn cycle5() -> VesselNetwork {
        let mut b = VesselNetworkBuilder::with_vertices(5);
        for i in 0..5u32 {
            b.add_vessel(VertexId(i), VertexId((i + 1) % 5));
        }
        b.build().unwrap()
    }

    /// Junction at 0 fed by 1, draining into 2 and 3; 4 feeds 1.
    ///
    /// ```text
    /// 4 → 1 → 0 → 2
    ///          ↘ 3
    /// ```
    pub fn junction() -> VesselNetwork {
        let mut b = VesselNetworkBuilder::with_vertices(5);
        b.add_vessel(VertexId(1), VertexId(0));
        b.add_vessel(VertexId(0), VertexId(2));
        b.add_vessel(VertexId(0), VertexId(3));
        b.add_vessel(VertexId(4), VertexId(1));
        b.build().unwrap()
    }

    pub fn config() -> SimConfig {
        SimConfig { max_ill_vertices: 5, ..SimConfig::default() }
    }

    pub fn env_on(net: VesselNetwork, config: &SimConfig, factory: u32) -> NetworkEnvironment {
        NetworkEnvironment::new(net, config, VertexId(factory)).unwrap()
    }

    /// Run one full perceive / act / update cycle for a single agent.
    pub fn step<A: StagedAgent>(
        agent: &mut A,
        env:   &mut NetworkEnvironment,
        rng:   &mut SimRng,
        peers: &[Peer],
    ) -> Vec<Effect> {
        agent.perceive(&WorldView::new(Tick::ZERO, env), peers).unwrap();
        let mut act = ActContext { tick: Tick::ZERO, rng, reservations: &mut env.reservations };
        agent.act(&mut act).unwrap();
        let mut effects = Vec::new();
        let mut upd = UpdateContext { tick: Tick::ZERO, env, effects: &mut effects };
        agent.update(&mut upd).unwrap();
        effects
    }
}

// ── Navigator: decision rules ─────────────────────────────────────────────────

#[cfg(test)]
mod navigator_rules {
    use std::collections::BTreeSet;

    use nh_core::{AgentId, FlowClass, SimRng, VertexId};
    use nh_env::Illness;

    use super::helpers::*;
    use crate::{
        ActContext, Decision, Effect, Navigator, NavigatorState, StagedAgent, WorldView,
    };

    #[test]
    fn heals_in_place_at_factory() {
        let cfg = config();
        let mut env = env_on(cycle5(), &cfg, 0);
        env.infect(VertexId(0), Illness::new("viral")).unwrap();
        let mut nav = Navigator::new(AgentId(0), VertexId(0), &cfg, VertexId(0));
        let mut rng = SimRng::new(1);

        nav.perceive(&WorldView::new(nh_core::Tick::ZERO, &env), &[]).unwrap();
        let mut ctx = ActContext {
            tick:         nh_core::Tick::ZERO,
            rng:          &mut rng,
            reservations: &mut env.reservations,
        };
        nav.act(&mut ctx).unwrap();
        assert_eq!(nav.decision(), Some(Decision::Stay));
        assert_eq!(nav.decision().map(Decision::cost), Some(0));

        let mut rng = SimRng::new(1);
        let effects = step(&mut nav, &mut env, &mut rng, &[]);
        assert!(effects.is_empty());
        assert_eq!(nav.position(), VertexId(0));
        assert_eq!(nav.energy(), cfg.initial_energy);
        assert_eq!(nav.alert().map(|a| a.vertex), Some(VertexId(0)));
        assert_eq!(nav.state(), NavigatorState::IdleAtFactory);
    }

    #[test]
    fn stays_with_alert_when_factory_unreachable() {
        // 0 → 1 ⇄ 2: nothing leads back to the factory at 0.
        let mut b = nh_network::VesselNetworkBuilder::with_vertices(3);
        b.add_flow_edge(VertexId(0), VertexId(1), FlowClass::With);
        b.add_vessel(VertexId(1), VertexId(2));
        let cfg = config();
        let mut env = env_on(b.build().unwrap(), &cfg, 0);
        env.infect(VertexId(2), Illness::new("fungal")).unwrap();
        let mut nav = Navigator::new(AgentId(0), VertexId(2), &cfg, VertexId(0));
        let mut rng = SimRng::new(4);

        nav.perceive(&WorldView::new(nh_core::Tick::ZERO, &env), &[]).unwrap();
        assert!(nav.percept().is_some_and(|p| p.route_home.is_none()));

        let effects = step(&mut nav, &mut env, &mut rng, &[]);
        assert!(effects.is_empty());
        assert_eq!(nav.position(), VertexId(2));
        assert_eq!(nav.energy(), cfg.initial_energy);
        assert_eq!(nav.alert().map(|a| a.vertex), Some(VertexId(2)));
        assert_eq!(nav.state(), NavigatorState::Alerting);
    }

    #[test]
    fn ill_vertex_routes_home_with_the_flow() {
        let cfg = config();
        let mut env = env_on(cycle5(), &cfg, 0);
        env.infect(VertexId(2), Illness::new("fungal")).unwrap();
        let mut nav = Navigator::new(AgentId(0), VertexId(2), &cfg, VertexId(0));

        // 2 → 3 → 4 → 0 costs 6 over 4 vertices (10); 2 → 1 → 0 costs 8 over
        // 3 vertices (11).
        step(&mut nav, &mut env, &mut SimRng::new(1), &[]);
        assert_eq!(nav.position(), VertexId(3));
        assert_eq!(nav.previous(), Some(VertexId(2)));
        assert_eq!(nav.energy(), cfg.initial_energy - 2 + cfg.recharge_amount);
        assert_eq!(nav.state(), NavigatorState::Alerting);
        let alert = nav.alert().unwrap();
        assert_eq!(alert.vertex, VertexId(2));
        assert_eq!(alert.illness.as_str(), "fungal");
    }

    #[test]
    fn alert_keeps_heading_home() {
        let cfg = config();
        let mut env = env_on(cycle5(), &cfg, 0);
        env.infect(VertexId(2), Illness::new("fungal")).unwrap();
        let mut nav = Navigator::new(AgentId(0), VertexId(2), &cfg, VertexId(0));
        let mut rng = SimRng::new(3);
        for expected in [3, 4, 0, 0] {
            step(&mut nav, &mut env, &mut rng, &[]);
            assert_eq!(nav.position(), VertexId(expected));
        }
        assert_eq!(nav.state(), NavigatorState::IdleAtFactory);
        assert_eq!(nav.acknowledge_alert().map(|a| a.vertex), Some(VertexId(2)));
        assert_eq!(nav.state(), NavigatorState::Patrolling);
    }

    #[test]
    fn follows_heat() {
        let cfg = config();
        let mut env = env_on(cycle5(), &cfg, 0);
        // 4 is ill, so 3 is warm; 1 is cold.
        env.infect(VertexId(4), Illness::new("viral")).unwrap();
        let mut nav = Navigator::new(AgentId(0), VertexId(2), &cfg, VertexId(0));
        step(&mut nav, &mut env, &mut SimRng::new(9), &[]);
        assert_eq!(nav.position(), VertexId(3));
    }

    #[test]
    fn heat_beats_cost() {
        let cfg = config();
        let mut env = env_on(cycle5(), &cfg, 0);
        // 1 is warm but only reachable against the flow.
        env.infect(VertexId(0), Illness::new("viral")).unwrap();
        let mut nav = Navigator::new(AgentId(0), VertexId(2), &cfg, VertexId(3));
        step(&mut nav, &mut env, &mut SimRng::new(9), &[]);
        assert_eq!(nav.position(), VertexId(1));
        assert_eq!(nav.energy(), cfg.initial_energy - 4);
    }

    #[test]
    fn cold_network_takes_cheapest_vessel() {
        let cfg = config();
        let mut env = env_on(cycle5(), &cfg, 0);
        let mut nav = Navigator::new(AgentId(0), VertexId(2), &cfg, VertexId(0));
        step(&mut nav, &mut env, &mut SimRng::new(5), &[]);
        assert_eq!(nav.position(), VertexId(3));
        assert!(nav.percept().is_none());
    }

    #[test]
    fn equal_heat_ties_are_random() {
        let cfg = config();
        let mut seen = BTreeSet::new();
        for seed in 0..64 {
            let mut env = env_on(cycle5(), &cfg, 0);
            env.infect(VertexId(1), Illness::new("viral")).unwrap();
            env.infect(VertexId(3), Illness::new("viral")).unwrap();
            let mut nav = Navigator::new(AgentId(0), VertexId(2), &cfg, VertexId(0));
            step(&mut nav, &mut env, &mut SimRng::new(seed), &[]);
            seen.insert(nav.position());
        }
        assert_eq!(seen, BTreeSet::from([VertexId(1), VertexId(3)]));
    }

    #[test]
    fn percept_lists_paths_to_ill_vertices() {
        let cfg = config();
        let mut env = env_on(cycle5(), &cfg, 0);
        env.infect(VertexId(3), Illness::new("viral")).unwrap();
        let mut nav = Navigator::new(AgentId(0), VertexId(1), &cfg, VertexId(0));
        nav.perceive(&WorldView::new(nh_core::Tick::ZERO, &env), &[]).unwrap();
        let p = nav.percept().unwrap();
        assert!(!p.is_ill);
        assert_eq!(p.ill_paths.len(), 1);
        assert_eq!(p.ill_paths[0].0, VertexId(3));
        assert_eq!(p.ill_paths[0].1[0].vertices, vec![VertexId(1), VertexId(2), VertexId(3)]);
        assert!(p.route_home.is_none());
        let to_two = p.neighbors.iter().find(|n| n.vertex == VertexId(2)).unwrap();
        assert_eq!((to_two.cost, to_two.flow), (2, FlowClass::With));
    }

    #[test]
    fn act_without_perceive_fails() {
        let cfg = config();
        let mut env = env_on(cycle5(), &cfg, 0);
        let mut nav = Navigator::new(AgentId(7), VertexId(0), &cfg, VertexId(0));
        let mut rng = SimRng::new(0);
        let mut ctx = ActContext {
            tick:         nh_core::Tick::ZERO,
            rng:          &mut rng,
            reservations: &mut env.reservations,
        };
        assert!(matches!(nav.act(&mut ctx), Err(crate::AgentError::NotPerceived(AgentId(7)))));
    }

    #[test]
    fn retires_when_exhausted() {
        let cfg = nh_core::SimConfig { initial_energy: 1, ..config() };
        let mut env = env_on(cycle5(), &cfg, 0);
        let mut nav = Navigator::new(AgentId(4), VertexId(0), &cfg, VertexId(0));
        // 1 - 2 + 1 = 0.
        let effects = step(&mut nav, &mut env, &mut SimRng::new(0), &[]);
        assert_eq!(nav.energy(), 0);
        assert_eq!(effects, vec![Effect::Retire(AgentId(4))]);
    }

    #[test]
    fn recharge_capped_at_initial() {
        let cfg = nh_core::SimConfig { recharge_amount: 5, ..config() };
        let mut env = env_on(cycle5(), &cfg, 0);
        let mut nav = Navigator::new(AgentId(0), VertexId(0), &cfg, VertexId(0));
        step(&mut nav, &mut env, &mut SimRng::new(0), &[]);
        assert_eq!(nav.energy(), cfg.initial_energy);
    }
}

// ── Navigator: wrong turns ────────────────────────────────────────────────────

#[cfg(test)]
mod wrong_turn {
    use nh_core::{AgentId, SimConfig, SimRng, VertexId};
    use nh_env::Illness;

    use super::helpers::*;
    use crate::{Navigator, StagedAgent};

    fn run(chance: f64, seed: u64) -> VertexId {
        let cfg = SimConfig { wrong_turn_chance: chance, ..config() };
        let mut env = env_on(junction(), &cfg, 2);
        let mut nav = Navigator::new(AgentId(0), VertexId(1), &cfg, VertexId(2));
        let mut rng = SimRng::new(seed);

        step(&mut nav, &mut env, &mut rng, &[]);
        assert_eq!(nav.position(), VertexId(0));

        // Warm 1 so the flow rule would send the navigator straight back.
        env.infect(VertexId(4), Illness::new("viral")).unwrap();
        step(&mut nav, &mut env, &mut rng, &[]);
        nav.position()
    }

    #[test]
    fn without_wrong_turns_heat_wins() {
        assert_eq!(run(0.0, 11), VertexId(1));
    }

    #[test]
    fn wrong_turn_avoids_previous_vertex() {
        for seed in 0..32 {
            let pos = run(1.0, seed);
            assert!(pos == VertexId(2) || pos == VertexId(3), "seed {seed} went to {pos}");
        }
    }

    #[test]
    fn no_wrong_turn_on_first_tick() {
        let cfg = SimConfig { wrong_turn_chance: 1.0, ..config() };
        let mut env = env_on(junction(), &cfg, 2);
        env.infect(VertexId(4), Illness::new("viral")).unwrap();
        let mut nav = Navigator::new(AgentId(0), VertexId(0), &cfg, VertexId(2));
        step(&mut nav, &mut env, &mut SimRng::new(2), &[]);
        assert_eq!(nav.position(), VertexId(1));
    }
}

// ── Navigator: coordination ───────────────────────────────────────────────────

#[cfg(test)]
mod coordination {
    use nh_core::{AgentId, FlowClass, NavigatorVariant, SimConfig, SimRng, Tick, VertexId};
    use nh_env::NetworkEnvironment;
    use nh_network::VesselNetworkBuilder;

    use super::helpers::*;
    use crate::{ActContext, Effect, Navigator, StagedAgent, UpdateContext, WorldView};

    /// Perceive, act, and update two navigators in lock-step.
    fn step_pair(env: &mut NetworkEnvironment, navs: &mut [Navigator; 2], seed: u64) {
        let mut rng = SimRng::new(seed);
        for n in navs.iter_mut() {
            n.perceive(&WorldView::new(Tick::ZERO, env), &[]).unwrap();
        }
        for n in navs.iter_mut() {
            let mut ctx = ActContext { tick: Tick::ZERO, rng: &mut rng, reservations: &mut env.reservations };
            n.act(&mut ctx).unwrap();
        }
        let mut effects: Vec<Effect> = Vec::new();
        for n in navs.iter_mut() {
            let mut ctx = UpdateContext { tick: Tick::ZERO, env: &mut *env, effects: &mut effects };
            n.update(&mut ctx).unwrap();
        }
    }

    fn pair(cfg: &SimConfig, at: u32) -> [Navigator; 2] {
        [
            Navigator::new(AgentId(0), VertexId(at), cfg, VertexId(0)),
            Navigator::new(AgentId(1), VertexId(at), cfg, VertexId(0)),
        ]
    }

    #[test]
    fn coordinating_agents_split() {
        let cfg = SimConfig { variant: NavigatorVariant::Coordinating, ..config() };
        for seed in 0..16 {
            let mut env = env_on(cycle5(), &cfg, 0);
            let mut navs = pair(&cfg, 2);
            step_pair(&mut env, &mut navs, seed);
            assert_ne!(navs[0].position(), navs[1].position(), "seed {seed}");
            // The cheap vessel goes to whoever chose first.
            assert_eq!(navs[0].position(), VertexId(3));
            assert_eq!(navs[1].position(), VertexId(1));
        }
    }

    #[test]
    fn basic_agents_collide() {
        let cfg = config();
        let mut env = env_on(cycle5(), &cfg, 0);
        let mut navs = pair(&cfg, 2);
        step_pair(&mut env, &mut navs, 0);
        assert_eq!(navs[0].position(), VertexId(3));
        assert_eq!(navs[1].position(), VertexId(3));
        assert!(env.reservations.is_empty());
    }

    #[test]
    fn single_exit_forces_fairness_reset() {
        let cfg = SimConfig { variant: NavigatorVariant::Coordinating, ..config() };
        let mut b = VesselNetworkBuilder::with_vertices(2);
        b.add_flow_edge(VertexId(0), VertexId(1), FlowClass::With);
        b.add_flow_edge(VertexId(1), VertexId(0), FlowClass::With);
        let mut env = env_on(b.build().unwrap(), &cfg, 1);
        let mut navs = pair(&cfg, 0);
        step_pair(&mut env, &mut navs, 0);
        assert_eq!(navs[0].position(), VertexId(1));
        assert_eq!(navs[1].position(), VertexId(1));
        // The second pick re-reserved the only exit after the reset.
        assert!(env.reservations.is_reserved(VertexId(0), VertexId(1)));
    }
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatcher {
    use nh_core::{AgentId, SimRng, VertexId};
    use nh_env::{Illness, NetworkEnvironment};

    use super::helpers::*;
    use crate::{AgentKind, Alert, Dispatcher, Effect, Peer, SpawnRequest, StagedAgent};

    fn alerting(id: u32, vertex: u32, illness: &str) -> Peer {
        Peer {
            id:    AgentId(id),
            kind:  AgentKind::Navigator,
            alert: Some(Alert { vertex: VertexId(vertex), illness: Illness::new(illness) }),
        }
    }

    fn spawned(effects: &[Effect]) -> Vec<(VertexId, String)> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Spawn(SpawnRequest { target, illness, .. }) => {
                    Some((*target, illness.as_str().to_owned()))
                }
                _ => None,
            })
            .collect()
    }

    fn env() -> NetworkEnvironment {
        env_on(cycle5(), &config(), 0)
    }

    #[test]
    fn triage_defers_new_and_releases_fifo() {
        let mut env = env();
        let mut rng = SimRng::new(0);
        let mut d = Dispatcher::new(AgentId(9), VertexId(0));

        // Tick 1: A and B are both new.  Both queue; A is released.
        let fx = step(&mut d, &mut env, &mut rng, &[alerting(0, 2, "A"), alerting(1, 3, "B")]);
        assert_eq!(spawned(&fx), vec![(VertexId(2), "A".to_owned())]);
        assert!(fx.contains(&Effect::AcknowledgeAlert(AgentId(0))));
        assert!(fx.contains(&Effect::AcknowledgeAlert(AgentId(1))));
        assert!(d.knows(&Illness::new("A")) && d.knows(&Illness::new("B")));
        assert_eq!(d.deferred_len(), 1);

        // Tick 2: A is known now and goes out at once; B leaves the queue.
        let fx = step(&mut d, &mut env, &mut rng, &[alerting(0, 4, "A")]);
        assert_eq!(
            spawned(&fx),
            vec![(VertexId(4), "A".to_owned()), (VertexId(3), "B".to_owned())]
        );
        assert_eq!(d.deferred_len(), 0);

        // Tick 3: nothing to do.
        let fx = step(&mut d, &mut env, &mut rng, &[]);
        assert!(fx.is_empty());
        assert_eq!(d.spawned_total(), 3);
        assert_eq!(d.live_responders(), 3);
    }

    #[test]
    fn one_release_per_tick() {
        let mut env = env();
        let mut rng = SimRng::new(0);
        let mut d = Dispatcher::new(AgentId(9), VertexId(0));
        let peers = [alerting(0, 1, "X"), alerting(1, 2, "Y"), alerting(2, 3, "Z")];
        let mut order = spawned(&step(&mut d, &mut env, &mut rng, &peers));
        order.extend(spawned(&step(&mut d, &mut env, &mut rng, &[])));
        order.extend(spawned(&step(&mut d, &mut env, &mut rng, &[])));
        let labels: Vec<&str> = order.iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(labels, vec!["X", "Y", "Z"]);
    }

    #[test]
    fn same_new_illness_twice_in_one_tick_queues_both() {
        let mut env = env();
        let mut d = Dispatcher::new(AgentId(9), VertexId(0));
        let fx = step(
            &mut d,
            &mut env,
            &mut SimRng::new(0),
            &[alerting(0, 1, "A"), alerting(1, 3, "A")],
        );
        assert_eq!(spawned(&fx).len(), 1);
        assert_eq!(d.deferred_len(), 1);
        assert_eq!(d.known_diseases().len(), 1);
    }

    #[test]
    fn ignores_quiet_peers() {
        let mut env = env();
        let mut d = Dispatcher::new(AgentId(9), VertexId(0)).with_known([Illness::new("A")]);
        let quiet = Peer { id: AgentId(0), kind: AgentKind::Navigator, alert: None };
        let responder = Peer {
            id:    AgentId(1),
            kind:  AgentKind::Responder,
            alert: Some(Alert { vertex: VertexId(2), illness: Illness::new("A") }),
        };
        let fx = step(&mut d, &mut env, &mut SimRng::new(0), &[quiet, responder]);
        assert!(fx.is_empty());
    }

    #[test]
    fn responder_finish_decrements() {
        let mut env = env();
        let mut d = Dispatcher::new(AgentId(9), VertexId(0)).with_known([Illness::new("A")]);
        step(&mut d, &mut env, &mut SimRng::new(0), &[alerting(0, 2, "A")]);
        assert_eq!(d.live_responders(), 1);
        d.on_responder_finished();
        d.on_responder_finished();
        assert_eq!(d.live_responders(), 0);
        assert_eq!(d.spawned_total(), 1);
    }
}

// ── Responder ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod responder {
    use nh_core::{AgentId, SimRng, VertexId};
    use nh_env::Illness;

    use super::helpers::*;
    use crate::{Effect, Responder, SpawnRequest, StagedAgent};

    fn request(target: u32) -> SpawnRequest {
        SpawnRequest {
            at:      VertexId(0),
            target:  VertexId(target),
            illness: Illness::new("viral"),
            creator: AgentId(9),
        }
    }

    #[test]
    fn travels_then_cures() {
        let cfg = config();
        let mut env = env_on(cycle5(), &cfg, 0);
        env.infect(VertexId(2), Illness::new("viral")).unwrap();
        let hp = env.hitpoints();
        let mut r = Responder::new(AgentId(5), request(2));
        let mut rng = SimRng::new(0);

        assert!(step(&mut r, &mut env, &mut rng, &[]).is_empty());
        assert_eq!(r.position(), VertexId(1));
        assert!(step(&mut r, &mut env, &mut rng, &[]).is_empty());
        assert_eq!(r.position(), VertexId(2));

        let fx = step(&mut r, &mut env, &mut rng, &[]);
        assert!(r.arrived());
        assert!(!env.is_ill(VertexId(2)));
        assert_eq!(env.hitpoints(), hp + 1);
        assert_eq!(
            fx,
            vec![Effect::Retire(AgentId(5)), Effect::ResponderFinished { creator: AgentId(9) }]
        );
    }

    #[test]
    fn already_healthy_target_is_noop() {
        let cfg = config();
        let mut env = env_on(cycle5(), &cfg, 0);
        let mut r = Responder::new(AgentId(5), request(0));
        let fx = step(&mut r, &mut env, &mut SimRng::new(0), &[]);
        assert_eq!(env.cured_count(), 0);
        assert_eq!(fx.len(), 2);
        assert!(fx.contains(&Effect::ResponderFinished { creator: AgentId(9) }));
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use nh_core::{AgentId, SimConfig, SimRng, VertexId};
    use nh_env::Illness;
    use proptest::prelude::*;

    use super::helpers::*;
    use crate::{Decision, Navigator, StagedAgent};

    proptest! {
        /// Energy only rises on with-flow moves and never exceeds its start.
        #[test]
        fn energy_bounded(seed in any::<u64>(), recharge in 0i64..6, ill in 0u32..5) {
            let cfg = SimConfig { recharge_amount: recharge, ..config() };
            let mut env = env_on(cycle5(), &cfg, 0);
            env.infect(VertexId(ill), Illness::new("viral")).unwrap();
            let mut nav = Navigator::new(AgentId(0), VertexId(seed as u32 % 5), &cfg, VertexId(0));
            let mut rng = SimRng::new(seed);
            for _ in 0..40 {
                let before = nav.energy();
                nav.perceive(&crate::WorldView::new(nh_core::Tick::ZERO, &env), &[]).unwrap();
                let mut ctx = crate::ActContext {
                    tick: nh_core::Tick::ZERO,
                    rng: &mut rng,
                    reservations: &mut env.reservations,
                };
                nav.act(&mut ctx).unwrap();
                let decision = nav.decision().unwrap();
                let mut fx = Vec::new();
                let mut ctx = crate::UpdateContext { tick: nh_core::Tick::ZERO, env: &mut env, effects: &mut fx };
                nav.update(&mut ctx).unwrap();

                prop_assert!(nav.energy() <= cfg.initial_energy);
                match decision {
                    Decision::Move { flow, .. } if flow.recharges() => {}
                    _ => prop_assert!(nav.energy() <= before),
                }
                if !fx.is_empty() {
                    prop_assert!(nav.energy() <= 0);
                    break;
                }
            }
        }
    }
}
