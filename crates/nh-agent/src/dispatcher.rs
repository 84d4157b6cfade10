//! `Dispatcher`: the factory that triages alerts and sends responders.
//!
//! Alerts for an illness the dispatcher already knows are answered with a
//! responder in the same tick.  Alerts for a new illness are queued; after
//! all of a tick's alerts are triaged the oldest queued request is released.
//! Newly seen illnesses join the library in `update`, so two alerts for the
//! same new illness in one tick are both queued.

use std::collections::{BTreeSet, VecDeque};

use nh_core::{AgentId, VertexId};
use nh_env::Illness;
use tracing::{debug, info};

use crate::{
    ActContext, AgentKind, AgentResult, Alert, Effect, Peer, SpawnRequest, StagedAgent,
    UpdateContext, WorldView,
};

#[derive(Debug)]
pub struct Dispatcher {
    id:              AgentId,
    position:        VertexId,
    known:           BTreeSet<Illness>,
    deferred:        VecDeque<SpawnRequest>,
    live_responders: u32,
    spawned_total:   u64,

    // ── Per-tick scratch ─────────────────────────────────────────────────
    alerts:          Vec<(AgentId, Alert)>,
    spawn_now:       Vec<SpawnRequest>,
    learned:         Vec<Illness>,
}

impl Dispatcher {
    pub fn new(id: AgentId, position: VertexId) -> Self {
        Self {
            id,
            position,
            known:           BTreeSet::new(),
            deferred:        VecDeque::new(),
            live_responders: 0,
            spawned_total:   0,
            alerts:          Vec::new(),
            spawn_now:       Vec::new(),
            learned:         Vec::new(),
        }
    }

    /// Start with a pre-filled disease library.
    pub fn with_known(mut self, known: impl IntoIterator<Item = Illness>) -> Self {
        self.known.extend(known);
        self
    }

    pub fn knows(&self, illness: &Illness) -> bool {
        self.known.contains(illness)
    }

    pub fn known_diseases(&self) -> &BTreeSet<Illness> {
        &self.known
    }

    /// Queued requests, oldest first.
    pub fn deferred(&self) -> impl Iterator<Item = &SpawnRequest> {
        self.deferred.iter()
    }

    pub fn deferred_len(&self) -> usize {
        self.deferred.len()
    }

    /// Responders spawned and not yet finished.
    pub fn live_responders(&self) -> u32 {
        self.live_responders
    }

    pub fn spawned_total(&self) -> u64 {
        self.spawned_total
    }

    /// Requests released in this tick's `act`, until `update` commits them.
    pub fn pending_spawns(&self) -> &[SpawnRequest] {
        &self.spawn_now
    }

    pub fn on_responder_finished(&mut self) {
        self.live_responders = self.live_responders.saturating_sub(1);
    }

    fn request(&self, alert: &Alert) -> SpawnRequest {
        SpawnRequest {
            at:      self.position,
            target:  alert.vertex,
            illness: alert.illness.clone(),
            creator: self.id,
        }
    }
}

impl StagedAgent for Dispatcher {
    fn id(&self) -> AgentId {
        self.id
    }

    fn position(&self) -> VertexId {
        self.position
    }

    fn perceive(&mut self, _view: &WorldView<'_>, peers: &[Peer]) -> AgentResult<()> {
        self.alerts = peers
            .iter()
            .filter(|p| p.kind == AgentKind::Navigator)
            .filter_map(|p| p.alert.clone().map(|a| (p.id, a)))
            .collect();
        Ok(())
    }

    fn act(&mut self, _ctx: &mut ActContext<'_>) -> AgentResult<()> {
        self.spawn_now.clear();
        self.learned.clear();

        for (_, alert) in &self.alerts {
            let request = self.request(alert);
            if self.known.contains(&alert.illness) {
                self.spawn_now.push(request);
            } else {
                if !self.learned.contains(&alert.illness) {
                    self.learned.push(alert.illness.clone());
                }
                debug!(vertex = %alert.vertex, illness = %alert.illness, "new illness; deferring");
                self.deferred.push_back(request);
            }
        }
        if let Some(oldest) = self.deferred.pop_front() {
            self.spawn_now.push(oldest);
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) -> AgentResult<()> {
        for (navigator, _) in self.alerts.drain(..) {
            ctx.effects.push(Effect::AcknowledgeAlert(navigator));
        }
        for request in self.spawn_now.drain(..) {
            info!(
                tick = ctx.tick.0,
                target = %request.target,
                illness = %request.illness,
                "dispatching responder"
            );
            self.live_responders += 1;
            self.spawned_total += 1;
            ctx.effects.push(Effect::Spawn(request));
        }
        for illness in self.learned.drain(..) {
            info!(illness = %illness, "illness added to library");
            self.known.insert(illness);
        }
        Ok(())
    }
}
