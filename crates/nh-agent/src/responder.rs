//! `Responder`: travels to one ill vertex, cures it, and retires.

use nh_core::{AgentId, VertexId};
use nh_env::Illness;
use nh_network::Path;
use tracing::{debug, info};

use crate::{
    ActContext, AgentError, AgentResult, Effect, Peer, SpawnRequest, StagedAgent, UpdateContext,
    WorldView,
};

#[derive(Debug)]
pub struct Responder {
    id:        AgentId,
    position:  VertexId,
    target:    VertexId,
    illness:   Illness,
    /// Dispatcher whose live counter this responder decrements on finish.
    creator:   AgentId,
    path:      Option<Path>,
    arrived:   bool,
    perceived: bool,
}

impl Responder {
    pub fn new(id: AgentId, request: SpawnRequest) -> Self {
        Self {
            id,
            position:  request.at,
            target:    request.target,
            illness:   request.illness,
            creator:   request.creator,
            path:      None,
            arrived:   false,
            perceived: false,
        }
    }

    pub fn target(&self) -> VertexId {
        self.target
    }

    pub fn illness(&self) -> &Illness {
        &self.illness
    }

    pub fn creator(&self) -> AgentId {
        self.creator
    }

    pub fn arrived(&self) -> bool {
        self.arrived
    }

    /// Route computed in the latest `perceive`.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }
}

impl StagedAgent for Responder {
    fn id(&self) -> AgentId {
        self.id
    }

    fn position(&self) -> VertexId {
        self.position
    }

    fn perceive(&mut self, view: &WorldView<'_>, _peers: &[Peer]) -> AgentResult<()> {
        self.arrived = self.position == self.target;
        self.path = if self.arrived {
            None
        } else {
            Some(view.env.best_path(self.position, self.target)?)
        };
        self.perceived = true;
        Ok(())
    }

    fn act(&mut self, _ctx: &mut ActContext<'_>) -> AgentResult<()> {
        if !self.perceived {
            return Err(AgentError::NotPerceived(self.id));
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) -> AgentResult<()> {
        if !std::mem::take(&mut self.perceived) {
            return Err(AgentError::NotPerceived(self.id));
        }
        if !self.arrived {
            if let Some(hop) = self.path.as_ref().and_then(Path::next_hop) {
                self.position = hop;
            }
            return Ok(());
        }

        if ctx.env.is_ill(self.target) {
            ctx.env.restore_vertex(self.target)?;
            info!(tick = ctx.tick.0, agent = %self.id, vertex = %self.target, illness = %self.illness, "vertex cured");
        } else {
            debug!(agent = %self.id, vertex = %self.target, "target already healthy");
        }
        ctx.effects.push(Effect::Retire(self.id));
        ctx.effects.push(Effect::ResponderFinished { creator: self.creator });
        Ok(())
    }
}
