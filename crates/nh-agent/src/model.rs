//! The `StagedAgent` trait and the `Agent` roster entry.

use std::fmt;

use nh_core::{AgentId, VertexId};

use crate::{
    ActContext, AgentResult, Alert, Dispatcher, Navigator, Peer, Responder, UpdateContext,
    WorldView,
};

/// Three-step agent behaviour driven once per tick by the scheduler.
///
/// The scheduler calls `perceive` on every agent, then `act` on every agent,
/// then `update` on every agent, always over the roster as it stood when the
/// tick began.  An agent must not read anything in `act` that it did not copy
/// in `perceive`.
///
/// `Send` is required so the perceive phase can run on Rayon workers.
pub trait StagedAgent: Send {
    fn id(&self) -> AgentId;

    fn position(&self) -> VertexId;

    /// Snapshot the parts of the world this agent reacts to.
    ///
    /// `peers` are the other agents that stood on this agent's vertex when
    /// the tick began, ascending by id.
    fn perceive(&mut self, view: &WorldView<'_>, peers: &[Peer]) -> AgentResult<()>;

    /// Decide what to do from the percept.
    fn act(&mut self, ctx: &mut ActContext<'_>) -> AgentResult<()>;

    /// Commit the decision.
    fn update(&mut self, ctx: &mut UpdateContext<'_>) -> AgentResult<()>;
}

/// Capability tag of an agent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Navigator,
    Dispatcher,
    Responder,
}

impl AgentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Navigator  => "navigator",
            AgentKind::Dispatcher => "dispatcher",
            AgentKind::Responder  => "responder",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One roster entry.
#[derive(Debug)]
pub enum Agent {
    Navigator(Navigator),
    Dispatcher(Dispatcher),
    Responder(Responder),
}

impl Agent {
    pub fn kind(&self) -> AgentKind {
        match self {
            Agent::Navigator(_)  => AgentKind::Navigator,
            Agent::Dispatcher(_) => AgentKind::Dispatcher,
            Agent::Responder(_)  => AgentKind::Responder,
        }
    }

    /// Undelivered alert, for navigators.
    pub fn alert(&self) -> Option<&Alert> {
        match self {
            Agent::Navigator(n) => n.alert(),
            _ => None,
        }
    }

    /// Remaining energy, for navigators.
    pub fn energy(&self) -> Option<i64> {
        match self {
            Agent::Navigator(n) => Some(n.energy()),
            _ => None,
        }
    }

    /// This agent as seen by a co-located peer.
    pub fn as_peer(&self) -> Peer {
        Peer { id: self.id(), kind: self.kind(), alert: self.alert().cloned() }
    }

    pub fn as_navigator(&self) -> Option<&Navigator> {
        match self {
            Agent::Navigator(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_navigator_mut(&mut self) -> Option<&mut Navigator> {
        match self {
            Agent::Navigator(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_dispatcher(&self) -> Option<&Dispatcher> {
        match self {
            Agent::Dispatcher(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_dispatcher_mut(&mut self) -> Option<&mut Dispatcher> {
        match self {
            Agent::Dispatcher(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_responder(&self) -> Option<&Responder> {
        match self {
            Agent::Responder(r) => Some(r),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn StagedAgent {
        match self {
            Agent::Navigator(n)  => n,
            Agent::Dispatcher(d) => d,
            Agent::Responder(r)  => r,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn StagedAgent {
        match self {
            Agent::Navigator(n)  => n,
            Agent::Dispatcher(d) => d,
            Agent::Responder(r)  => r,
        }
    }
}

impl StagedAgent for Agent {
    fn id(&self) -> AgentId {
        self.inner().id()
    }

    fn position(&self) -> VertexId {
        self.inner().position()
    }

    fn perceive(&mut self, view: &WorldView<'_>, peers: &[Peer]) -> AgentResult<()> {
        self.inner_mut().perceive(view, peers)
    }

    fn act(&mut self, ctx: &mut ActContext<'_>) -> AgentResult<()> {
        self.inner_mut().act(ctx)
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) -> AgentResult<()> {
        self.inner_mut().update(ctx)
    }
}

impl From<Navigator> for Agent {
    fn from(n: Navigator) -> Self {
        Agent::Navigator(n)
    }
}

impl From<Dispatcher> for Agent {
    fn from(d: Dispatcher) -> Self {
        Agent::Dispatcher(d)
    }
}

impl From<Responder> for Agent {
    fn from(r: Responder) -> Self {
        Agent::Responder(r)
    }
}
