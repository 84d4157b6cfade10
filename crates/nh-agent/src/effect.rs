//! Requests an agent makes of the scheduler during `update`.

use nh_core::{AgentId, VertexId};
use nh_env::Illness;

/// An illness a navigator found and is carrying to the dispatcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub vertex:  VertexId,
    pub illness: Illness,
}

/// A responder waiting to be placed on the roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnRequest {
    /// Where the responder starts (the dispatcher's vertex).
    pub at:      VertexId,
    pub target:  VertexId,
    pub illness: Illness,
    /// The dispatcher whose live-responder counter tracks this responder.
    pub creator: AgentId,
}

/// A roster mutation requested during `update`.
///
/// Effects are collected while every agent updates and applied afterwards in
/// emission order, so no agent observes another's mid-phase changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Remove the agent from the roster at the end of the tick.
    Retire(AgentId),

    /// Instantiate a responder; it joins the roster for the next tick.
    Spawn(SpawnRequest),

    /// The dispatcher received this navigator's alert; clear it.
    AcknowledgeAlert(AgentId),

    /// A responder finished its job; decrement its creator's live counter.
    ResponderFinished { creator: AgentId },
}
