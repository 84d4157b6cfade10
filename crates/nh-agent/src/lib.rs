//! `nh-agent`: the agents that live on the vessel network.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                         |
//! |----------------|------------------------------------------------------------------|
//! | [`context`]    | `WorldView`, `ActContext`, `UpdateContext`, `Peer`               |
//! | [`effect`]     | `Effect`, `SpawnRequest`, `Alert`: cross-agent requests         |
//! | [`model`]      | `StagedAgent` trait, `Agent` enum, `AgentKind`                   |
//! | [`navigator`]  | `Navigator`: patrolling / alerting helpers (basic, coordinating)|
//! | [`dispatcher`] | `Dispatcher`: triage, known-disease library, deferred queue     |
//! | [`responder`]  | `Responder`: travels to one ill vertex and cures it             |
//! | [`error`]      | `AgentError`, `AgentResult<T>`                                   |
//!
//! # Design notes
//!
//! Every agent runs the same three steps each tick, driven by `nh-sim`:
//!
//! 1. **Perceive**: copy what the agent needs out of the environment into a
//!    private percept.  Only `&NetworkEnvironment` is available.
//! 2. **Act**: decide from the percept alone.  The only shared state an
//!    agent may touch is the per-tick `ReservationBoard`.
//! 3. **Update**: commit the decision.  Anything that concerns another
//!    agent (alert acknowledgement, spawning, retirement, responder
//!    bookkeeping) is pushed as an [`Effect`] and applied by the scheduler
//!    after every agent has updated.

pub mod context;
pub mod dispatcher;
pub mod effect;
pub mod error;
pub mod model;
pub mod navigator;
pub mod responder;

#[cfg(test)]
mod tests;

pub use context::{ActContext, Peer, UpdateContext, WorldView};
pub use dispatcher::Dispatcher;
pub use effect::{Alert, Effect, SpawnRequest};
pub use error::{AgentError, AgentResult};
pub use model::{Agent, AgentKind, StagedAgent};
pub use navigator::{Decision, NavigatorState, Navigator, NavigatorPercept, NeighborPercept};
pub use responder::Responder;
