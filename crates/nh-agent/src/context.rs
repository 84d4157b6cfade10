//! Per-phase views handed to agents by the scheduler.

use nh_core::{AgentId, SimRng, Tick};
use nh_env::{NetworkEnvironment, ReservationBoard};

use crate::{AgentKind, Alert, Effect};

/// Read-only world state for the perceive phase.
///
/// Built once per tick and shared by every agent; with the `parallel`
/// feature of `nh-sim` it is shared across Rayon workers.
pub struct WorldView<'a> {
    pub tick: Tick,
    pub env:  &'a NetworkEnvironment,
}

impl<'a> WorldView<'a> {
    #[inline]
    pub fn new(tick: Tick, env: &'a NetworkEnvironment) -> Self {
        Self { tick, env }
    }
}

/// Another agent standing on the same vertex at the start of the tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Peer {
    pub id:    AgentId,
    pub kind:  AgentKind,
    /// Undelivered alert the peer carries, if it is a navigator.
    pub alert: Option<Alert>,
}

/// Mutable inputs of the act phase.
pub struct ActContext<'a> {
    pub tick:         Tick,
    pub rng:          &'a mut SimRng,
    /// Per-tick next-vertex claims; the only shared state `act` may write.
    pub reservations: &'a mut ReservationBoard,
}

/// Mutable inputs of the update phase.
pub struct UpdateContext<'a> {
    pub tick:    Tick,
    pub env:     &'a mut NetworkEnvironment,
    /// Cross-agent requests, applied by the scheduler after the phase.
    pub effects: &'a mut Vec<Effect>,
}
