//! `nh-core`: foundational types for the `nanoheal` simulation.
//!
//! This crate is a dependency of every other `nh-*` crate.  It intentionally
//! has no `nh-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `VertexId`, `EdgeId`                       |
//! | [`time`]        | `Tick`                                                |
//! | [`flow`]        | `FlowClass` (with / against the circulation)          |
//! | [`rng`]         | `SimRng`: the single seedable randomness source      |
//! | [`config`]      | `SimConfig`, `NavigatorVariant`                       |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod flow;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{NavigatorVariant, SimConfig};
pub use error::{CoreError, CoreResult};
pub use flow::FlowClass;
pub use ids::{AgentId, EdgeId, VertexId};
pub use rng::SimRng;
pub use time::Tick;
