//! `nh-env`: the shared world every agent perceives and mutates.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`environment`] | `NetworkEnvironment`: graph, illness, heat, hitpoints      |
//! | [`vertex`]      | `VertexState`, `VertexView`, heat levels                    |
//! | [`illness`]     | `Illness` label, `IllnessCatalog`                           |
//! | [`reservation`] | `ReservationBoard`: per-tick next-vertex claims            |
//! | [`error`]       | `EnvError`, `EnvResult<T>`                                  |
//!
//! # Heat model
//!
//! Heat is a navigation cue derived entirely from illness:
//!
//! | Vertex state                        | Heat  |
//! |-------------------------------------|-------|
//! | ill                                 | `1.0` |
//! | healthy, some adjacent vertex ill   | `0.5` |
//! | healthy, no adjacent vertex ill     | `0.0` |
//!
//! "Adjacent" ignores edge direction.  Every mutation that changes illness
//! recomputes heat for the vertex and its adjacent vertices, so the table
//! holds after every public call.

pub mod environment;
pub mod error;
pub mod illness;
pub mod reservation;
pub mod vertex;


pub use environment::NetworkEnvironment;
pub use error::{EnvError, EnvResult};
pub use illness::{Illness, IllnessCatalog};
pub use reservation::ReservationBoard;
pub use vertex::{VertexState, VertexView, HEAT_CLEAR, HEAT_ILL, HEAT_NEAR_ILL};
