//! `nh-network`: the circulatory network and its routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `VesselNetwork` (CSR multigraph), `VesselNetworkBuilder`    |
//! | [`router`]  | `Router` trait, `Path`, `DijkstraRouter`                    |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on `VesselNetwork` and `Path`.     |

pub mod error;
pub mod network;
pub mod router;


pub use error::{NetworkError, NetworkResult};
pub use network::{VesselNetwork, VesselNetworkBuilder};
pub use router::{DijkstraRouter, Path, Router};
