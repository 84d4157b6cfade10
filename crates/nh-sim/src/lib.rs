//! `nh-sim`: staged tick scheduler and simulation driver.
//!
//! # Tick protocol
//!
//! ```text
//! each tick:
//!   ① Health    : hitpoints -= |ill vertices|; halt at ≤ 0.
//!   ② Infection : maybe one healthy vertex falls ill.
//!   ③ Perceive  : every agent snapshots the world (parallel with `parallel`).
//!   ④ Act       : every agent decides, ascending AgentId; only the
//!                  reservation board is written.
//!   ⑤ Update    : every agent commits, ascending AgentId; cures land in the
//!                  environment, everything else becomes an Effect.
//!   ⑥ Effects   : acknowledge alerts, credit finished responders, retire.
//!   ⑦ Cleanup   : clear the reservation board.
//!   ⑧ Spawn     : requested responders join the roster for the next tick.
//! ```
//!
//! The roster a tick works on is fixed at ③: nothing joins or leaves until
//! ⑥, so no phase iterates a collection that changes underneath it.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the perceive phase on Rayon's thread pool.        |
//! | `fx-hash`  | FxHash for the co-location index and reservations.     |
//! | `serde`    | `Serialize`/`Deserialize` on `Metrics` and snapshots.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use nh_core::SimConfig;
//! use nh_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), network).build()?;
//! sim.run(&mut NoopObserver)?;
//! println!("{:?}", sim.metrics());
//! ```

pub mod builder;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod scheduler;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use metrics::{Metrics, VertexSnapshot};
pub use observer::{NoopObserver, SimObserver};
pub use scheduler::{StagedScheduler, TickReport};
pub use sim::Simulation;
