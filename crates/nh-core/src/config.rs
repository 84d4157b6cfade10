//! Run configuration.
//!
//! `SimConfig` carries every option the external driver may set.  Values are
//! checked once by [`SimConfig::validate`] when the simulation is built, so a
//! bad configuration fails before any tick runs.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult, VertexId};

// ── NavigatorVariant ──────────────────────────────────────────────────────────

/// Which navigating-agent behavior to instantiate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum NavigatorVariant {
    /// Reactive heat-follower.
    #[default]
    Basic,
    /// Heat-follower that reserves its next vertex so co-located peers spread
    /// out instead of colliding.
    Coordinating,
}

impl NavigatorVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            NavigatorVariant::Basic        => "basic",
            NavigatorVariant::Coordinating => "coordinating",
        }
    }
}

impl FromStr for NavigatorVariant {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "basic"        => Ok(NavigatorVariant::Basic),
            "coordinating" => Ok(NavigatorVariant::Coordinating),
            other => Err(CoreError::Config(format!(
                "unrecognized navigator variant {other:?} (expected \"basic\" or \"coordinating\")"
            ))),
        }
    }
}

impl TryFrom<String> for NavigatorVariant {
    type Error = CoreError;

    fn try_from(s: String) -> CoreResult<Self> {
        s.parse()
    }
}

impl From<NavigatorVariant> for String {
    fn from(v: NavigatorVariant) -> String {
        v.as_str().to_owned()
    }
}

impl fmt::Display for NavigatorVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically deserialized from a config file by the driver (with the `serde`
/// feature) or built from [`SimConfig::default`] with a few overrides.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Number of navigating agents created at model start.
    pub agent_count: usize,

    /// Global health at tick 0.  The run halts once it drops to zero.
    pub initial_hitpoints: i64,

    /// Per-tick probability that a new vertex falls ill (while below the cap).
    pub illness_chance: f64,

    /// Upper bound on simultaneously ill vertices.
    pub max_ill_vertices: usize,

    /// Vertex hosting the dispatcher.  `None` picks one uniformly at random.
    pub factory_location: Option<VertexId>,

    /// Energy every navigator starts with; also the regeneration cap.
    pub initial_energy: i64,

    /// Energy regained after each move along a with-flow vessel.
    pub recharge_amount: i64,

    /// Navigator behavior selection.
    pub variant: NavigatorVariant,

    /// Probability of a wrong turn at a junction.  `0.0` disables the rule.
    pub wrong_turn_chance: f64,

    /// Labels an injected illness is drawn from.
    pub illness_catalog: Vec<String>,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// External step limit.  `None` runs until hitpoints are exhausted.
    pub max_ticks: Option<u64>,

    /// Emit a vertex snapshot every N ticks.  `0` disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            agent_count:             4,
            initial_hitpoints:       60,
            illness_chance:          0.1,
            max_ill_vertices:        3,
            factory_location:        None,
            initial_energy:          100,
            recharge_amount:         1,
            variant:                 NavigatorVariant::Basic,
            wrong_turn_chance:       0.0,
            illness_catalog:         ["bacterial", "viral", "fungal", "parasitic"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            seed:                    42,
            max_ticks:               Some(1_000),
            snapshot_interval_ticks: 0,
        }
    }
}

impl SimConfig {
    /// Reject out-of-range values for a network of `vertex_count` vertices.
    pub fn validate(&self, vertex_count: usize) -> CoreResult<()> {
        if vertex_count == 0 {
            return Err(CoreError::Config("network has no vertices".into()));
        }
        if self.initial_hitpoints <= 0 {
            return Err(CoreError::Config(format!(
                "initial_hitpoints must be positive, got {}",
                self.initial_hitpoints
            )));
        }
        check_probability("illness_chance", self.illness_chance)?;
        check_probability("wrong_turn_chance", self.wrong_turn_chance)?;
        if self.initial_energy <= 0 {
            return Err(CoreError::Config(format!(
                "initial_energy must be positive, got {}",
                self.initial_energy
            )));
        }
        if self.recharge_amount < 0 {
            return Err(CoreError::Config(format!(
                "recharge_amount must not be negative, got {}",
                self.recharge_amount
            )));
        }
        if let Some(factory) = self.factory_location {
            if factory.index() >= vertex_count {
                return Err(CoreError::Config(format!(
                    "factory location {factory} outside a network of {vertex_count} vertices"
                )));
            }
        }
        if self.illness_catalog.is_empty() {
            return Err(CoreError::Config("illness catalog is empty".into()));
        }
        Ok(())
    }
}

fn check_probability(name: &str, p: f64) -> CoreResult<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(CoreError::Config(format!("{name} must lie in [0, 1], got {p}")))
    }
}
