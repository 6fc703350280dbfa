//! Scenario trait and the set of built-in scenarios

use crate::motion::{MotionReadout, MotionScenario};
use mote_core::{MoteError, Result};
use mote_particles::EmitterRegistry;
use std::fmt;
use std::str::FromStr;

/// The selectable scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScenarioKind {
    #[default]
    None,
    /// A single particle dropped from rest, timed until it reaches the ground
    Motion,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 2] = [ScenarioKind::None, ScenarioKind::Motion];

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::None => "none",
            ScenarioKind::Motion => "motion",
        }
    }

    /// Fresh, not yet entered instance of this scenario
    pub fn build(self) -> Box<dyn Scenario> {
        match self {
            ScenarioKind::None => Box::new(EmptyScenario),
            ScenarioKind::Motion => Box::new(MotionScenario::new()),
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioKind {
    type Err = MoteError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| MoteError::UnknownScenario(s.to_string()))
    }
}

/// Something a scenario noticed while observing a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScenarioEvent {
    /// The tracked particle reached the ground after `time` seconds of flight
    GroundImpact { time: f32 },
}

/// Scenario-specific values for display
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioReadout {
    None,
    Motion(MotionReadout),
}

/// A demo scenario.
///
/// `enter` runs on an empty registry, `observe` once per tick after the physics
/// update, and `exit` before the registry is cleared for the next scenario.
pub trait Scenario {
    fn kind(&self) -> ScenarioKind;

    /// Populate the (already cleared) registry
    fn enter(&mut self, registry: &mut EmitterRegistry) -> Result<()>;

    /// Per-tick bookkeeping after `update_all`
    fn observe(&mut self, registry: &EmitterRegistry, dt: f32) -> Option<ScenarioEvent>;

    /// Called before the scenario is replaced
    fn exit(&mut self, _registry: &mut EmitterRegistry) {}

    /// Manual start action. Returns true if it did anything.
    fn trigger(&mut self, _registry: &mut EmitterRegistry) -> bool {
        false
    }

    fn readout(&self, registry: &EmitterRegistry) -> ScenarioReadout;
}

/// The idle scenario: no emitters, nothing to observe
pub struct EmptyScenario;

impl Scenario for EmptyScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::None
    }

    fn enter(&mut self, _registry: &mut EmitterRegistry) -> Result<()> {
        Ok(())
    }

    fn observe(&mut self, _registry: &EmitterRegistry, _dt: f32) -> Option<ScenarioEvent> {
        None
    }

    fn readout(&self, _registry: &EmitterRegistry) -> ScenarioReadout {
        ScenarioReadout::None
    }
}
