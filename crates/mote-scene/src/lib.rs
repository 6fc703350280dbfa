//! Mote Scene - named demo scenarios
//!
//! A scenario configures the emitter registry when entered, watches it after
//! every physics step, and reports scenario-specific readouts:
//! - `Scenario`: enter / observe / exit hooks plus a manual trigger
//! - `ScenarioKind`: the closed set of selectable scenarios
//! - `SceneController`: switches scenarios, clearing the registry in between

mod controller;
mod motion;
mod scenario;

pub use controller::SceneController;
pub use motion::{MotionReadout, MotionScenario, DROP_HEIGHT, GROUND_HEIGHT};
pub use scenario::{EmptyScenario, Scenario, ScenarioEvent, ScenarioKind, ScenarioReadout};
