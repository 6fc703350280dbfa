//! Scenario switching

use crate::scenario::{EmptyScenario, Scenario, ScenarioEvent, ScenarioKind, ScenarioReadout};
use mote_core::Result;
use mote_particles::EmitterRegistry;

/// Owns the active scenario and drives its hooks
pub struct SceneController {
    active: Box<dyn Scenario>,
}

impl SceneController {
    /// Starts in the idle scenario
    pub fn new() -> Self {
        Self {
            active: Box::new(EmptyScenario),
        }
    }

    pub fn current(&self) -> ScenarioKind {
        self.active.kind()
    }

    /// Leave the current scenario, clear the registry, and enter `kind`.
    ///
    /// The registry is cleared even if entering fails; the controller then
    /// falls back to the idle scenario.
    pub fn select(&mut self, kind: ScenarioKind, registry: &mut EmitterRegistry) -> Result<()> {
        self.active.exit(registry);
        registry.remove_all();

        let mut next = kind.build();
        if let Err(err) = next.enter(registry) {
            registry.remove_all();
            self.active = Box::new(EmptyScenario);
            return Err(err);
        }

        tracing::info!(scenario = %kind, "selected scenario");
        self.active = next;
        Ok(())
    }

    pub fn observe(&mut self, registry: &EmitterRegistry, dt: f32) -> Option<ScenarioEvent> {
        self.active.observe(registry, dt)
    }

    pub fn trigger(&mut self, registry: &mut EmitterRegistry) -> bool {
        self.active.trigger(registry)
    }

    pub fn readout(&self, registry: &EmitterRegistry) -> ScenarioReadout {
        self.active.readout(registry)
    }
}

impl Default for SceneController {
    fn default() -> Self {
        Self::new()
    }
}
