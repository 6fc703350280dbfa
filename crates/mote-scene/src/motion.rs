//! Free-fall accuracy scenario: one particle dropped from rest, timed to the ground

use crate::scenario::{Scenario, ScenarioEvent, ScenarioKind, ScenarioReadout};
use mote_core::{Color, EmitterId, Result, Vec3};
use mote_particles::{EmitterConfig, EmitterRegistry, ParticleKind, SpawnMode};

/// Height the particle is released from
pub const DROP_HEIGHT: f32 = 100.0;
/// The ground plane
pub const GROUND_HEIGHT: f32 = 0.0;

const PARTICLE_LIFETIME: f32 = 10.0;

/// Current state of the drop
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionReadout {
    /// Age of the falling particle, if one is in flight
    pub particle_age: Option<f32>,
    pub position: Option<Vec3>,
    /// Flight time at which the particle first reached the ground
    pub impact_time: Option<f32>,
}

pub struct MotionScenario {
    emitter: Option<EmitterId>,
    impact_time: Option<f32>,
}

impl MotionScenario {
    pub fn new() -> Self {
        Self {
            emitter: None,
            impact_time: None,
        }
    }

    pub fn emitter(&self) -> Option<EmitterId> {
        self.emitter
    }

    pub fn impact_time(&self) -> Option<f32> {
        self.impact_time
    }

    /// Single stationary particle, spawned only on demand
    pub fn emitter_config() -> EmitterConfig {
        EmitterConfig {
            name: "motion-demo".to_string(),
            origin: Vec3::new(0.0, DROP_HEIGHT, 0.0),
            velocity_min: Vec3::ZERO,
            velocity_max: Vec3::ZERO,
            kind: ParticleKind::Point,
            texture: String::new(),
            lifetime: PARTICLE_LIFETIME,
            color_start: Color::BLUE,
            color_end: Color::RED,
            color_variance: Color::TRANSPARENT,
            size_start: 100.0,
            size_end: 0.0,
            spawn: SpawnMode::OneShot {
                count: 1,
                rate: 0.0,
            },
            capacity: 1,
        }
    }
}

impl Default for MotionScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for MotionScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::Motion
    }

    fn enter(&mut self, registry: &mut EmitterRegistry) -> Result<()> {
        self.impact_time = None;
        self.emitter = Some(registry.create(Self::emitter_config())?);
        Ok(())
    }

    fn observe(&mut self, registry: &EmitterRegistry, _dt: f32) -> Option<ScenarioEvent> {
        if self.impact_time.is_some() {
            return None;
        }
        let head = registry.get(self.emitter?)?.head()?;
        if head.position.y > GROUND_HEIGHT {
            return None;
        }

        self.impact_time = Some(head.age);
        tracing::info!(time = head.age, "motion demo particle reached the ground");
        Some(ScenarioEvent::GroundImpact { time: head.age })
    }

    fn exit(&mut self, _registry: &mut EmitterRegistry) {
        self.emitter = None;
    }

    /// Release a particle if none is in flight
    fn trigger(&mut self, registry: &mut EmitterRegistry) -> bool {
        let Some(emitter) = self.emitter.and_then(|id| registry.get_mut(id)) else {
            return false;
        };
        if emitter.head().is_some() {
            return false;
        }
        if emitter.emit(1) == 0 {
            return false;
        }
        self.impact_time = None;
        true
    }

    fn readout(&self, registry: &EmitterRegistry) -> ScenarioReadout {
        let head = self
            .emitter
            .and_then(|id| registry.get(id))
            .and_then(|e| e.head());
        ScenarioReadout::Motion(MotionReadout {
            particle_age: head.map(|p| p.age),
            position: head.map(|p| p.position),
            impact_time: self.impact_time,
        })
    }
}
