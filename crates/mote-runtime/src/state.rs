//! The single owner of all simulation state

use crate::clock::SimulationClock;
use crate::command::{CommandQueue, SimCommand};
use crate::settings::SimulationSettings;
use crate::stats::FrameStats;
use mote_core::Result;
use mote_particles::{AmbientField, EmitterRegistry, RenderFrame};
use mote_scene::{SceneController, ScenarioEvent, ScenarioReadout};

/// What one tick did
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Scaled simulation delta applied to the emitters
    pub dt: f64,
    pub event: Option<ScenarioEvent>,
}

/// Registry, ambient field, clock and scene for one running simulation.
///
/// All mutation happens on the thread that owns this value. UI input is queued
/// as [`SimCommand`]s and applied at the start of the next step, never in the
/// middle of an update.
pub struct SimulationState {
    pub registry: EmitterRegistry,
    pub field: AmbientField,
    pub clock: SimulationClock,
    pub scene: SceneController,
    pub commands: CommandQueue,
    pub stats: FrameStats,
    pub draw_axis: bool,
}

impl SimulationState {
    /// Fresh simulation with default settings, clock started at `start`
    pub fn new(start: f64) -> Self {
        let settings = SimulationSettings::default();
        Self::bare(&settings, start)
    }

    /// Build from settings, creating the configured emitters and entering the
    /// configured scenario
    pub fn from_settings(settings: &SimulationSettings, start: f64) -> Result<Self> {
        let configs = settings.emitter_configs()?;
        let scenario = settings.scenario_kind()?;

        let mut state = Self::bare(settings, start);
        if let Some(kind) = scenario {
            state.scene.select(kind, &mut state.registry)?;
        }
        for config in configs {
            state.registry.create(config)?;
        }
        Ok(state)
    }

    fn bare(settings: &SimulationSettings, start: f64) -> Self {
        let mut clock = SimulationClock::new(start);
        clock.speed = settings.speed;
        clock.clamp_first_tick = settings.clamp_first_tick;
        Self {
            registry: EmitterRegistry::with_seed(settings.seed),
            field: settings.field(),
            clock,
            scene: SceneController::new(),
            commands: CommandQueue::new(),
            stats: FrameStats::new(),
            draw_axis: settings.draw_axis,
        }
    }

    /// Queue a command for the next step
    pub fn push(&mut self, command: SimCommand) {
        self.commands.push(command);
    }

    /// One real-time tick: apply queued commands, measure dt from `now`, update, observe
    pub fn step(&mut self, now: f64) -> StepReport {
        self.apply_commands();
        let dt = self.clock.tick(now);
        self.stats.record_frame(now, self.clock.frame_time);
        self.advance(dt)
    }

    /// One tick with an explicit unscaled interval, for headless runs
    pub fn step_fixed(&mut self, raw_dt: f64) -> StepReport {
        self.apply_commands();
        let dt = self.clock.tick_fixed(raw_dt);
        self.advance(dt)
    }

    /// Pack the current frame for the renderer
    pub fn render(&self) -> RenderFrame {
        let mut frame = RenderFrame::new();
        self.render_into(&mut frame);
        frame
    }

    pub fn render_into(&self, frame: &mut RenderFrame) {
        self.registry.render_into(frame);
        frame.axis.clear();
        if self.draw_axis {
            frame.push_axis_gizmo();
        }
    }

    pub fn readout(&self) -> ScenarioReadout {
        self.scene.readout(&self.registry)
    }

    /// Apply every queued command in order. A rejected command is logged and skipped.
    pub fn apply_commands(&mut self) {
        for command in self.commands.drain() {
            if let Err(err) = self.apply(command) {
                tracing::warn!(error = %err, "rejected command");
            }
        }
    }

    fn apply(&mut self, command: SimCommand) -> Result<()> {
        match command {
            SimCommand::CreateEmitter(config) => {
                self.registry.create(config)?;
            }
            SimCommand::RemoveEmitter(id) => {
                if !self.registry.remove(id) {
                    tracing::warn!(emitter = %id, "remove: no such emitter");
                }
            }
            SimCommand::ClearAll => self.registry.remove_all(),
            SimCommand::SetGravity(gravity) => self.field.gravity = gravity,
            SimCommand::SetWindDirection(direction) => self.field.wind_direction = direction,
            SimCommand::SetWindStrength(strength) => self.field.wind_strength = strength,
            SimCommand::SetSpeed(speed) => self.clock.speed = speed,
            SimCommand::SetDrawAxis(draw) => self.draw_axis = draw,
            SimCommand::SelectScenario(kind) => self.scene.select(kind, &mut self.registry)?,
            SimCommand::TriggerScenario => {
                if !self.scene.trigger(&mut self.registry) {
                    tracing::debug!(scenario = %self.scene.current(), "trigger ignored");
                }
            }
            SimCommand::Emit { emitter, count } => match self.registry.get_mut(emitter) {
                Some(e) => {
                    e.emit(count);
                }
                None => tracing::warn!(emitter = %emitter, "emit: no such emitter"),
            },
        }
        Ok(())
    }

    fn advance(&mut self, dt: f64) -> StepReport {
        self.registry.update_all(dt as f32, &self.field);
        let event = self.scene.observe(&self.registry, dt as f32);
        StepReport { dt, event }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mote_core::{EmitterId, Vec3};
    use mote_particles::{EmitterConfig, SpawnMode};
    use mote_scene::ScenarioKind;

    #[test]
    fn commands_apply_in_order_before_update() {
        let mut state = SimulationState::new(0.0);
        state.push(SimCommand::SetGravity(-1.0));
        state.push(SimCommand::SetGravity(-2.0));
        state.push(SimCommand::CreateEmitter(EmitterConfig::default()));
        assert_eq!(state.commands.len(), 3);

        state.step(0.0);
        assert!(state.commands.is_empty());
        assert!((state.field.gravity + 2.0).abs() < 1e-6);
        assert_eq!(state.registry.len(), 1);
    }

    #[test]
    fn rejected_command_does_not_block_queue() {
        let mut state = SimulationState::new(0.0);
        state.push(SimCommand::CreateEmitter(EmitterConfig {
            lifetime: -1.0,
            ..Default::default()
        }));
        state.push(SimCommand::SetWindStrength(4.0));
        state.push(SimCommand::RemoveEmitter(EmitterId::from_raw(99)));
        state.step_fixed(0.1);
        assert!(state.registry.is_empty());
        assert_eq!(state.field.wind_strength, 4.0);
    }

    #[test]
    fn first_real_time_tick_is_clamped() {
        let mut state = SimulationState::new(0.0);
        let report = state.step(5.0);
        assert_eq!(report.dt, 0.0);
        let report = state.step(5.5);
        assert!((report.dt - 0.5).abs() < 1e-12);
    }

    #[test]
    fn motion_scenario_end_to_end() {
        let mut state = SimulationState::new(0.0);
        state.push(SimCommand::SelectScenario(ScenarioKind::Motion));
        state.push(SimCommand::TriggerScenario);

        let mut impacts = Vec::new();
        for _ in 0..80 {
            if let Some(event) = state.step_fixed(0.1).event {
                impacts.push(event);
            }
        }
        assert_eq!(impacts.len(), 1);
        let ScenarioEvent::GroundImpact { time } = impacts[0];
        assert!(time > 4.4 && time < 4.6, "impact at {time}");
    }

    #[test]
    fn clear_all_leaves_empty_frame() {
        let mut state = SimulationState::new(0.0);
        state.draw_axis = false;
        for i in 0..3 {
            state.push(SimCommand::CreateEmitter(EmitterConfig {
                origin: Vec3::new(i as f32, 0.0, 0.0),
                ..Default::default()
            }));
        }
        state.step_fixed(0.1);
        assert!(state.registry.iter().all(|e| e.alive_count() >= 1));

        state.push(SimCommand::ClearAll);
        state.step_fixed(0.1);
        assert_eq!(state.registry.iter().count(), 0);
        assert!(state.render().is_empty());
    }

    #[test]
    fn axis_gizmo_follows_toggle() {
        let mut state = SimulationState::new(0.0);
        assert_eq!(state.render().axis.len(), 3);
        state.push(SimCommand::SetDrawAxis(false));
        state.step_fixed(0.0);
        assert!(state.render().axis.is_empty());
    }

    #[test]
    fn speed_multiplier_matches_longer_interval() {
        let config = EmitterConfig {
            spawn: SpawnMode::Continuous { rate: 40.0 },
            ..Default::default()
        };
        let mut fast = SimulationState::new(0.0);
        let mut slow = SimulationState::new(0.0);
        fast.push(SimCommand::SetSpeed(2.0));
        fast.push(SimCommand::CreateEmitter(config.clone()));
        slow.push(SimCommand::CreateEmitter(config));

        let period = 0.0625;
        for k in 0..=20 {
            let fast_report = fast.step(period * k as f64);
            let slow_report = slow.step(2.0 * period * k as f64);
            assert!((fast_report.dt - slow_report.dt).abs() < 1e-12);
        }

        let positions = |state: &SimulationState| -> Vec<Vec3> {
            state
                .registry
                .iter()
                .flat_map(|e| e.particles().iter().map(|p| p.position))
                .collect()
        };
        let a = positions(&fast);
        let b = positions(&slow);
        assert!(!a.is_empty());
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.iter().zip(&b) {
            assert!((*pa - *pb).length() < 1e-4);
        }
    }

    #[test]
    fn settings_seed_emitters_and_scenario() {
        let settings = SimulationSettings::from_toml_str(
            r#"
scenario = "motion"
speed = 3.0

[[emitters]]
name = "extra"
"#,
        )
        .unwrap();
        let state = SimulationState::from_settings(&settings, 0.0).unwrap();
        assert_eq!(state.scene.current(), ScenarioKind::Motion);
        assert_eq!(state.registry.len(), 2);
        assert_eq!(state.clock.speed, 3.0);
    }

    #[test]
    fn one_shot_emit_command() {
        let mut state = SimulationState::new(0.0);
        state.push(SimCommand::CreateEmitter(EmitterConfig {
            spawn: SpawnMode::OneShot { count: 3, rate: 0.0 },
            ..Default::default()
        }));
        state.step_fixed(0.1);
        let id = state.registry.iter().next().unwrap().id();
        state.push(SimCommand::Emit { emitter: id, count: 2 });
        state.step_fixed(0.1);
        assert_eq!(state.registry.particle_count(), 2);
    }
}
