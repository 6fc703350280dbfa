//! CLI command implementations

pub mod check;
pub mod play;
pub mod run;

use anyhow::{Context, Result};
use mote_core::Vec3;
use mote_particles::EmitterConfig;
use mote_runtime::{SimCommand, SimulationSettings, SimulationState};
use mote_scene::{MotionReadout, ScenarioKind, ScenarioReadout};

/// Settings file plus command-line overrides
pub struct Tuning {
    pub config: Option<String>,
    pub gravity: Option<f32>,
    pub wind: Option<[f32; 3]>,
    pub wind_strength: Option<f32>,
    pub speed: Option<f32>,
    pub emitters: usize,
}

impl Tuning {
    pub fn settings(&self) -> Result<SimulationSettings> {
        let mut settings = match &self.config {
            Some(path) => SimulationSettings::load(path)
                .with_context(|| format!("Failed to load settings from {path}"))?,
            None => SimulationSettings::default(),
        };
        if let Some(gravity) = self.gravity {
            settings.gravity = gravity;
        }
        if let Some(wind) = self.wind {
            settings.wind_direction = wind;
        }
        if let Some(strength) = self.wind_strength {
            settings.wind_strength = strength;
        }
        if let Some(speed) = self.speed {
            settings.speed = speed;
        }
        Ok(settings)
    }

    /// Build the simulation, entering `scenario` (or the one from the settings file)
    /// before any emitters are created, then queue the extra default emitters
    pub fn build_state(
        &self,
        start: f64,
        scenario: Option<ScenarioKind>,
    ) -> Result<SimulationState> {
        let mut settings = self.settings()?;
        if let Some(kind) = scenario {
            settings.scenario = Some(kind.name().to_string());
        }
        let mut state = SimulationState::from_settings(&settings, start)
            .context("Failed to initialize simulation")?;
        for _ in 0..self.emitters {
            state.push(SimCommand::CreateEmitter(EmitterConfig::default()));
        }
        Ok(state)
    }
}

pub fn format_vec3(v: Vec3) -> String {
    format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z)
}

/// Human-readable lines for a scenario readout
pub fn readout_lines(readout: &ScenarioReadout) -> Vec<String> {
    match readout {
        ScenarioReadout::None => Vec::new(),
        ScenarioReadout::Motion(MotionReadout {
            particle_age,
            position,
            impact_time,
        }) => {
            let mut lines = Vec::new();
            match (particle_age, position) {
                (Some(age), Some(pos)) => {
                    lines.push(format!("particle age: {age:.2}"));
                    lines.push(format!("position: {}", format_vec3(*pos)));
                }
                _ => lines.push("no particle in flight".to_string()),
            }
            if let Some(time) = impact_time {
                lines.push(format!("Hit y=0 at {time:.2}s"));
            }
            lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_readout_lines() {
        let readout = ScenarioReadout::Motion(MotionReadout {
            particle_age: Some(4.5),
            position: Some(Vec3::new(0.0, -1.5, 0.0)),
            impact_time: Some(4.5),
        });
        let lines = readout_lines(&readout);
        assert_eq!(
            lines,
            vec![
                "particle age: 4.50".to_string(),
                "position: (0.00, -1.50, 0.00)".to_string(),
                "Hit y=0 at 4.50s".to_string(),
            ]
        );
    }

    #[test]
    fn empty_motion_readout() {
        let lines = readout_lines(&ScenarioReadout::Motion(MotionReadout::default()));
        assert_eq!(lines, vec!["no particle in flight".to_string()]);
        assert!(readout_lines(&ScenarioReadout::None).is_empty());
    }

    #[test]
    fn overrides_win_over_defaults() {
        let tuning = Tuning {
            config: None,
            gravity: Some(-1.0),
            wind: Some([0.0, 0.0, 1.0]),
            wind_strength: None,
            speed: Some(2.0),
            emitters: 2,
        };
        let settings = tuning.settings().unwrap();
        assert_eq!(settings.gravity, -1.0);
        assert_eq!(settings.wind_direction, [0.0, 0.0, 1.0]);
        assert_eq!(settings.speed, 2.0);

        let mut state = tuning.build_state(0.0, Some(ScenarioKind::Motion)).unwrap();
        state.step_fixed(0.0);
        assert_eq!(state.scene.current(), ScenarioKind::Motion);
        assert_eq!(state.registry.len(), 3);
    }
}
