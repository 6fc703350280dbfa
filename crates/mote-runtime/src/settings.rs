//! Simulation settings loaded from TOML

use mote_core::{MoteError, Result, Vec3};
use mote_particles::{AmbientField, EmitterConfig};
use mote_scene::ScenarioKind;
use serde::Deserialize;
use std::path::Path;

/// Startup tunables. Every key is optional.
///
/// ```toml
/// gravity = -9.81
/// wind_direction = [10, 0, 0]
/// wind_strength = 0
/// speed = 1
/// scenario = "motion"
///
/// [[emitters]]
/// name = "fountain"
/// velocity_min = [-2, 8, -2]
/// velocity_max = [2, 12, 2]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub gravity: f32,
    pub wind_direction: [f32; 3],
    pub wind_strength: f32,
    pub speed: f32,
    pub draw_axis: bool,
    pub seed: u32,
    pub clamp_first_tick: bool,
    pub scenario: Option<String>,
    /// Raw emitter tables, parsed by `EmitterConfig::from_toml`
    pub emitters: Vec<toml::value::Table>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            wind_direction: [10.0, 0.0, 0.0],
            wind_strength: 0.0,
            speed: 1.0,
            draw_axis: true,
            seed: 0x5EED_F00D,
            clamp_first_tick: true,
            scenario: None,
            emitters: Vec::new(),
        }
    }
}

impl SimulationSettings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn field(&self) -> AmbientField {
        AmbientField {
            gravity: self.gravity,
            wind_direction: Vec3::from_array(self.wind_direction),
            wind_strength: self.wind_strength,
        }
    }

    /// Parse and validate every `[[emitters]]` table
    pub fn emitter_configs(&self) -> Result<Vec<EmitterConfig>> {
        self.emitters
            .iter()
            .enumerate()
            .map(|(i, table)| {
                EmitterConfig::from_toml(table).map_err(|err| match err {
                    MoteError::InvalidConfig(msg) => {
                        MoteError::InvalidConfig(format!("emitters[{i}]: {msg}"))
                    }
                    other => other,
                })
            })
            .collect()
    }

    pub fn scenario_kind(&self) -> Result<Option<ScenarioKind>> {
        self.scenario
            .as_deref()
            .map(|s| s.parse::<ScenarioKind>())
            .transpose()
    }
}
