//! Ambient forces shared by every particle in a simulation

use mote_core::Vec3;

/// Global gravity and wind. Read-only from an emitter's point of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientField {
    /// Acceleration along the vertical (+Y) axis
    pub gravity: f32,
    /// Wind direction; only its direction matters, it is normalized when applied
    pub wind_direction: Vec3,
    pub wind_strength: f32,
}

impl Default for AmbientField {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            wind_direction: Vec3::new(10.0, 0.0, 0.0),
            wind_strength: 0.0,
        }
    }
}

impl AmbientField {
    /// Gravity with the wind switched off
    pub fn calm(gravity: f32) -> Self {
        Self {
            gravity,
            wind_strength: 0.0,
            ..Self::default()
        }
    }

    /// Combined acceleration applied to every particle
    pub fn acceleration(&self) -> Vec3 {
        Vec3::UP * self.gravity + self.wind_direction.normalized() * self.wind_strength
    }
}
