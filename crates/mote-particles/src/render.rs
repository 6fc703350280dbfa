//! Packed draw data handed to the renderer once per frame

use crate::particle::{ParticleInstance, ParticleKind};
use mote_core::{Color, EmitterId, Vec3};

/// Length of each axis gizmo line
pub const AXIS_SIZE: f32 = 5000.0;

/// A contiguous run of instances belonging to one emitter
#[derive(Debug, Clone, PartialEq)]
pub struct DrawBatch {
    pub emitter: EmitterId,
    pub kind: ParticleKind,
    pub texture: String,
    pub start: usize,
    pub count: usize,
}

/// One colored line of the axis overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLine {
    pub from: Vec3,
    pub to: Vec3,
    pub color: Color,
}

/// Everything the renderer needs for one frame, in emitter insertion order.
/// No depth sorting is performed.
#[derive(Debug, Default)]
pub struct RenderFrame {
    pub instances: Vec<ParticleInstance>,
    pub batches: Vec<DrawBatch>,
    pub axis: Vec<AxisLine>,
}

impl RenderFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for reuse, keeping allocations
    pub fn clear(&mut self) {
        self.instances.clear();
        self.batches.clear();
        self.axis.clear();
    }

    /// Instances of one batch
    pub fn batch_instances(&self, batch: &DrawBatch) -> &[ParticleInstance] {
        &self.instances[batch.start..batch.start + batch.count]
    }

    /// Add the red/green/blue X/Y/Z lines from the origin
    pub fn push_axis_gizmo(&mut self) {
        self.axis.extend([
            AxisLine {
                from: Vec3::ZERO,
                to: Vec3::new(AXIS_SIZE, 0.0, 0.0),
                color: Color::RED,
            },
            AxisLine {
                from: Vec3::ZERO,
                to: Vec3::new(0.0, AXIS_SIZE, 0.0),
                color: Color::GREEN,
            },
            AxisLine {
                from: Vec3::ZERO,
                to: Vec3::new(0.0, 0.0, AXIS_SIZE),
                color: Color::BLUE,
            },
        ]);
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty() && self.axis.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_gizmo_has_three_lines() {
        let mut frame = RenderFrame::new();
        assert!(frame.is_empty());
        frame.push_axis_gizmo();
        assert_eq!(frame.axis.len(), 3);
        assert_eq!(frame.axis[1].to, Vec3::new(0.0, AXIS_SIZE, 0.0));
        assert_eq!(frame.axis[1].color, Color::GREEN);
        frame.clear();
        assert!(frame.is_empty());
    }
}
