//! Particle types: CPU simulation state and packed instance data

use crate::curves::{lerp_f32, life_ratio};
use crate::field::AmbientField;
use bytemuck::{Pod, Zeroable};
use mote_core::{Color, Vec3};

/// Upper bound on up-front pool allocation; larger pools grow on demand
const MAX_PREALLOCATED: usize = 4096;

/// How a particle is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParticleKind {
    #[default]
    Point,
    /// Textured quad; the texture comes from the owning emitter
    Sprite,
}

impl ParticleKind {
    pub fn name(&self) -> &'static str {
        match self {
            ParticleKind::Point => "point",
            ParticleKind::Sprite => "sprite",
        }
    }
}

/// CPU-side particle state
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Spawn order within the owning emitter
    pub serial: u64,
    pub position: Vec3,
    pub velocity: Vec3,
    pub age: f32,
    pub lifetime: f32,
    pub color_start: Color,
    pub color_end: Color,
    pub size_start: f32,
    pub size_end: f32,
    pub kind: ParticleKind,
}

impl Particle {
    fn unborn(serial: u64) -> Self {
        Self {
            serial,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            age: 0.0,
            lifetime: 0.0,
            color_start: Color::WHITE,
            color_end: Color::WHITE,
            size_start: 0.0,
            size_end: 0.0,
            kind: ParticleKind::Point,
        }
    }

    /// Semi-implicit Euler step: velocity first, then position with the new velocity.
    /// Negative `dt` is treated as zero.
    pub fn advance(&mut self, dt: f32, field: &AmbientField) {
        let dt = dt.max(0.0);
        self.velocity += field.acceleration() * dt;
        self.position += self.velocity * dt;
        self.age += dt;
    }

    pub fn is_dead(&self) -> bool {
        self.age > self.lifetime
    }

    /// Normalized age in [0, 1]
    pub fn age_ratio(&self) -> f32 {
        life_ratio(self.age, self.lifetime)
    }

    pub fn current_color(&self) -> Color {
        Color::lerp(self.color_start, self.color_end, self.age_ratio())
    }

    pub fn current_size(&self) -> f32 {
        lerp_f32(self.size_start, self.size_end, self.age_ratio())
    }
}

/// Packed per-particle draw record.
/// 32 bytes, two rows of vec4.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// World position + size packed into vec4
    pub pos_size: [f32; 4], // xyz = position, w = size
    /// Color with alpha
    pub color: [f32; 4], // rgba
}

impl ParticleInstance {
    pub fn from_particle(p: &Particle) -> Self {
        Self {
            pos_size: [p.position.x, p.position.y, p.position.z, p.current_size()],
            color: p.current_color().to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.pos_size[0], self.pos_size[1], self.pos_size[2])
    }

    pub fn size(&self) -> f32 {
        self.pos_size[3]
    }
}

/// Ordered, capacity-bounded particle store.
///
/// Removal keeps spawn order, so index 0 is always the oldest survivor.
pub struct ParticlePool {
    particles: Vec<Particle>,
    capacity: usize,
    next_serial: u64,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity.min(MAX_PREALLOCATED)),
            capacity,
            next_serial: 0,
        }
    }

    pub fn alive_count(&self) -> usize {
        self.particles.len()
    }

    pub fn is_full(&self) -> bool {
        self.particles.len() >= self.capacity
    }

    /// Spawn one particle, returning a mutable ref to initialize it.
    /// Returns None if pool is full.
    pub fn spawn(&mut self) -> Option<&mut Particle> {
        if self.is_full() {
            return None;
        }
        let serial = self.next_serial;
        self.next_serial += 1;
        self.particles.push(Particle::unborn(serial));
        self.particles.last_mut()
    }

    /// Drop every dead particle, keeping the order of survivors.
    /// Returns how many were removed.
    pub fn cull_dead(&mut self) -> usize {
        let before = self.particles.len();
        self.particles.retain(|p| !p.is_dead());
        before - self.particles.len()
    }

    /// Oldest surviving particle
    pub fn head(&self) -> Option<&Particle> {
        self.particles.first()
    }

    /// Access alive particles slice for reading
    pub fn alive_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Access alive particles mutably
    pub fn alive_slice_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}
