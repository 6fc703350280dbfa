//! Mote Particles - CPU particle simulation
//!
//! Provides the emitter/particle lifecycle and per-tick physics:
//! - Semi-implicit Euler integration under gravity and wind
//! - Ordered, capacity-bounded particle pools with a stable head particle
//! - Continuous and one-shot spawning with fractional accumulation
//! - Color/size over lifetime and instance packing for point-sprite rendering

pub mod curves;
pub mod emitter;
pub mod field;
pub mod particle;
pub mod rand;
pub mod registry;
pub mod render;

pub use emitter::{Emitter, EmitterConfig, SpawnMode};
pub use field::AmbientField;
pub use particle::{Particle, ParticleInstance, ParticleKind, ParticlePool};
pub use registry::EmitterRegistry;
pub use render::{AxisLine, DrawBatch, RenderFrame};
