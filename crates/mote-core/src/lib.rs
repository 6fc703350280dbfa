//! Mote Core - Foundational types for the mote particle simulator
//!
//! This crate provides the core types that all other mote crates depend on:
//! - `EmitterId` - Registry-issued emitter handles
//! - `Vec3`, `Color` - Spatial and color types
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{MoteError, Result};
pub use id::EmitterId;
pub use types::{Color, Vec3};
