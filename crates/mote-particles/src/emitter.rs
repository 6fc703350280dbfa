//! Emitter configuration (parsed from TOML) and runtime state

use crate::field::AmbientField;
use crate::particle::{Particle, ParticleInstance, ParticleKind, ParticlePool};
use crate::rand::ParticleRng;
use mote_core::{Color, EmitterId, MoteError, Result, Vec3};

/// How an emitter spawns on its own during `update`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnMode {
    /// `rate` particles per second, forever
    Continuous { rate: f32 },
    /// `rate` particles per second until `count` have been spawned automatically.
    /// With `rate == 0` nothing is spawned unless `emit` is called directly.
    OneShot { count: u32, rate: f32 },
}

impl SpawnMode {
    pub fn rate(&self) -> f32 {
        match *self {
            SpawnMode::Continuous { rate } | SpawnMode::OneShot { rate, .. } => rate,
        }
    }
}

/// Full configuration of one emitter, fixed at construction
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterConfig {
    pub name: String,
    pub origin: Vec3,
    /// Spawn velocity is drawn uniformly per axis from `velocity_min..=velocity_max`
    pub velocity_min: Vec3,
    pub velocity_max: Vec3,
    pub kind: ParticleKind,
    /// Texture used for sprites; also the batch grouping key for the renderer
    pub texture: String,
    pub lifetime: f32,
    pub color_start: Color,
    pub color_end: Color,
    /// Per-channel jitter applied to `color_start` at spawn
    pub color_variance: Color,
    pub size_start: f32,
    pub size_end: f32,
    pub spawn: SpawnMode,
    /// Maximum live particles
    pub capacity: usize,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            name: "emitter".to_string(),
            origin: Vec3::ZERO,
            velocity_min: Vec3::ZERO,
            velocity_max: Vec3::new(10.0, 10.0, 10.0),
            kind: ParticleKind::Point,
            texture: String::new(),
            lifetime: 4.0,
            color_start: Color::new(0.0, 0.3, 1.0, 1.0),
            color_end: Color::new(1.0, 1.0, 1.0, 0.0),
            color_variance: Color::new(0.1, 0.1, 0.1, 0.0),
            size_start: 0.5,
            size_end: 0.1,
            spawn: SpawnMode::Continuous { rate: 1000.0 },
            capacity: 1000,
        }
    }
}

impl EmitterConfig {
    /// Parse an EmitterConfig from a TOML table. Missing keys keep their defaults.
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = table.get("name").and_then(|v| v.as_str()) {
            config.name = v.to_string();
        }
        if let Some(v) = table.get("origin") {
            config.origin = toml_vec3(v, config.origin);
        }
        if let Some(v) = table.get("velocity_min") {
            config.velocity_min = toml_vec3(v, config.velocity_min);
        }
        if let Some(v) = table.get("velocity_max") {
            config.velocity_max = toml_vec3(v, config.velocity_max);
        }
        if let Some(v) = table.get("kind") {
            config.kind = match v.as_str().unwrap_or("point") {
                "sprite" => ParticleKind::Sprite,
                _ => ParticleKind::Point,
            };
        }
        if let Some(v) = table.get("texture").and_then(|v| v.as_str()) {
            config.texture = v.to_string();
        }
        if let Some(v) = table.get("lifetime") {
            config.lifetime = toml_f32(v, config.lifetime);
        }
        if let Some(v) = table.get("color_start") {
            config.color_start = toml_color(v, config.color_start);
        }
        if let Some(v) = table.get("color_end") {
            config.color_end = toml_color(v, config.color_end);
        }
        if let Some(v) = table.get("color_variance") {
            config.color_variance = toml_color(v, config.color_variance);
        }
        if let Some(v) = table.get("size_start") {
            config.size_start = toml_f32(v, config.size_start);
        }
        if let Some(v) = table.get("size_end") {
            config.size_end = toml_f32(v, config.size_end);
        }

        let rate = table
            .get("spawn_rate")
            .map(|v| toml_f32(v, config.spawn.rate()))
            .unwrap_or(config.spawn.rate());
        config.spawn = match table.get("one_shot") {
            Some(v) => SpawnMode::OneShot {
                count: toml_count(v)?,
                rate,
            },
            None => SpawnMode::Continuous { rate },
        };

        if let Some(v) = table.get("capacity") {
            let n = v.as_integer().ok_or_else(|| {
                MoteError::InvalidConfig(format!("capacity must be an integer, got {v}"))
            })?;
            config.capacity = usize::try_from(n).map_err(|_| {
                MoteError::InvalidConfig(format!("capacity must be >= 0, got {n}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the simulation cannot honor
    pub fn validate(&self) -> Result<()> {
        if !self.lifetime.is_finite() || self.lifetime < 0.0 {
            return Err(MoteError::InvalidConfig(format!(
                "lifetime must be a finite value >= 0, got {}",
                self.lifetime
            )));
        }
        if !self.velocity_min.is_finite() || !self.velocity_max.is_finite() {
            return Err(MoteError::InvalidConfig(
                "velocity range must be finite".to_string(),
            ));
        }
        let axes = [
            ("x", self.velocity_min.x, self.velocity_max.x),
            ("y", self.velocity_min.y, self.velocity_max.y),
            ("z", self.velocity_min.z, self.velocity_max.z),
        ];
        for (axis, min, max) in axes {
            if min > max {
                return Err(MoteError::InvalidConfig(format!(
                    "velocity_min.{axis} ({min}) exceeds velocity_max.{axis} ({max})"
                )));
            }
        }
        let rate = self.spawn.rate();
        if !rate.is_finite() || rate < 0.0 {
            return Err(MoteError::InvalidConfig(format!(
                "spawn rate must be a finite value >= 0, got {rate}"
            )));
        }
        Ok(())
    }
}

/// Runtime state for one emitter
pub struct Emitter {
    id: EmitterId,
    config: EmitterConfig,
    pool: ParticlePool,
    /// Fractional particle accumulator for sub-frame emission
    accumulator: f32,
    /// Particles requested by the automatic spawn path so far
    auto_spawned: u32,
    rng: ParticleRng,
}

impl Emitter {
    /// Build an emitter from a validated configuration
    pub fn new(id: EmitterId, config: EmitterConfig, rng: ParticleRng) -> Result<Self> {
        config.validate()?;
        let pool = ParticlePool::new(config.capacity);
        Ok(Self {
            id,
            config,
            pool,
            accumulator: 0.0,
            auto_spawned: 0,
            rng,
        })
    }

    pub fn id(&self) -> EmitterId {
        self.id
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Spawn up to `count` particles at the origin. Requests beyond capacity are dropped.
    /// Returns how many were created.
    pub fn emit(&mut self, count: usize) -> usize {
        let mut spawned = 0;
        for _ in 0..count {
            if self.pool.is_full() {
                break;
            }
            let particle = self.sample_particle();
            if let Some(slot) = self.pool.spawn() {
                let serial = slot.serial;
                *slot = Particle { serial, ..particle };
                spawned += 1;
            }
        }
        if spawned < count {
            tracing::trace!(
                emitter = %self.id,
                dropped = count - spawned,
                "emitter at capacity"
            );
        }
        spawned
    }

    /// One simulation step: spawn what is due, advance everything, drop the dead.
    pub fn update(&mut self, dt: f32, field: &AmbientField) {
        let dt = dt.max(0.0);

        let due = self.spawn_due(dt);
        if due > 0 {
            self.emit(due);
        }

        for p in self.pool.alive_slice_mut() {
            p.advance(dt, field);
        }

        self.pool.cull_dead();
    }

    /// Append one draw record per live particle
    pub fn render(&self, out: &mut Vec<ParticleInstance>) {
        out.extend(
            self.pool
                .alive_slice()
                .iter()
                .filter(|p| !p.is_dead())
                .map(ParticleInstance::from_particle),
        );
    }

    /// Oldest live particle, if any
    pub fn head(&self) -> Option<&Particle> {
        self.pool.head()
    }

    pub fn particles(&self) -> &[Particle] {
        self.pool.alive_slice()
    }

    pub fn alive_count(&self) -> usize {
        self.pool.alive_count()
    }

    /// True once a one-shot emitter has spawned its full count automatically
    pub fn is_exhausted(&self) -> bool {
        match self.config.spawn {
            SpawnMode::OneShot { count, .. } => self.auto_spawned >= count,
            SpawnMode::Continuous { .. } => false,
        }
    }

    fn spawn_due(&mut self, dt: f32) -> usize {
        let (rate, remaining) = match self.config.spawn {
            SpawnMode::Continuous { rate } => (rate, u32::MAX),
            SpawnMode::OneShot { count, rate } => (rate, count.saturating_sub(self.auto_spawned)),
        };
        if rate <= 0.0 || remaining == 0 {
            return 0;
        }

        self.accumulator += rate * dt;
        let whole = self.accumulator.floor();
        self.accumulator -= whole;

        let due = (whole as u32).min(remaining);
        self.auto_spawned = self.auto_spawned.saturating_add(due);
        due as usize
    }

    fn sample_particle(&mut self) -> Particle {
        let velocity = self
            .rng
            .range_vec3(self.config.velocity_min, self.config.velocity_max);
        let jitter = [
            self.rng.signed_unit(),
            self.rng.signed_unit(),
            self.rng.signed_unit(),
            self.rng.signed_unit(),
        ];
        Particle {
            serial: 0,
            position: self.config.origin,
            velocity,
            age: 0.0,
            lifetime: self.config.lifetime,
            color_start: self
                .config
                .color_start
                .offset(self.config.color_variance, jitter)
                .clamped(),
            color_end: self.config.color_end,
            size_start: self.config.size_start,
            size_end: self.config.size_end,
            kind: self.config.kind,
        }
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

/// Non-negative particle count; whole-number floats are accepted
fn toml_count(v: &toml::Value) -> Result<u32> {
    let count = match (v.as_integer(), v.as_float()) {
        (Some(i), _) => i,
        (None, Some(f)) if f.is_finite() && f.fract() == 0.0 => f as i64,
        _ => {
            return Err(MoteError::InvalidConfig(format!(
                "one_shot must be a whole number, got {v}"
            )));
        }
    };
    if count < 0 {
        return Err(MoteError::InvalidConfig(format!(
            "one_shot must be >= 0, got {count}"
        )));
    }
    Ok(count.min(u32::MAX as i64) as u32)
}

fn toml_vec3(v: &toml::Value, default: Vec3) -> Vec3 {
    if let Some(arr) = v.as_array() {
        if arr.len() >= 3 {
            return Vec3::new(
                toml_f32(&arr[0], default.x),
                toml_f32(&arr[1], default.y),
                toml_f32(&arr[2], default.z),
            );
        }
    }
    default
}

fn toml_color(v: &toml::Value, default: Color) -> Color {
    if let Some(arr) = v.as_array() {
        if arr.len() >= 4 {
            return Color::new(
                toml_f32(&arr[0], default.r),
                toml_f32(&arr[1], default.g),
                toml_f32(&arr[2], default.b),
                toml_f32(&arr[3], default.a),
            );
        }
    }
    default
}
