//! Lightweight xorshift32 PRNG with per-emitter streams

use mote_core::Vec3;

pub struct ParticleRng {
    state: u32,
}

impl ParticleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Derive an independent generator for one stream (e.g. one emitter) of a seeded run
    pub fn for_stream(seed: u32, stream: u64) -> Self {
        // splitmix64 finalizer to spread nearby stream ids apart
        let mut z = (seed as u64) ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        Self::new((z ^ (z >> 32)) as u32)
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() as f32) / (u32::MAX as f32)
    }

    /// Returns a float in [min, max]
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        let v = min + self.next_f32() * (max - min);
        if min <= max {
            v.clamp(min, max)
        } else {
            v
        }
    }

    /// Returns a float in [-1, 1]
    pub fn signed_unit(&mut self) -> f32 {
        self.range(-1.0, 1.0)
    }

    /// Each axis drawn independently from [min, max]
    pub fn range_vec3(&mut self, min: Vec3, max: Vec3) -> Vec3 {
        Vec3::new(
            self.range(min.x, max.x),
            self.range(min.y, max.y),
            self.range(min.z, max.z),
        )
    }
}
