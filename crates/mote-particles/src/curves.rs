//! Simple value-over-lifetime interpolation (start → end linear)

/// Linear interpolation between two floats
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Normalized age in [0, 1]. A non-positive lifetime is treated as fully aged.
pub fn life_ratio(age: f32, lifetime: f32) -> f32 {
    if lifetime <= 0.0 {
        1.0
    } else {
        (age / lifetime).clamp(0.0, 1.0)
    }
}
