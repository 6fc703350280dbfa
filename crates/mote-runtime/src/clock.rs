//! Simulation clock driven by an external time source

use std::time::Instant;

/// Monotonic, non-decreasing time in seconds
pub trait TimeSource {
    fn now(&self) -> f64;
}

/// Wall-clock time since construction
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-driven time for headless runs and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualTime {
    now: f64,
}

impl ManualTime {
    pub fn new(start: f64) -> Self {
        Self { now: start }
    }

    pub fn advance(&mut self, seconds: f64) {
        self.now += seconds;
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> f64 {
        self.now
    }
}

/// Turns successive timestamps into scaled simulation deltas
pub struct SimulationClock {
    /// Multiplier applied to every raw interval. Not clamped: zero freezes,
    /// negative values produce negative deltas.
    pub speed: f32,
    /// Report zero for the first tick instead of the time since construction
    pub clamp_first_tick: bool,
    /// Total scaled simulation time in seconds
    pub total_time: f64,
    /// Scaled delta produced by the last tick
    pub delta_time: f64,
    /// Unscaled interval measured by the last tick
    pub frame_time: f64,
    last_tick: f64,
    first_tick: bool,
}

impl SimulationClock {
    /// Clock whose first interval is measured from `start`
    pub fn new(start: f64) -> Self {
        Self {
            speed: 1.0,
            clamp_first_tick: true,
            total_time: 0.0,
            delta_time: 0.0,
            frame_time: 0.0,
            last_tick: start,
            first_tick: true,
        }
    }

    /// Advance to `now` and return the scaled delta. Call once per frame.
    pub fn tick(&mut self, now: f64) -> f64 {
        let raw = now - self.last_tick;
        self.last_tick = now;

        if self.first_tick {
            self.first_tick = false;
            if self.clamp_first_tick {
                self.frame_time = 0.0;
                self.delta_time = 0.0;
                return 0.0;
            }
        }

        self.scale(raw)
    }

    /// Scale an explicit interval without consulting the time source
    pub fn tick_fixed(&mut self, raw: f64) -> f64 {
        self.last_tick += raw;
        self.first_tick = false;
        self.scale(raw)
    }

    fn scale(&mut self, raw: f64) -> f64 {
        self.frame_time = raw;
        self.delta_time = raw * self.speed as f64;
        self.total_time += self.delta_time;
        self.delta_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_defaults() {
        let clock = SimulationClock::new(0.0);
        assert_eq!(clock.speed, 1.0);
        assert!(clock.clamp_first_tick);
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
    }

    #[test]
    fn test_first_tick_zero_delta() {
        let mut clock = SimulationClock::new(1.0);
        assert_eq!(clock.tick(3.5), 0.0);
        assert_eq!(clock.tick(4.0), 0.5);
    }

    #[test]
    fn test_first_tick_unclamped() {
        let mut clock = SimulationClock::new(1.0);
        clock.clamp_first_tick = false;
        assert_eq!(clock.tick(3.5), 2.5);
    }

    #[test]
    fn test_speed_scaling() {
        let mut clock = SimulationClock::new(0.0);
        clock.tick(0.0);
        clock.speed = 2.0;
        assert_eq!(clock.tick(0.25), 0.5);
        assert_eq!(clock.frame_time, 0.25);
        clock.speed = 0.0;
        assert_eq!(clock.tick(1.0), 0.0);
        assert_eq!(clock.total_time, 0.5);
    }

    #[test]
    fn test_negative_speed_reverses() {
        let mut clock = SimulationClock::new(0.0);
        clock.tick(0.0);
        clock.speed = -1.0;
        assert_eq!(clock.tick(0.5), -0.5);
    }

    #[test]
    fn test_tick_fixed() {
        let mut clock = SimulationClock::new(0.0);
        clock.speed = 0.5;
        assert_eq!(clock.tick_fixed(0.25), 0.125);
        assert_eq!(clock.tick(0.75), 0.25);
    }

    #[test]
    fn test_manual_time() {
        let mut time = ManualTime::new(2.0);
        time.advance(0.5);
        assert_eq!(time.now(), 2.5);
    }

    #[test]
    fn test_monotonic_time_non_decreasing() {
        let time = MonotonicTime::new();
        let a = time.now();
        let b = time.now();
        assert!(b >= a);
    }
}
