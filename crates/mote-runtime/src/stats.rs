//! Frame timing and FPS measurement

/// Length of an FPS recording window in seconds
pub const RECORD_WINDOW: f64 = 10.0;

/// Per-frame timing plus an on-demand fixed-window FPS average
#[derive(Debug, Default)]
pub struct FrameStats {
    /// Unscaled duration of the last frame
    pub frame_time: f64,
    /// Frames seen since construction
    pub frames: u64,
    recording_since: Option<f64>,
    recorded_frames: u64,
    average: Option<f64>,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantaneous frames per second from the last frame time
    pub fn fps(&self) -> f64 {
        if self.frame_time > 0.0 {
            1.0 / self.frame_time
        } else {
            0.0
        }
    }

    /// Begin a new averaging window, discarding any previous result
    pub fn start_recording(&mut self, now: f64) {
        self.recording_since = Some(now);
        self.recorded_frames = 0;
        self.average = None;
    }

    pub fn is_recording(&self) -> bool {
        self.recording_since.is_some()
    }

    /// Account for one frame ending at `now`
    pub fn record_frame(&mut self, now: f64, frame_time: f64) {
        self.frame_time = frame_time;
        self.frames += 1;

        let Some(since) = self.recording_since else {
            return;
        };
        if now - since >= RECORD_WINDOW {
            let average = self.recorded_frames as f64 / RECORD_WINDOW;
            self.recording_since = None;
            self.average = Some(average);
            tracing::info!(fps = average, "recorded average frame rate");
        } else {
            self.recorded_frames += 1;
        }
    }

    /// Result of the last completed recording window
    pub fn average_fps(&self) -> Option<f64> {
        self.average
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instantaneous_fps() {
        let mut stats = FrameStats::new();
        assert_eq!(stats.fps(), 0.0);
        stats.record_frame(0.0, 0.02);
        assert!((stats.fps() - 50.0).abs() < 1e-9);
        assert_eq!(stats.frames, 1);
    }

    #[test]
    fn ten_second_average() {
        let mut stats = FrameStats::new();
        stats.start_recording(0.0);
        let mut now = 0.0;
        // 30 frames per second for just over the window
        for _ in 0..=301 {
            now += 1.0 / 30.0;
            stats.record_frame(now, 1.0 / 30.0);
        }
        assert!(!stats.is_recording());
        let avg = stats.average_fps().unwrap();
        assert!((avg - 30.0).abs() < 0.2, "average {avg}");
    }

    #[test]
    fn restart_discards_previous_average() {
        let mut stats = FrameStats::new();
        stats.start_recording(0.0);
        stats.record_frame(11.0, 11.0);
        assert!(stats.average_fps().is_some());
        stats.start_recording(20.0);
        assert!(stats.is_recording());
        assert_eq!(stats.average_fps(), None);
    }
}
