use web_time::Instant;

/// Frames between FPS log lines.
const LOG_INTERVAL: u64 = 600;

/// Counts presented frames and keeps a smoothed frame rate.
pub struct FrameTiming {
    last_frame: Instant,
    frames: u64,
    /// Exponential moving average of the instantaneous rate.
    smoothed_fps: f32,
    /// Weight of the newest sample (0.0-1.0).
    smoothing: f32,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Start timing from now.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            frames: 0,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Record a presented frame.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.record(frame_time);
    }

    fn record(&mut self, frame_time: f32) {
        self.frames += 1;
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        if self.frames % LOG_INTERVAL == 0 {
            log::debug!("frame {}: {:.1} fps", self.frames, self.smoothed_fps);
        }
    }

    /// Smoothed frames per second.
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Frames presented so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_frames() {
        let mut timing = FrameTiming::new();
        timing.end_frame();
        timing.end_frame();
        assert_eq!(timing.frame_count(), 2);
    }

    #[test]
    fn fps_moves_toward_samples() {
        let mut timing = FrameTiming::new();
        for _ in 0..500 {
            timing.record(1.0 / 30.0);
        }
        assert!((timing.fps() - 30.0).abs() < 0.5);
    }

    #[test]
    fn zero_length_frames_keep_fps() {
        let mut timing = FrameTiming::new();
        timing.record(0.0);
        assert_eq!(timing.fps(), 60.0);
        assert_eq!(timing.frame_count(), 1);
    }
}
