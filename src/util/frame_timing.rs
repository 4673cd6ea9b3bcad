use web_time::{Duration, Instant};

/// Frame timing with smoothed FPS and an optional frame cap.
pub struct FrameTiming {
    /// Target FPS (0 = unlimited, pace to the host's vsync)
    target_fps: u32,
    /// Minimum frame duration derived from the target
    min_frame_duration: Duration,
    last_frame: Instant,
    /// Exponential moving average of instantaneous FPS
    smoothed_fps: f32,
    /// Weight of the newest sample (0.0-1.0)
    smoothing: f32,
    frames: u64,
}

impl FrameTiming {
    /// Frame timer with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        Self {
            target_fps,
            min_frame_duration: min_frame_duration(target_fps),
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
            frames: 0,
        }
    }

    /// Change the FPS target.
    pub fn set_target_fps(&mut self, target_fps: u32) {
        self.target_fps = target_fps;
        self.min_frame_duration = min_frame_duration(target_fps);
    }

    /// True once enough time has passed since the last frame to draw
    /// another one.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.target_fps == 0
            || self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Record that a frame was presented.
    pub fn end_frame(&mut self) {
        self.end_frame_at(Instant::now());
    }

    fn end_frame_at(&mut self, now: Instant) {
        let frame_time =
            now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frames += 1;

        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Frames presented so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

fn min_frame_duration(target_fps: u32) -> Duration {
    if target_fps > 0 {
        Duration::from_secs_f64(1.0 / f64::from(target_fps))
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_always_renders() {
        let timing = FrameTiming::new(0);
        assert!(timing.should_render());
    }

    #[test]
    fn fps_converges_toward_frame_rate() {
        let mut timing = FrameTiming::new(0);
        let mut now = timing.last_frame;
        for _ in 0..400 {
            now += Duration::from_millis(10);
            timing.end_frame_at(now);
        }
        assert_eq!(timing.frame_count(), 400);
        assert!((timing.fps() - 100.0).abs() < 1.0);
    }
}
