//! Wall-clock timer driving time-based animation.

use web_time::{Duration, Instant};

/// Elapsed-time clock that starts on first read and can be paused.
///
/// Orbital motion is a function of this clock rather than of the frame
/// count, so it is independent of the display refresh rate. Time spent
/// paused is excluded from [`elapsed_at`](Self::elapsed_at).
#[derive(Debug, Clone, Default)]
pub struct Clock {
    start: Option<Instant>,
    paused_at: Option<Instant>,
    paused_total: Duration,
}

impl Clock {
    /// A clock that has not started yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds elapsed between the first read and `now`, excluding paused
    /// time.
    pub fn elapsed_at(&mut self, now: Instant) -> f64 {
        let start = *self.start.get_or_insert(now);
        let end = self.paused_at.unwrap_or(now);
        end.saturating_duration_since(start)
            .saturating_sub(self.paused_total)
            .as_secs_f64()
    }

    /// Whether the clock is currently frozen.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Freeze the clock at `now`. No-op when already paused.
    pub fn pause_at(&mut self, now: Instant) {
        let _ = self.start.get_or_insert(now);
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// Unfreeze the clock at `now`. No-op when running.
    pub fn resume_at(&mut self, now: Instant) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += now.saturating_duration_since(paused_at);
        }
    }

    /// Flip between paused and running at `now`. Returns `true` if now
    /// paused.
    pub fn toggle_at(&mut self, now: Instant) -> bool {
        if self.is_paused() {
            self.resume_at(now);
        } else {
            self.pause_at(now);
        }
        self.is_paused()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_read() {
        let mut clock = Clock::new();
        let t0 = Instant::now();
        assert_eq!(clock.elapsed_at(t0), 0.0);
        let secs = clock.elapsed_at(t0 + Duration::from_millis(2500));
        assert!((secs - 2.5).abs() < 1e-9);
    }

    #[test]
    fn paused_time_is_excluded() {
        let mut clock = Clock::new();
        let t0 = Instant::now();
        let _ = clock.elapsed_at(t0);

        clock.pause_at(t0 + Duration::from_secs(1));
        assert!(clock.is_paused());
        // Frozen while paused
        let frozen = clock.elapsed_at(t0 + Duration::from_secs(5));
        assert!((frozen - 1.0).abs() < 1e-9);

        clock.resume_at(t0 + Duration::from_secs(5));
        let secs = clock.elapsed_at(t0 + Duration::from_secs(6));
        assert!((secs - 2.0).abs() < 1e-9);
    }

    #[test]
    fn double_pause_keeps_first_instant() {
        let mut clock = Clock::new();
        let t0 = Instant::now();
        clock.pause_at(t0);
        clock.pause_at(t0 + Duration::from_secs(3));
        clock.resume_at(t0 + Duration::from_secs(4));
        let secs = clock.elapsed_at(t0 + Duration::from_secs(4));
        assert!(secs.abs() < 1e-9);
    }

    #[test]
    fn toggle_flips_state() {
        let mut clock = Clock::new();
        let t0 = Instant::now();
        assert!(clock.toggle_at(t0));
        assert!(!clock.toggle_at(t0 + Duration::from_secs(2)));
        assert!(!clock.is_paused());
    }
}
