//! Time management utilities

use std::time::{Duration, Instant};

/// Wall-clock timer for frame timing
pub struct FrameClock {
    last_frame: Instant,
    delta: Duration,
    total: Duration,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a new clock starting now
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            total: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Update the clock (should be called once per frame) and return the frame delta
    pub fn update(&mut self) -> Duration {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_frame);
        self.total += self.delta;
        self.last_frame = now;
        self.frame_count += 1;
        self.delta
    }

    /// Get the time since the last frame
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Get the total elapsed time since clock creation
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Repeating wall-clock timer advanced by elapsed time
///
/// The timer does not own a thread; whoever drives the frame loop feeds it
/// elapsed time through [`IntervalTimer::advance`] and acts whenever it
/// fires. Keeping it on the frame thread means the callback
/// work and the per-frame work share one writer.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    accumulated: Duration,
    armed: bool,
}

impl IntervalTimer {
    /// Create a stopped timer with the given period
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            accumulated: Duration::ZERO,
            armed: false,
        }
    }

    /// Arm the timer from zero, discarding any previous schedule
    pub fn start(&mut self) {
        self.cancel();
        self.armed = true;
    }

    /// Disarm the timer; cancelling a stopped timer does nothing
    pub fn cancel(&mut self) {
        self.armed = false;
        self.accumulated = Duration::ZERO;
    }

    /// Whether the timer is currently armed
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Timer period
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Advance by `elapsed` and report whether the timer fired
    ///
    /// Fires at most once per call. Periods missed during a long frame are
    /// dropped; only the phase within the current period is kept.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if !self.armed || self.period.is_zero() {
            return false;
        }

        self.accumulated += elapsed;
        if self.accumulated < self.period {
            return false;
        }
        let phase = self.accumulated.as_nanos() % self.period.as_nanos();
        self.accumulated = Duration::from_nanos(u64::try_from(phase).unwrap_or_default());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF_SECOND: Duration = Duration::from_millis(500);

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timer = IntervalTimer::new(HALF_SECOND);
        assert!(!timer.advance(Duration::from_secs(10)));
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut timer = IntervalTimer::new(HALF_SECOND);
        timer.start();

        assert!(!timer.advance(Duration::from_millis(499)));
        assert!(timer.advance(Duration::from_millis(1)));
        assert!(!timer.advance(Duration::from_millis(250)));
        assert!(timer.advance(Duration::from_millis(250)));
    }

    #[test]
    fn test_long_frame_fires_once_and_keeps_phase() {
        let mut timer = IntervalTimer::new(HALF_SECOND);
        timer.start();
        assert!(timer.advance(Duration::from_millis(1600)));
        // 100ms of phase carries over
        assert!(!timer.advance(Duration::from_millis(399)));
        assert!(timer.advance(Duration::from_millis(1)));
    }

    #[test]
    fn test_stall_does_not_replay_backlog() {
        let mut timer = IntervalTimer::new(HALF_SECOND);
        timer.start();
        assert!(timer.advance(Duration::from_secs(600)));
        assert!(!timer.advance(Duration::ZERO));
        assert!(!timer.advance(Duration::from_millis(499)));
        assert!(timer.advance(Duration::from_millis(1)));
    }

    #[test]
    fn test_restart_discards_partial_period() {
        let mut timer = IntervalTimer::new(HALF_SECOND);
        timer.start();
        timer.advance(Duration::from_millis(400));

        timer.start();
        assert!(!timer.advance(Duration::from_millis(400)));
        assert!(timer.advance(Duration::from_millis(100)));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut timer = IntervalTimer::new(HALF_SECOND);
        timer.cancel();
        timer.cancel();
        assert!(!timer.is_armed());

        timer.start();
        timer.cancel();
        assert!(!timer.is_armed());
        assert!(!timer.advance(Duration::from_secs(1)));
    }

    #[test]
    fn test_frame_clock_counts_frames() {
        let mut clock = FrameClock::new();
        clock.update();
        clock.update();
        assert_eq!(clock.frame_count(), 2);
        assert!(clock.total() >= clock.delta());
    }
}
