//! Fixed-rate tick scheduling
//!
//! The game advances in whole ticks. Each frame the platform reports the
//! current time and runs as many ticks as have come due.

use crate::consts::{MAX_CATCH_UP_TICKS, MAX_FRAME_GAP, TICK_DT};

/// Accumulator-based tick scheduler
#[derive(Debug, Clone)]
pub struct FrameClock {
    tick_dt: f64,
    accumulator: f64,
    last_time: Option<f64>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(TICK_DT)
    }
}

impl FrameClock {
    pub fn new(tick_dt: f64) -> Self {
        Self {
            tick_dt,
            accumulator: 0.0,
            last_time: None,
        }
    }

    /// Report the current time in seconds and get the number of ticks due.
    ///
    /// The first call only starts the clock and always yields one tick so the
    /// first frame has something to show. Gaps longer than
    /// [`MAX_FRAME_GAP`] (tab hidden, window dragged) are dropped, and at most
    /// [`MAX_CATCH_UP_TICKS`] run per call.
    pub fn advance(&mut self, now: f64) -> u32 {
        let Some(last) = self.last_time.replace(now) else {
            return 1;
        };

        let dt = (now - last).clamp(0.0, MAX_FRAME_GAP);
        self.accumulator += dt;

        let mut ticks = 0;
        while self.accumulator >= self.tick_dt && ticks < MAX_CATCH_UP_TICKS {
            self.accumulator -= self.tick_dt;
            ticks += 1;
        }
        // Anything still owed after the cap is forgotten rather than replayed
        if ticks == MAX_CATCH_UP_TICKS {
            self.accumulator = self.accumulator.min(self.tick_dt);
        }
        ticks
    }

    /// Forget accumulated time (after a reset or a pause)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_runs_one_tick() {
        let mut clock = FrameClock::new(0.1);
        assert_eq!(clock.advance(5.0), 1);
    }

    #[test]
    fn test_ticks_follow_elapsed_time() {
        let mut clock = FrameClock::new(0.0625);
        clock.advance(0.0);
        assert_eq!(clock.advance(0.03125), 0);
        assert_eq!(clock.advance(0.0625), 1);
        assert_eq!(clock.advance(0.1875), 2);
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut clock = FrameClock::new(0.0625);
        clock.advance(0.0);
        assert_eq!(clock.advance(0.09375), 1);
        // Half a tick left over, plus another half
        assert_eq!(clock.advance(0.125), 1);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut clock = FrameClock::new(0.01);
        clock.advance(0.0);
        assert_eq!(clock.advance(0.2), MAX_CATCH_UP_TICKS);
        // The backlog was dropped, not deferred
        assert!(clock.advance(0.2) <= 1);
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut clock = FrameClock::default();
        clock.advance(0.0);
        let ticks = clock.advance(3600.0);
        assert!(ticks <= MAX_CATCH_UP_TICKS);
    }

    #[test]
    fn test_time_going_backwards_runs_nothing() {
        let mut clock = FrameClock::new(0.1);
        clock.advance(10.0);
        assert_eq!(clock.advance(9.0), 0);
    }

    #[test]
    fn test_reset_restarts_clock() {
        let mut clock = FrameClock::new(0.1);
        clock.advance(0.0);
        clock.advance(0.05);
        clock.reset();
        assert_eq!(clock.advance(100.0), 1);
        assert_eq!(clock.advance(100.05), 0);
    }
}
