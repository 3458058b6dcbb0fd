use crate::constants::{FIXED_TIMESTEP, MAX_TICKS_PER_FRAME};
use std::time::Instant;

/// Fixed-timestep driver: turns wall-clock frames into a whole number of
/// simulation ticks. Per-tick motion is never scaled by elapsed time.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
    accumulator: f64,
    timestep: f64,
    max_ticks: u32,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self {
            last: now,
            accumulator: 0.0,
            timestep: FIXED_TIMESTEP,
            max_ticks: MAX_TICKS_PER_FRAME,
        }
    }

    /// Number of ticks owed since the previous call. Backlog beyond
    /// `MAX_TICKS_PER_FRAME` is dropped so a stall does not fast-forward.
    pub fn advance(&mut self, now: Instant) -> u32 {
        let delta = now.saturating_duration_since(self.last).as_secs_f64();
        self.last = now;
        self.accumulator += delta;

        let mut ticks = 0;
        while self.accumulator >= self.timestep && ticks < self.max_ticks {
            self.accumulator -= self.timestep;
            ticks += 1;
        }
        if ticks == self.max_ticks {
            self.accumulator = self.accumulator.min(self.timestep);
        }
        ticks
    }

    /// Forgets elapsed time, e.g. while paused.
    pub fn reset(&mut self, now: Instant) {
        self.last = now;
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn counts_whole_ticks_and_carries_remainder() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        assert_eq!(clock.advance(start + Duration::from_millis(10)), 0);
        assert_eq!(clock.advance(start + Duration::from_millis(20)), 1);
        assert_eq!(clock.advance(start + Duration::from_millis(55)), 2);
    }

    #[test]
    fn caps_catch_up_after_stall() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        assert_eq!(clock.advance(start + Duration::from_secs(2)), MAX_TICKS_PER_FRAME);
        assert!(clock.advance(start + Duration::from_secs(2)) <= 1);
    }

    #[test]
    fn reset_discards_elapsed_time() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        clock.reset(start + Duration::from_secs(1));
        assert_eq!(clock.advance(start + Duration::from_secs(1)), 0);
    }
}
