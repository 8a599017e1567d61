//! Pace — the artificial delays that slow the simulation down to a readable log.

use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::conf::TimingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pace {
    pub pay: Duration,
    pub board: Duration,
    pub sail: Duration,
    rest_min_ms: u64,
    rest_max_ms: u64,
}

impl Pace {
    pub fn from_timings(timings: &TimingConfig) -> Self {
        Self {
            pay: Duration::from_millis(timings.pay_ms),
            board: Duration::from_millis(timings.board_ms),
            sail: Duration::from_millis(timings.sail_ms),
            rest_min_ms: timings.rest_min_ms,
            rest_max_ms: timings.rest_max_ms.max(timings.rest_min_ms),
        }
    }

    pub fn zero() -> Self {
        Self::from_timings(&TimingConfig::zero())
    }

    /// Draw a rest interval uniformly from `[rest_min, rest_max)`.
    pub fn rest_interval<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.rest_max_ms <= self.rest_min_ms {
            return Duration::from_millis(self.rest_min_ms);
        }
        Duration::from_millis(rng.gen_range(self.rest_min_ms..self.rest_max_ms))
    }
}

/// Sleep the calling thread; zero durations return immediately.
pub fn nap(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}
