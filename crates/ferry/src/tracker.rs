//! Tracker — count of vehicles that have not yet finished their round trip.

use parking_lot::Mutex;

pub struct TerminationTracker {
    remaining: Mutex<usize>,
}

impl TerminationTracker {
    pub fn new(fleet_size: usize) -> Self {
        Self {
            remaining: Mutex::new(fleet_size),
        }
    }

    /// Count one vehicle as retired. Returns how many are still out.
    pub fn retire(&self) -> usize {
        let mut remaining = self.remaining.lock();
        assert!(*remaining > 0, "more vehicles retired than the fleet holds");
        *remaining -= 1;
        *remaining
    }

    pub fn remaining(&self) -> usize {
        *self.remaining.lock()
    }

    pub fn is_done(&self) -> bool {
        self.remaining() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_counts_down_to_zero() {
        let tracker = TerminationTracker::new(2);
        assert!(!tracker.is_done());
        assert_eq!(tracker.retire(), 1);
        assert_eq!(tracker.retire(), 0);
        assert!(tracker.is_done());
    }

    #[test]
    fn test_empty_fleet_is_done_from_the_start() {
        assert!(TerminationTracker::new(0).is_done());
    }

    #[test]
    #[should_panic(expected = "more vehicles retired")]
    fn test_retire_past_zero_is_fatal() {
        let tracker = TerminationTracker::new(1);
        tracker.retire();
        tracker.retire();
    }

    #[test]
    fn test_concurrent_retirement_reaches_zero_once() {
        let tracker = Arc::new(TerminationTracker::new(64));
        let handles: Vec<_> = (0..64)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                thread::spawn(move || tracker.retire())
            })
            .collect();
        let zeros = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|left| *left == 0)
            .count();
        assert_eq!(zeros, 1);
        assert_eq!(tracker.remaining(), 0);
    }
}
