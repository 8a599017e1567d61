use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::Serialize;

use crate::dock::Side;
use crate::fleet::VehicleId;

/// One completed crossing, as the shuttle saw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossingRecord {
    /// 1-based crossing number.
    pub number: u64,
    pub from: Side,
    pub to: Side,
    /// Boarded vehicles with their weights, in boarding order.
    pub manifest: Vec<(VehicleId, u32)>,
    pub load: u32,
    pub capacity: u32,
    /// Lightest vehicle left on the departure side when loading stopped.
    pub lightest_left: Option<u32>,
}

impl CrossingRecord {
    pub fn room_left(&self) -> u32 {
        self.capacity - self.load
    }

    pub fn is_empty(&self) -> bool {
        self.manifest.is_empty()
    }
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub tolls_paid: u64,
    pub crossings: u64,
    pub empty_crossings: u64,
    pub vehicles_carried: u64,
    pub peak_load: u32,
}

/// Run-wide counters, shared by every agent.
pub struct FerryMetrics {
    tolls_paid: AtomicU64,
    crossings: AtomicU64,
    empty_crossings: AtomicU64,
    vehicles_carried: AtomicU64,
    peak_load: AtomicU32,

    /// Every crossing in order
    ledger: RwLock<Vec<CrossingRecord>>,
}

impl FerryMetrics {
    pub fn new() -> Self {
        Self {
            tolls_paid: AtomicU64::new(0),
            crossings: AtomicU64::new(0),
            empty_crossings: AtomicU64::new(0),
            vehicles_carried: AtomicU64::new(0),
            peak_load: AtomicU32::new(0),
            ledger: RwLock::new(Vec::new()),
        }
    }

    pub fn toll_paid(&self) {
        self.tolls_paid.fetch_add(1, Ordering::Relaxed);
    }

    /// Next crossing number, starting at 1.
    pub fn next_crossing(&self) -> u64 {
        self.crossings.load(Ordering::Relaxed) + 1
    }

    pub fn crossing_completed(&self, record: CrossingRecord) {
        self.crossings.fetch_add(1, Ordering::Relaxed);
        if record.is_empty() {
            self.empty_crossings.fetch_add(1, Ordering::Relaxed);
        }
        self.vehicles_carried
            .fetch_add(record.manifest.len() as u64, Ordering::Relaxed);
        self.peak_load.fetch_max(record.load, Ordering::Relaxed);

        tracing::debug!(
            crossing = record.number,
            load = record.load,
            vehicles = record.manifest.len(),
            "Crossing recorded"
        );
        self.ledger.write().push(record);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            tolls_paid: self.tolls_paid.load(Ordering::Relaxed),
            crossings: self.crossings.load(Ordering::Relaxed),
            empty_crossings: self.empty_crossings.load(Ordering::Relaxed),
            vehicles_carried: self.vehicles_carried.load(Ordering::Relaxed),
            peak_load: self.peak_load.load(Ordering::Relaxed),
        }
    }

    pub fn ledger(&self) -> Vec<CrossingRecord> {
        self.ledger.read().clone()
    }
}

impl Default for FerryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(number: u64, manifest: Vec<(VehicleId, u32)>) -> CrossingRecord {
        let load = manifest.iter().map(|(_, w)| w).sum();
        CrossingRecord {
            number,
            from: Side::Near,
            to: Side::Far,
            manifest,
            load,
            capacity: 20,
            lightest_left: None,
        }
    }

    #[test]
    fn test_counters_accumulate() {
        let metrics = FerryMetrics::new();
        metrics.toll_paid();
        metrics.toll_paid();
        metrics.crossing_completed(record(1, vec![(0, 3), (1, 1)]));
        metrics.crossing_completed(record(2, vec![]));
        metrics.crossing_completed(record(3, vec![(2, 2)]));

        let snap = metrics.snapshot();
        assert_eq!(snap.tolls_paid, 2);
        assert_eq!(snap.crossings, 3);
        assert_eq!(snap.empty_crossings, 1);
        assert_eq!(snap.vehicles_carried, 3);
        assert_eq!(snap.peak_load, 4);
    }

    #[test]
    fn test_ledger_keeps_order() {
        let metrics = FerryMetrics::new();
        assert_eq!(metrics.next_crossing(), 1);
        metrics.crossing_completed(record(1, vec![(0, 1)]));
        assert_eq!(metrics.next_crossing(), 2);
        metrics.crossing_completed(record(2, vec![(1, 1)]));
        let numbers: Vec<u64> = metrics.ledger().iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_room_left() {
        let r = record(1, vec![(0, 3), (1, 2)]);
        assert_eq!(r.room_left(), 15);
        assert!(!r.is_empty());
    }
}
