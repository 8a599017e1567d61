//! Agent — the shuttle's state machine: wait at a side, load first-fit up to
//! capacity, sail, unload, repeat on the other side.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use super::deck::Deck;
use crate::dock::{Dock, FirstFit, Side};
use crate::fleet::{VehicleId, WeightClass};
use crate::metrics::{CrossingRecord, FerryMetrics};
use crate::pace::{nap, Pace};
use crate::tracker::TerminationTracker;

/// Why the shuttle stopped waiting at a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Berth {
    /// Vehicles are queued here.
    Board,
    /// Nobody here, but vehicles are queued across; cross over empty.
    Reposition,
    /// Every vehicle has retired and nobody is queued here.
    Finish,
}

struct Loading {
    manifest: Vec<(VehicleId, u32)>,
    load: u32,
    lightest_left: Option<u32>,
}

pub struct Shuttle {
    capacity: u32,
    deck: Mutex<Deck>,
    dock: Arc<Dock>,
    tracker: Arc<TerminationTracker>,
    metrics: Arc<FerryMetrics>,
    pace: Pace,
}

impl Shuttle {
    /// A shuttle docked at side 0 with an empty deck.
    pub fn new(
        capacity: u32,
        dock: Arc<Dock>,
        tracker: Arc<TerminationTracker>,
        metrics: Arc<FerryMetrics>,
        pace: Pace,
    ) -> Self {
        assert!(
            capacity >= WeightClass::heaviest().weight(),
            "capacity {} cannot carry the heaviest vehicle",
            capacity
        );
        Self {
            capacity,
            deck: Mutex::new(Deck::docked_at(Side::Near)),
            dock,
            tracker,
            metrics,
            pace,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn side(&self) -> Side {
        self.deck.lock().side
    }

    pub fn load_units(&self) -> u32 {
        self.deck.lock().load
    }

    pub fn manifest(&self) -> Vec<VehicleId> {
        self.deck.lock().ids()
    }

    pub fn is_aboard(&self, id: VehicleId) -> bool {
        self.deck.lock().contains(id)
    }

    /// Run until every vehicle has retired. Returns the number of crossings.
    pub fn run(&self) -> u64 {
        info!(capacity = self.capacity, "Shuttle in service");
        loop {
            let side = self.side();
            match self.wait_at(side) {
                Berth::Board => {
                    self.cross();
                }
                Berth::Reposition => {
                    info!(side = %side, "No vehicles waiting, crossing empty");
                    self.cross();
                }
                Berth::Finish => {
                    let crossings = self.metrics.snapshot().crossings;
                    info!(side = %side, crossings, "All vehicles retired, shuttle out of service");
                    return crossings;
                }
            }
        }
    }

    /// Block at `side` until there is something to do. The queue state, the
    /// opposite side, and the termination count are all evaluated under
    /// `side`'s queue lock, and the wait releases that same lock.
    pub fn wait_at(&self, side: Side) -> Berth {
        let across = self.dock.queue(side.opposite());
        self.dock.queue(side).wait_for(|empty| {
            if !empty {
                Some(Berth::Board)
            } else if self.tracker.is_done() {
                Some(Berth::Finish)
            } else if !across.is_empty() {
                Some(Berth::Reposition)
            } else {
                None
            }
        })
    }

    /// One full crossing from the current side: load, sail, unload.
    pub fn cross(&self) -> CrossingRecord {
        let number = self.metrics.next_crossing();
        let from = self.side();
        let loading = self.load();
        let to = self.sail();
        self.unload();

        let record = CrossingRecord {
            number,
            from,
            to,
            manifest: loading.manifest,
            load: loading.load,
            capacity: self.capacity,
            lightest_left: loading.lightest_left,
        };
        self.metrics.crossing_completed(record.clone());
        record
    }

    /// Board first-fit from the current side until nothing more fits. Each
    /// vehicle is told it has boarded as soon as it is counted on the deck.
    fn load(&self) -> Loading {
        let mut deck = self.deck.lock();
        assert!(deck.manifest.is_empty(), "loading onto a deck that was never unloaded");
        let side = deck.side;
        let queue = self.dock.queue(side);

        info!(side = %side, "Boarding");
        let lightest_left = loop {
            match queue.take_first_fit(self.capacity - deck.load) {
                FirstFit::Taken(passenger) => {
                    deck.load += passenger.weight();
                    assert!(
                        deck.load <= self.capacity,
                        "deck overloaded: {} > {}",
                        deck.load,
                        self.capacity
                    );
                    passenger.signal().board();
                    debug!(
                        vehicle = passenger.id(),
                        class = %passenger.class(),
                        load = deck.load,
                        "Vehicle boarded"
                    );
                    deck.manifest.push(passenger);
                    nap(self.pace.board);
                }
                FirstFit::NoneFits { lightest } => break lightest,
            }
        };

        info!(load = deck.load, vehicles = deck.manifest.len(), "Depart");
        Loading {
            manifest: deck.weights(),
            load: deck.load,
            lightest_left,
        }
    }

    /// Sail to the other side. The deck lock is not held while under way.
    fn sail(&self) -> Side {
        nap(self.pace.sail);
        let mut deck = self.deck.lock();
        deck.side = deck.side.opposite();
        info!(side = %deck.side, "Arrive");
        deck.side
    }

    /// Release every vehicle aboard, in manifest order.
    fn unload(&self) {
        let mut deck = self.deck.lock();
        let side = deck.side;
        for passenger in deck.manifest.drain(..) {
            passenger.signal().land();
            debug!(vehicle = passenger.id(), side = %side, "Vehicle released");
            nap(self.pace.board);
        }
        deck.load = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::{Passenger, Phase};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::thread;
    use std::time::Duration;

    struct Harness {
        dock: Arc<Dock>,
        tracker: Arc<TerminationTracker>,
        metrics: Arc<FerryMetrics>,
        shuttle: Arc<Shuttle>,
    }

    fn harness(capacity: u32, fleet_size: usize) -> Harness {
        let dock = Arc::new(Dock::new(2));
        let tracker = Arc::new(TerminationTracker::new(fleet_size));
        let metrics = Arc::new(FerryMetrics::new());
        let shuttle = Arc::new(Shuttle::new(
            capacity,
            Arc::clone(&dock),
            Arc::clone(&tracker),
            Arc::clone(&metrics),
            Pace::zero(),
        ));
        Harness { dock, tracker, metrics, shuttle }
    }

    fn queue_up(dock: &Dock, side: Side, classes: &[WeightClass]) -> Vec<Arc<Passenger>> {
        classes
            .iter()
            .enumerate()
            .map(|(id, class)| {
                let passenger = Arc::new(Passenger::new(id as VehicleId, *class));
                dock.enqueue(side, Arc::clone(&passenger));
                passenger
            })
            .collect()
    }

    #[test]
    fn test_whole_small_fleet_boards_in_one_batch() {
        let h = harness(20, 6);
        let passengers = queue_up(
            &h.dock,
            Side::Near,
            &[
                WeightClass::Car,
                WeightClass::Car,
                WeightClass::Car,
                WeightClass::Mini,
                WeightClass::Mini,
                WeightClass::Truck,
            ],
        );

        let record = h.shuttle.cross();
        assert_eq!(record.from, Side::Near);
        assert_eq!(record.to, Side::Far);
        assert_eq!(record.load, 10);
        assert_eq!(
            record.manifest.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4, 5]
        );
        assert_eq!(record.lightest_left, None);
        assert!(passengers.iter().all(|p| p.signal().phase() == Phase::Landed));

        // Deck is clean and the shuttle waits on the far side
        assert_eq!(h.shuttle.side(), Side::Far);
        assert_eq!(h.shuttle.load_units(), 0);
        assert!(h.shuttle.manifest().is_empty());
        assert!(h.dock.queued().is_empty());
    }

    #[test]
    fn test_loading_skips_what_does_not_fit() {
        let h = harness(5, 4);
        queue_up(
            &h.dock,
            Side::Near,
            &[WeightClass::Truck, WeightClass::Truck, WeightClass::Mini, WeightClass::Car],
        );

        let record = h.shuttle.cross();
        assert_eq!(record.manifest, vec![(0, 3), (2, 2)]);
        assert_eq!(record.room_left(), 0);
        assert_eq!(record.lightest_left, Some(1));
        // Skipped vehicles stay queued in their original order
        assert_eq!(h.dock.queue(Side::Near).snapshot(), vec![1, 3]);
    }

    #[test]
    fn test_loading_stops_only_when_nothing_fits() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for capacity in 3..=9 {
            let h = harness(capacity, 40);
            let classes: Vec<WeightClass> = (0..40)
                .map(|_| WeightClass::ALL[rng.gen_range(0..3)])
                .collect();
            queue_up(&h.dock, Side::Near, &classes);

            // Keep shuttling the near side's queue across until it is empty
            while !h.dock.queue(Side::Near).is_empty() {
                let record = h.shuttle.cross();
                assert!(record.load <= capacity);
                assert!(!record.is_empty());
                if let Some(lightest) = record.lightest_left {
                    assert!(lightest > record.room_left(), "first-fit left {} unused with a {} waiting", record.room_left(), lightest);
                }
                if h.shuttle.side() == Side::Far {
                    // Bring the empty shuttle back
                    h.shuttle.cross();
                }
            }
            let carried: u64 = h.metrics.snapshot().vehicles_carried;
            assert_eq!(carried, 40);
        }
    }

    #[test]
    fn test_vehicle_is_in_one_place_at_a_time() {
        let h = harness(4, 3);
        queue_up(&h.dock, Side::Near, &[WeightClass::Truck, WeightClass::Truck, WeightClass::Car]);
        h.shuttle.cross();
        // Vehicle 1 stayed behind; 0 and 2 were carried and released
        assert!(h.dock.queue(Side::Near).contains(1));
        assert!(!h.shuttle.is_aboard(1));
        for id in [0, 2] {
            assert!(!h.dock.queue(Side::Near).contains(id));
            assert!(!h.dock.queue(Side::Far).contains(id));
            assert!(!h.shuttle.is_aboard(id));
        }
    }

    #[test]
    fn test_wait_at_decisions() {
        let h = harness(20, 1);
        queue_up(&h.dock, Side::Far, &[WeightClass::Mini]);
        assert_eq!(h.shuttle.wait_at(Side::Far), Berth::Board);
        assert_eq!(h.shuttle.wait_at(Side::Near), Berth::Reposition);

        h.dock.queue(Side::Far).dequeue_first_fit(20);
        h.tracker.retire();
        assert_eq!(h.shuttle.wait_at(Side::Near), Berth::Finish);
    }

    #[test]
    fn test_wait_at_wakes_for_far_side_arrival() {
        let h = harness(20, 1);
        let waiter = {
            let shuttle = Arc::clone(&h.shuttle);
            thread::spawn(move || shuttle.wait_at(Side::Near))
        };
        thread::sleep(Duration::from_millis(20));
        queue_up(&h.dock, Side::Far, &[WeightClass::Car]);
        assert_eq!(waiter.join().unwrap(), Berth::Reposition);
    }

    #[test]
    fn test_wait_at_wakes_for_final_broadcast() {
        let h = harness(20, 1);
        let waiter = {
            let shuttle = Arc::clone(&h.shuttle);
            thread::spawn(move || shuttle.wait_at(Side::Near))
        };
        thread::sleep(Duration::from_millis(20));
        h.tracker.retire();
        h.dock.wake_all();
        assert_eq!(waiter.join().unwrap(), Berth::Finish);
    }

    #[test]
    fn test_empty_crossing_is_recorded() {
        let h = harness(20, 1);
        let record = h.shuttle.cross();
        assert!(record.is_empty());
        assert_eq!(h.shuttle.side(), Side::Far);
        assert_eq!(h.metrics.snapshot().empty_crossings, 1);
    }

    #[test]
    fn test_run_returns_when_fleet_already_retired() {
        let h = harness(20, 0);
        assert_eq!(h.shuttle.run(), 0);
    }

    #[test]
    #[should_panic(expected = "heaviest vehicle")]
    fn test_capacity_below_truck_rejected() {
        harness(2, 0);
    }
}
