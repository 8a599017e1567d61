//! Agent — the loop each vehicle runs on its own thread:
//! pay toll, queue, board, ride, disembark, then rest or retire.

use std::sync::Arc;

use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use super::vehicle::{Next, Passenger, Vehicle, VehicleId, WeightClass};
use crate::dock::{Dock, Side};
use crate::metrics::FerryMetrics;
use crate::pace::{nap, Pace};
use crate::tracker::TerminationTracker;

/// Final state of a vehicle whose agent has stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleOutcome {
    pub id: VehicleId,
    pub class: WeightClass,
    pub home: Side,
    pub final_side: Side,
    pub trips: u8,
    pub crossings: u32,
}

pub struct VehicleAgent {
    name: String,
    vehicle: Vehicle,
    passenger: Arc<Passenger>,
    dock: Arc<Dock>,
    tracker: Arc<TerminationTracker>,
    metrics: Arc<FerryMetrics>,
    pace: Pace,
    rng: ChaCha8Rng,
}

impl VehicleAgent {
    pub fn new(
        vehicle: Vehicle,
        dock: Arc<Dock>,
        tracker: Arc<TerminationTracker>,
        metrics: Arc<FerryMetrics>,
        pace: Pace,
        rng: ChaCha8Rng,
    ) -> Self {
        Self {
            name: vehicle.name(),
            passenger: Arc::new(Passenger::for_vehicle(&vehicle)),
            vehicle,
            dock,
            tracker,
            metrics,
            pace,
            rng,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run until the vehicle is back home after its round trip.
    pub fn run(mut self) -> VehicleOutcome {
        loop {
            self.pay_toll();
            self.queue_up();
            self.ride();

            let next = self.vehicle.complete_crossing();
            info!(vehicle = %self.name, side = %self.vehicle.current(), "Off the shuttle");
            match next {
                Next::Retire => {
                    let remaining = self.tracker.retire();
                    info!(vehicle = %self.name, side = %self.vehicle.current(), remaining, "Back home, retired");
                    return self.outcome();
                }
                Next::Rest => {
                    let rest = self.pace.rest_interval(&mut self.rng);
                    debug!(vehicle = %self.name, rest_ms = rest.as_millis() as u64, "Resting");
                    nap(rest);
                }
            }
        }
    }

    fn pay_toll(&mut self) {
        let side = self.vehicle.current();
        let mut booth = self.dock.booths.acquire(side, &mut self.rng);
        info!(vehicle = %self.name, booth = booth.number(), side = %side, "Pays toll");
        nap(self.pace.pay);
        booth.collect();
        self.metrics.toll_paid();
    }

    fn queue_up(&self) {
        let side = self.vehicle.current();
        self.dock.enqueue(side, Arc::clone(&self.passenger));
        debug!(vehicle = %self.name, side = %side, "Queued");
    }

    /// Two rendezvous per crossing: boarding, then landing on the far side.
    fn ride(&self) {
        let signal = self.passenger.signal();
        signal.await_boarding();
        debug!(vehicle = %self.name, "Aboard");
        signal.await_landing();
    }

    fn outcome(&self) -> VehicleOutcome {
        VehicleOutcome {
            id: self.vehicle.id(),
            class: self.vehicle.class(),
            home: self.vehicle.home(),
            final_side: self.vehicle.current(),
            trips: self.vehicle.trips(),
            crossings: self.vehicle.crossings(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::thread;
    use std::time::Duration;

    fn agent(vehicle: Vehicle, dock: &Arc<Dock>, tracker: &Arc<TerminationTracker>) -> VehicleAgent {
        VehicleAgent::new(
            vehicle,
            Arc::clone(dock),
            Arc::clone(tracker),
            Arc::new(FerryMetrics::new()),
            Pace::zero(),
            ChaCha8Rng::seed_from_u64(5),
        )
    }

    /// Stand in for the shuttle: wait for `id` on `side`, board and land it.
    fn ferry_one(dock: &Dock, side: Side, id: VehicleId) {
        loop {
            if let Some(p) = dock.queue(side).dequeue_first_fit(u32::MAX) {
                assert_eq!(p.id(), id);
                p.signal().board();
                p.signal().land();
                return;
            }
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_agent_retires_after_two_crossings() {
        let dock = Arc::new(Dock::new(1));
        let tracker = Arc::new(TerminationTracker::new(1));
        let rider = agent(Vehicle::new(7, WeightClass::Mini, Side::Far), &dock, &tracker);
        assert_eq!(rider.name(), "mini-7");
        let handle = thread::spawn(move || rider.run());

        // Out from home, then back
        ferry_one(&dock, Side::Far, 7);
        ferry_one(&dock, Side::Near, 7);

        let outcome = handle.join().unwrap();
        assert_eq!(outcome.final_side, Side::Far);
        assert_eq!(outcome.home, Side::Far);
        assert_eq!(outcome.trips, 1);
        assert_eq!(outcome.crossings, 2);
        assert!(tracker.is_done());
        assert_eq!(dock.booths.tallies(), vec![1, 1]);
    }
}
