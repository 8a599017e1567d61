//! Dock module — the state vehicles share on shore: toll booths and the two
//! side queues.

pub mod side;
pub mod booth;
pub mod queue;

pub use booth::{BoothGuard, TollBooths};
pub use queue::{FirstFit, SideQueue};
pub use side::Side;

use std::sync::Arc;

use crate::fleet::{Passenger, VehicleId};

pub struct Dock {
    pub booths: TollBooths,
    queues: [SideQueue; 2],
}

impl Dock {
    pub fn new(booths_per_side: usize) -> Self {
        Self {
            booths: TollBooths::new(booths_per_side),
            queues: [SideQueue::new(Side::Near), SideQueue::new(Side::Far)],
        }
    }

    pub fn queue(&self, side: Side) -> &SideQueue {
        &self.queues[side.index()]
    }

    /// Queue `passenger` on `side`. Besides the side's own waiter, the
    /// opposite side is nudged too: a shuttle idling there may now have a
    /// reason to cross over empty.
    pub fn enqueue(&self, side: Side, passenger: Arc<Passenger>) {
        debug_assert!(
            !self.queue(side.opposite()).contains(passenger.id()),
            "vehicle {} already queued on side {}",
            passenger.id(),
            side.opposite()
        );
        self.queue(side).enqueue(passenger);
        self.queue(side.opposite()).wake();
    }

    /// Wake both sides' waiters.
    pub fn wake_all(&self) {
        for queue in &self.queues {
            queue.wake();
        }
    }

    /// Every vehicle currently waiting on either side.
    pub fn queued(&self) -> Vec<(Side, VehicleId)> {
        self.queues
            .iter()
            .flat_map(|queue| queue.snapshot().into_iter().map(move |id| (queue.side(), id)))
            .collect()
    }
}
