//! Queue — the waiting area of one side: FIFO insertion, first-fit removal.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use super::side::Side;
use crate::fleet::{Passenger, VehicleId};

/// Outcome of one first-fit scan.
#[derive(Debug)]
pub enum FirstFit {
    /// The earliest-queued vehicle that fit, already removed from the queue.
    Taken(Arc<Passenger>),
    /// Nothing fit. Carries the lightest weight still waiting, observed under
    /// the same lock as the scan.
    NoneFits { lightest: Option<u32> },
}

impl FirstFit {
    pub fn taken(self) -> Option<Arc<Passenger>> {
        match self {
            FirstFit::Taken(passenger) => Some(passenger),
            FirstFit::NoneFits { .. } => None,
        }
    }
}

/// Vehicles waiting on one side, in arrival order.
///
/// All mutation happens under the queue lock. The condition variable is the
/// shuttle's wait point for this side; `len` mirrors the queue length so the
/// shuttle can glance at the opposite side without taking its lock.
pub struct SideQueue {
    side: Side,
    waiting: Mutex<VecDeque<Arc<Passenger>>>,
    ready: Condvar,
    len: AtomicUsize,
}

impl SideQueue {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            waiting: Mutex::new(VecDeque::new()),
            ready: Condvar::new(),
            len: AtomicUsize::new(0),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Append to the tail and wake whoever waits on this side.
    pub fn enqueue(&self, passenger: Arc<Passenger>) {
        let mut waiting = self.waiting.lock();
        debug_assert!(
            waiting.iter().all(|p| p.id() != passenger.id()),
            "vehicle {} queued twice on side {}",
            passenger.id(),
            self.side
        );
        waiting.push_back(passenger);
        self.len.store(waiting.len(), Ordering::SeqCst);
        self.ready.notify_all();
    }

    /// Remove the earliest-queued vehicle whose weight fits in `room`.
    pub fn dequeue_first_fit(&self, room: u32) -> Option<Arc<Passenger>> {
        self.take_first_fit(room).taken()
    }

    /// First-fit scan from the head. Skipped vehicles keep their relative order.
    pub fn take_first_fit(&self, room: u32) -> FirstFit {
        let mut waiting = self.waiting.lock();
        let found = waiting.iter().position(|p| p.weight() <= room);
        match found.and_then(|index| waiting.remove(index)) {
            Some(passenger) => {
                self.len.store(waiting.len(), Ordering::SeqCst);
                FirstFit::Taken(passenger)
            }
            None => FirstFit::NoneFits {
                lightest: waiting.iter().map(|p| p.weight()).min(),
            },
        }
    }

    pub fn len(&self) -> usize {
        self.len.load(Ordering::SeqCst)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: VehicleId) -> bool {
        self.waiting.lock().iter().any(|p| p.id() == id)
    }

    /// Ids of the waiting vehicles, head first.
    pub fn snapshot(&self) -> Vec<VehicleId> {
        self.waiting.lock().iter().map(|p| p.id()).collect()
    }

    /// Monitor wait on this side. `decide` runs with the queue lock held and is
    /// told whether the queue is empty; the thread blocks until it returns
    /// `Some`. Anything that can change the decision must call [`wake`] (or
    /// enqueue) after changing it, so no wake-up falls between check and wait.
    ///
    /// [`wake`]: SideQueue::wake
    pub fn wait_for<T>(&self, mut decide: impl FnMut(bool) -> Option<T>) -> T {
        let mut waiting = self.waiting.lock();
        loop {
            if let Some(outcome) = decide(waiting.is_empty()) {
                return outcome;
            }
            self.ready.wait(&mut waiting);
        }
    }

    /// Wake every waiter so it re-evaluates its condition.
    pub fn wake(&self) {
        let _waiting = self.waiting.lock();
        self.ready.notify_all();
    }
}
