//! Signal — per-vehicle rendezvous with the shuttle.
//!
//! The shuttle moves the phase forward and broadcasts; the vehicle waits for
//! the phase it needs. A signal that arrives before the vehicle starts
//! waiting is kept in the phase, so it cannot be lost.

use parking_lot::{Condvar, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not aboard: paying, queued, or resting.
    Ashore,
    /// Taken off the queue by the shuttle and counted on the deck.
    Boarded,
    /// The shuttle reached the far side and released this vehicle.
    Landed,
}

#[derive(Debug)]
pub struct Rendezvous {
    phase: Mutex<Phase>,
    changed: Condvar,
}

impl Rendezvous {
    pub fn new() -> Self {
        Self {
            phase: Mutex::new(Phase::Ashore),
            changed: Condvar::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        *self.phase.lock()
    }

    /// Shuttle side: "you have boarded".
    pub fn board(&self) {
        self.advance(Phase::Ashore, Phase::Boarded);
    }

    /// Shuttle side: "you may disembark".
    pub fn land(&self) {
        self.advance(Phase::Boarded, Phase::Landed);
    }

    /// Vehicle side: block until boarded.
    pub fn await_boarding(&self) {
        let mut phase = self.phase.lock();
        while *phase == Phase::Ashore {
            self.changed.wait(&mut phase);
        }
    }

    /// Vehicle side: block until landed, then step ashore again.
    pub fn await_landing(&self) {
        let mut phase = self.phase.lock();
        while *phase != Phase::Landed {
            self.changed.wait(&mut phase);
        }
        *phase = Phase::Ashore;
    }

    fn advance(&self, from: Phase, to: Phase) {
        let mut phase = self.phase.lock();
        assert_eq!(*phase, from, "rendezvous moved to {:?} out of order", to);
        *phase = to;
        self.changed.notify_all();
    }
}

impl Default for Rendezvous {
    fn default() -> Self {
        Self::new()
    }
}
