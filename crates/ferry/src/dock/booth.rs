//! Booth — toll booths, a fixed number of exclusive-use resources per side.

use parking_lot::{Mutex, MutexGuard};
use rand::Rng;

use super::side::Side;

/// All toll booths of the crossing. Booth numbers are global: side `s`
/// owns booths `s * per_side .. (s + 1) * per_side`.
pub struct TollBooths {
    per_side: usize,
    /// Each booth's lock guards the count of tolls it has taken.
    booths: Vec<Mutex<u64>>,
}

/// Exclusive use of one booth. The booth is released on drop.
pub struct BoothGuard<'a> {
    number: usize,
    side: Side,
    tally: MutexGuard<'a, u64>,
}

impl TollBooths {
    pub fn new(per_side: usize) -> Self {
        assert!(per_side > 0, "each side needs at least one toll booth");
        Self {
            per_side,
            booths: (0..per_side * Side::ALL.len()).map(|_| Mutex::new(0)).collect(),
        }
    }

    pub fn per_side(&self) -> usize {
        self.per_side
    }

    /// Pick one of `side`'s booths uniformly at random and block until it is free.
    pub fn acquire<R: Rng + ?Sized>(&self, side: Side, rng: &mut R) -> BoothGuard<'_> {
        let slot = rng.gen_range(0..self.per_side);
        self.acquire_slot(side, slot)
    }

    /// Block until booth `slot` of `side` is free.
    pub fn acquire_slot(&self, side: Side, slot: usize) -> BoothGuard<'_> {
        assert!(slot < self.per_side, "booth slot {} out of range", slot);
        let number = side.index() * self.per_side + slot;
        BoothGuard {
            number,
            side,
            tally: self.booths[number].lock(),
        }
    }

    /// Tolls taken so far, indexed by booth number.
    pub fn tallies(&self) -> Vec<u64> {
        self.booths.iter().map(|booth| *booth.lock()).collect()
    }
}

impl BoothGuard<'_> {
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Record the payment on this booth's tally.
    pub fn collect(&mut self) {
        *self.tally += 1;
    }
}
