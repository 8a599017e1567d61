//! Deck — where the shuttle is and who is aboard.

use std::sync::Arc;

use crate::dock::Side;
use crate::fleet::{Passenger, VehicleId};

/// Transient crossing state, guarded by the shuttle's deck lock.
/// `manifest` is non-empty only between the end of loading and the end of
/// unloading.
#[derive(Debug)]
pub struct Deck {
    pub side: Side,
    pub load: u32,
    pub manifest: Vec<Arc<Passenger>>,
}

impl Deck {
    pub fn docked_at(side: Side) -> Self {
        Self {
            side,
            load: 0,
            manifest: Vec::new(),
        }
    }

    pub fn ids(&self) -> Vec<VehicleId> {
        self.manifest.iter().map(|p| p.id()).collect()
    }

    pub fn contains(&self, id: VehicleId) -> bool {
        self.manifest.iter().any(|p| p.id() == id)
    }

    /// Manifest as `(id, weight)` pairs, boarding order.
    pub fn weights(&self) -> Vec<(VehicleId, u32)> {
        self.manifest.iter().map(|p| (p.id(), p.weight())).collect()
    }
}
