//! Builder — assembles the fleet with sequential ids.

use rand::Rng;

use super::vehicle::{Vehicle, VehicleId, WeightClass};
use crate::conf::FleetConfig;
use crate::dock::Side;

#[derive(Debug, Default)]
pub struct FleetBuilder {
    vehicles: Vec<Vehicle>,
}

impl FleetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one vehicle homed (and starting) on `home`.
    pub fn vehicle(mut self, class: WeightClass, home: Side) -> Self {
        let id = self.vehicles.len() as VehicleId;
        self.vehicles.push(Vehicle::new(id, class, home));
        self
    }

    pub fn vehicles(mut self, class: WeightClass, count: usize, home: Side) -> Self {
        for _ in 0..count {
            self = self.vehicle(class, home);
        }
        self
    }

    /// The configured fleet, cars first, then minis, then trucks, each
    /// homed on a random side.
    pub fn random<R: Rng + ?Sized>(fleet: &FleetConfig, rng: &mut R) -> Self {
        let mut builder = Self::new();
        for (class, count) in fleet.counts() {
            for _ in 0..count {
                let home = Side::random(rng);
                builder = builder.vehicle(class, home);
            }
        }
        builder
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn build(self) -> Vec<Vehicle> {
        self.vehicles
    }
}
