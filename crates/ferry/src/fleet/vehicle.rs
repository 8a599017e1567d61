//! Vehicle — weight classes, the agent-owned vehicle record, and the shared
//! passenger handle that sits on queues and the deck.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::signal::Rendezvous;
use crate::dock::Side;

pub type VehicleId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightClass {
    Car,
    Mini,
    Truck,
}

impl WeightClass {
    pub const ALL: [WeightClass; 3] = [WeightClass::Car, WeightClass::Mini, WeightClass::Truck];

    /// Weight in capacity units.
    pub fn weight(self) -> u32 {
        match self {
            WeightClass::Car => 1,
            WeightClass::Mini => 2,
            WeightClass::Truck => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeightClass::Car => "Car",
            WeightClass::Mini => "Mini",
            WeightClass::Truck => "Truck",
        }
    }

    pub fn heaviest() -> WeightClass {
        WeightClass::Truck
    }
}

impl fmt::Display for WeightClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a vehicle does after stepping off the shuttle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    Rest,
    Retire,
}

/// A vehicle's own state. Only its agent mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    id: VehicleId,
    class: WeightClass,
    home: Side,
    current: Side,
    /// 0 before the first crossing, 1 after it.
    trips: u8,
    crossings: u32,
}

impl Vehicle {
    /// A new vehicle starts on its home side.
    pub fn new(id: VehicleId, class: WeightClass, home: Side) -> Self {
        Self {
            id,
            class,
            home,
            current: home,
            trips: 0,
            crossings: 0,
        }
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn class(&self) -> WeightClass {
        self.class
    }

    pub fn home(&self) -> Side {
        self.home
    }

    pub fn current(&self) -> Side {
        self.current
    }

    pub fn trips(&self) -> u8 {
        self.trips
    }

    pub fn crossings(&self) -> u32 {
        self.crossings
    }

    /// Thread and log name, e.g. `truck-7`.
    pub fn name(&self) -> String {
        format!("{}-{}", self.class.label().to_lowercase(), self.id)
    }

    /// Record one crossing and decide what comes next. The first crossing
    /// always leads to a rest; a later one retires the vehicle only if it
    /// landed on its home side.
    pub fn complete_crossing(&mut self) -> Next {
        self.current = self.current.opposite();
        self.crossings += 1;
        if self.trips == 0 {
            self.trips = 1;
            Next::Rest
        } else if self.current == self.home {
            Next::Retire
        } else {
            Next::Rest
        }
    }
}

/// The handle the shuttle sees while a vehicle is docked: identity, weight,
/// and the vehicle's rendezvous. The shuttle never touches [`Vehicle`].
#[derive(Debug)]
pub struct Passenger {
    id: VehicleId,
    class: WeightClass,
    signal: Rendezvous,
}

impl Passenger {
    pub fn new(id: VehicleId, class: WeightClass) -> Self {
        Self {
            id,
            class,
            signal: Rendezvous::new(),
        }
    }

    pub fn for_vehicle(vehicle: &Vehicle) -> Self {
        Self::new(vehicle.id(), vehicle.class())
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn class(&self) -> WeightClass {
        self.class
    }

    pub fn weight(&self) -> u32 {
        self.class.weight()
    }

    pub fn signal(&self) -> &Rendezvous {
        &self.signal
    }
}
