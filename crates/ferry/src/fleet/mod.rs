//! Fleet module — vehicles, their per-vehicle rendezvous, and the agent loop
//! each vehicle runs on its own thread.

pub mod vehicle;
pub mod signal;
pub mod agent;
pub mod builder;

pub use agent::{VehicleAgent, VehicleOutcome};
pub use builder::FleetBuilder;
pub use signal::{Phase, Rendezvous};
pub use vehicle::{Next, Passenger, Vehicle, VehicleId, WeightClass};
