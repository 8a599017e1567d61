// Domain-driven module structure for the ferry crossing simulation.

// Core infrastructure
pub mod error;
pub mod conf;
pub mod pace;
pub mod metrics;

// Protocol
pub mod dock;
pub mod fleet;
pub mod shuttle;
pub mod tracker;
pub mod driver;

// Process lifecycle
pub mod runtime;
