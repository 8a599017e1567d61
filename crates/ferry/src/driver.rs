//! Driver — builds the shared state, starts one thread per vehicle plus the
//! shuttle, joins them, and reports how the run went.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::conf::{FerryConfig, FleetConfig};
use crate::dock::Dock;
use crate::error::{FerryError, FerryResult};
use crate::fleet::{FleetBuilder, Vehicle, VehicleAgent, VehicleOutcome};
use crate::metrics::{CrossingRecord, FerryMetrics, MetricsSnapshot};
use crate::pace::Pace;
use crate::shuttle::Shuttle;
use crate::tracker::TerminationTracker;

#[derive(Debug, Clone)]
pub struct RunReport {
    pub seed: u64,
    pub outcomes: Vec<VehicleOutcome>,
    /// Termination count when the shuttle stopped. Zero on every completed run.
    pub remaining: usize,
    pub metrics: MetricsSnapshot,
    pub ledger: Vec<CrossingRecord>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed: Duration,
}

pub struct Driver {
    capacity: u32,
    booths_per_side: usize,
    pace: Pace,
    seed: u64,
    rng: ChaCha8Rng,
}

impl Driver {
    pub fn new(capacity: u32, booths_per_side: usize, pace: Pace, seed: u64) -> Self {
        Self {
            capacity,
            booths_per_side,
            pace,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seeds from `config.seed`, or from entropy when none is configured.
    pub fn from_config(config: &FerryConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::new(
            config.capacity,
            config.booths_per_side,
            Pace::from_timings(&config.timings),
            seed,
        )
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The configured fleet with random home sides drawn from the run's RNG.
    pub fn random_fleet(&mut self, fleet: &FleetConfig) -> Vec<Vehicle> {
        FleetBuilder::random(fleet, &mut self.rng).build()
    }

    /// Run the fleet to completion. Returns once every vehicle has retired
    /// and the shuttle has left service.
    pub fn run(mut self, fleet: Vec<Vehicle>) -> FerryResult<RunReport> {
        let started_at = Utc::now();
        let clock = Instant::now();

        let dock = Arc::new(Dock::new(self.booths_per_side));
        let tracker = Arc::new(TerminationTracker::new(fleet.len()));
        let metrics = Arc::new(FerryMetrics::new());
        let shuttle = Arc::new(Shuttle::new(
            self.capacity,
            Arc::clone(&dock),
            Arc::clone(&tracker),
            Arc::clone(&metrics),
            self.pace,
        ));

        info!(
            vehicles = fleet.len(),
            capacity = self.capacity,
            booths_per_side = self.booths_per_side,
            seed = self.seed,
            "Starting crossing"
        );

        let shuttle_handle = {
            let shuttle = Arc::clone(&shuttle);
            spawn("shuttle".to_string(), move || shuttle.run())?
        };

        let mut riders = Vec::with_capacity(fleet.len());
        for vehicle in fleet {
            let agent = VehicleAgent::new(
                vehicle,
                Arc::clone(&dock),
                Arc::clone(&tracker),
                Arc::clone(&metrics),
                self.pace,
                ChaCha8Rng::seed_from_u64(self.rng.gen()),
            );
            let name = agent.name().to_string();
            riders.push((name.clone(), spawn(name, move || agent.run())?));
        }

        let mut outcomes = Vec::with_capacity(riders.len());
        for (name, handle) in riders {
            outcomes.push(handle.join().map_err(|_| FerryError::AgentPanicked(name))?);
        }

        // Every vehicle is gone; make sure the shuttle sees it
        dock.wake_all();
        shuttle_handle
            .join()
            .map_err(|_| FerryError::AgentPanicked("shuttle".to_string()))?;

        let leftover = dock.queued();
        assert!(leftover.is_empty(), "vehicles still queued after the run: {:?}", leftover);

        Ok(RunReport {
            seed: self.seed,
            outcomes,
            remaining: tracker.remaining(),
            metrics: metrics.snapshot(),
            ledger: metrics.ledger(),
            started_at,
            finished_at: Utc::now(),
            elapsed: clock.elapsed(),
        })
    }
}

fn spawn<T, F>(name: String, body: F) -> FerryResult<JoinHandle<T>>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    thread::Builder::new()
        .name(name.clone())
        .spawn(body)
        .map_err(|source| FerryError::Spawn { agent: name, source })
}
