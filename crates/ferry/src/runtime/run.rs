//! Run — build the fleet, run it to completion, log the summary.

use tracing::info;

use crate::conf::FerryConfig;
use crate::driver::{Driver, RunReport};
use crate::error::FerryResult;

pub fn run(config: FerryConfig) -> FerryResult<RunReport> {
    let mut driver = Driver::from_config(&config);
    let fleet = driver.random_fleet(&config.fleet);
    info!(
        "Fleet: {} cars, {} minis, {} trucks (seed {})",
        config.fleet.cars,
        config.fleet.minis,
        config.fleet.trucks,
        driver.seed()
    );

    let report = driver.run(fleet)?;
    log_summary(&report);
    Ok(report)
}

fn log_summary(report: &RunReport) {
    info!("*** All trips finished. ***");
    info!(
        crossings = report.metrics.crossings,
        empty_crossings = report.metrics.empty_crossings,
        vehicles_carried = report.metrics.vehicles_carried,
        tolls_paid = report.metrics.tolls_paid,
        peak_load = report.metrics.peak_load,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "Run summary"
    );
    info!(
        "Started {}, finished {}",
        report.started_at.to_rfc3339(),
        report.finished_at.to_rfc3339()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::{FleetConfig, TimingConfig};

    #[test]
    fn test_run_small_configured_fleet() {
        let config = FerryConfig {
            fleet: FleetConfig { cars: 2, minis: 1, trucks: 1 },
            timings: TimingConfig::zero(),
            seed: Some(8),
            ..FerryConfig::default()
        };
        let report = run(config).expect("run should complete");
        assert_eq!(report.remaining, 0);
        assert_eq!(report.outcomes.len(), 4);
        assert_eq!(report.seed, 8);
    }
}
