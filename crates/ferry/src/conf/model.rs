//! Model — FerryConfig and related structs.

use serde::{Deserialize, Serialize};

use crate::fleet::WeightClass;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FerryConfig {
    /// Weight budget of one crossing, in weight units.
    pub capacity: u32,
    pub booths_per_side: usize,
    pub fleet: FleetConfig,
    pub timings: TimingConfig,
    /// Fixed seed for reproducible runs. Drawn from entropy when unset.
    pub seed: Option<u64>,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    pub cars: usize,
    pub minis: usize,
    pub trucks: usize,
}

/// Pacing of the simulation, in milliseconds. None of these affect the
/// protocol, only how fast the log scrolls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub pay_ms: u64,
    pub board_ms: u64,
    pub sail_ms: u64,
    pub rest_min_ms: u64,
    pub rest_max_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

impl Default for FerryConfig {
    fn default() -> Self {
        Self {
            capacity: 20,
            booths_per_side: 2,
            fleet: FleetConfig::default(),
            timings: TimingConfig::default(),
            seed: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            cars: 12,
            minis: 10,
            trucks: 8,
        }
    }
}

impl FleetConfig {
    pub fn total(&self) -> usize {
        self.cars + self.minis + self.trucks
    }

    /// Vehicle count per class, in id-assignment order.
    pub fn counts(&self) -> [(WeightClass, usize); 3] {
        [
            (WeightClass::Car, self.cars),
            (WeightClass::Mini, self.minis),
            (WeightClass::Truck, self.trucks),
        ]
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            pay_ms: 600,
            board_ms: 500,
            sail_ms: 1500,
            rest_min_ms: 400,
            rest_max_ms: 1200,
        }
    }
}

impl TimingConfig {
    /// No pacing at all. Used by tests to run the protocol flat out.
    pub fn zero() -> Self {
        Self {
            pay_ms: 0,
            board_ms: 0,
            sail_ms: 0,
            rest_min_ms: 0,
            rest_max_ms: 0,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.rest_min_ms > self.rest_max_ms {
            return Err(format!(
                "timings.rest_min_ms ({}) must be <= timings.rest_max_ms ({})",
                self.rest_min_ms, self.rest_max_ms
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "ferry=info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}
