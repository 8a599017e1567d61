//! Load — config loading from an optional TOML file and environment variables.

use std::fs;
use std::path::Path;

use super::model::FerryConfig;
use crate::error::{FerryError, FerryResult};
use crate::fleet::WeightClass;

const DEFAULT_CONFIG_PATH: &str = "ferry.toml";

impl FerryConfig {
    /// Load configuration from file and environment variables
    /// Priority: Environment Variables > Config File > Defaults
    ///
    /// A missing file is not an error; the run needs no configuration at all.
    pub fn load() -> FerryResult<Self> {
        let config_path = std::env::var("FERRY_CONFIG_FILE")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", config_path);
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> FerryResult<Self> {
        let contents = fs::read_to_string(path).map_err(|source| FerryError::ConfigFile {
            path: path.to_string(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Apply environment overrides through `lookup`. Unparseable values are
    /// ignored with a warning.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(seed) = parse_var(&lookup, "FERRY_SEED") {
            self.seed = Some(seed);
        }
        if let Some(capacity) = parse_var(&lookup, "FERRY_CAPACITY") {
            self.capacity = capacity;
        }
        if let Some(booths) = parse_var(&lookup, "FERRY_BOOTHS_PER_SIDE") {
            self.booths_per_side = booths;
        }
        if let Some(level) = lookup("FERRY_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Validate that configuration values are sane
    pub fn validate(&self) -> Result<(), String> {
        let heaviest = WeightClass::heaviest().weight();
        if self.capacity < heaviest {
            return Err(format!(
                "capacity ({}) must be >= the heaviest vehicle weight ({})",
                self.capacity, heaviest
            ));
        }
        if self.booths_per_side == 0 {
            return Err("booths_per_side must be > 0".to_string());
        }
        self.timings.validate()?;
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}
