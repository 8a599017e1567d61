//! Error — failures of the ambient layer around the crossing protocol.
//!
//! The protocol itself never fails: a capacity overrun or a vehicle docked in
//! two places is an invariant violation and panics. What can fail is loading
//! configuration and managing the OS threads the agents run on.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FerryError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Failed to read config file {path}: {source}")]
    ConfigFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("Failed to spawn agent thread {agent}: {source}")]
    Spawn {
        agent: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Agent thread panicked: {0}")]
    AgentPanicked(String),
}

pub type FerryResult<T> = Result<T, FerryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err = FerryError::Config("capacity must be > 0".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: capacity must be > 0");
    }

    #[test]
    fn test_panicked_agent_named_in_message() {
        let err = FerryError::AgentPanicked("truck-7".to_string());
        assert!(err.to_string().contains("truck-7"));
    }

    #[test]
    fn test_parse_error_converts() {
        let parse = toml::from_str::<toml::Table>("capacity = = 3").unwrap_err();
        let err: FerryError = parse.into();
        assert!(matches!(err, FerryError::ConfigParse(_)));
    }
}
