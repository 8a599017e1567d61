//! Boot — logging init and config load.

use tracing::info;

use crate::conf::{FerryConfig, LogFormat, LoggingConfig};
use crate::error::{FerryError, FerryResult};

/// Phase 1: basic tracing so config loading can log.
/// Uses `set_default` (thread-local) so it can be replaced by phase 2's
/// global subscriber.
pub fn init_logging_basic() -> tracing::subscriber::DefaultGuard {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ferry=info"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    tracing::subscriber::set_default(subscriber)
}

/// Phase 2: the global subscriber, shaped by configuration. Events go to
/// stdout; `RUST_LOG` wins over the configured level.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_target(true)
                .with_thread_names(true);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .with_target(false)
                .with_thread_names(true)
                .with_file(false)
                .with_line_number(false);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    }
}

/// Load and validate configuration.
pub fn boot() -> FerryResult<FerryConfig> {
    info!("Starting ferry v{}", env!("CARGO_PKG_VERSION"));

    let config = FerryConfig::load()?;
    config.validate().map_err(FerryError::Config)?;

    info!(
        "Loaded configuration: capacity={}, booths_per_side={}, fleet={}",
        config.capacity,
        config.booths_per_side,
        config.fleet.total()
    );
    info!(
        "Pacing: pay={}ms, board={}ms, sail={}ms, rest={}..{}ms",
        config.timings.pay_ms,
        config.timings.board_ms,
        config.timings.sail_ms,
        config.timings.rest_min_ms,
        config.timings.rest_max_ms
    );

    Ok(config)
}
