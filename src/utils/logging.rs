//! Logging setup.
//!
//! The library only emits `tracing` events; binaries call [`init_logging`]
//! once to print them. `RUST_LOG` overrides the default level.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{directive}': {message}")]
    InvalidFilter { directive: String, message: String },
    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,
}

/// Install a stderr fmt subscriber filtered by `RUST_LOG`, or `default_level`
/// when the variable is unset or unparsable
pub fn init_logging(default_level: &str) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level).map_err(|e| LoggingError::InvalidFilter {
            directive: default_level.to_string(),
            message: e.to_string(),
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)
}
