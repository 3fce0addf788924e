//! Utility modules for configuration and logging

pub mod config;
pub mod logging;

pub use config::{CompassConfig, ConfigError, ConfigResult};
pub use logging::{init_logging, LoggingError};
