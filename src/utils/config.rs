use crate::core::{
    Locale, Target, ALIGNMENT_THRESHOLD_DEG, HAPTIC_COOLDOWN_MS, HAPTIC_PATTERN_MS,
    SMOOTHING_FACTOR,
};
use crate::processing::{HapticGate, HeadingSmoother};
use crate::sensors::TrackingOptions;
use crate::validation::validate_point;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Compass configuration, loadable from JSON.
///
/// Missing fields fall back to their defaults, so a file only needs the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompassConfig {
    /// Destination the compass points at
    pub target: Target,
    /// Fraction of the remaining heading error applied per frame, (0, 1]
    pub smoothing_factor: f64,
    /// Half-width of the alignment band (degrees)
    pub alignment_threshold_deg: f64,
    /// Minimum interval between haptic pulses (milliseconds)
    pub haptic_cooldown_ms: u64,
    /// On/off vibration durations (milliseconds)
    pub haptic_pattern_ms: Vec<u32>,
    /// Forward alignment pulses to the actuator
    pub haptics_enabled: bool,
    /// Options for the location provider
    pub tracking: TrackingOptions,
    /// Language for labels and messages
    pub locale: Locale,
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            target: Target::jerusalem(),
            smoothing_factor: SMOOTHING_FACTOR,
            alignment_threshold_deg: ALIGNMENT_THRESHOLD_DEG,
            haptic_cooldown_ms: HAPTIC_COOLDOWN_MS,
            haptic_pattern_ms: HAPTIC_PATTERN_MS.to_vec(),
            haptics_enabled: true,
            tracking: TrackingOptions::default(),
            locale: Locale::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {parameter} = {value}: {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    #[error("Failed to access config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed config: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

fn invalid(parameter: &str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::InvalidParameter {
        parameter: parameter.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

impl CompassConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a JSON config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: CompassConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let path = path.as_ref();
        let json = self.to_json_string()?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check every parameter against its allowed range
    pub fn validate(&self) -> ConfigResult<()> {
        validate_point(&self.target.point)
            .map_err(|e| invalid("target.point", format!("{:?}", self.target.point), &e.to_string()))?;

        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(invalid(
                "smoothing_factor",
                self.smoothing_factor,
                "must be in (0, 1]",
            ));
        }
        if !(self.alignment_threshold_deg > 0.0 && self.alignment_threshold_deg < 180.0) {
            return Err(invalid(
                "alignment_threshold_deg",
                self.alignment_threshold_deg,
                "must be in (0, 180)",
            ));
        }
        if self.haptic_pattern_ms.is_empty() {
            return Err(invalid("haptic_pattern_ms", "[]", "must not be empty"));
        }
        if self.tracking.timeout_ms == 0 {
            return Err(invalid("tracking.timeout_ms", 0, "must be positive"));
        }
        Ok(())
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    pub fn with_smoothing_factor(mut self, factor: f64) -> Self {
        self.smoothing_factor = factor;
        self
    }

    pub fn with_alignment_threshold(mut self, threshold_deg: f64) -> Self {
        self.alignment_threshold_deg = threshold_deg;
        self
    }

    pub fn with_haptic_cooldown(mut self, cooldown_ms: u64) -> Self {
        self.haptic_cooldown_ms = cooldown_ms;
        self
    }

    pub fn with_haptics_enabled(mut self, enabled: bool) -> Self {
        self.haptics_enabled = enabled;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn haptic_gate(&self) -> HapticGate {
        HapticGate::new(self.haptic_cooldown_ms, self.haptic_pattern_ms.clone())
    }

    /// Smoother configured with this filter gain, alignment band and haptic gate
    pub fn smoother(&self) -> HeadingSmoother {
        HeadingSmoother::with_parameters(
            self.smoothing_factor,
            self.alignment_threshold_deg,
            self.haptic_gate(),
        )
    }
}
