//! Common API types and data structures

use crate::core::{BearingResult, Fix, HeadingState, Target};
use crate::processing::{HapticPulse, HeadingSource};
use crate::sensors::LocationError;
use crate::utils::ConfigError;
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that prevent a session from starting
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
    #[error("Location provider failed to start: {0}")]
    Location(#[from] LocationError),
    #[error("No location provider attached")]
    NoLocationProvider,
}

/// Lifecycle of a compass session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    Running,
    Stopped,
}

/// Per-fix report of where the target lies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetReport {
    pub name: String,
    /// Great-circle distance (km)
    pub distance: f64,
    pub distance_formatted: String,
    /// Initial bearing from the user (degrees)
    pub bearing: f64,
    /// Localized sector label
    pub bearing_cardinal: String,
}

impl TargetReport {
    pub fn new(target: &Target, result: &BearingResult, distance_formatted: String, cardinal_label: &str) -> Self {
        Self {
            name: target.name.clone(),
            distance: result.distance_km,
            distance_formatted,
            bearing: result.bearing_degrees,
            bearing_cardinal: cardinal_label.to_string(),
        }
    }
}

/// Payload delivered to navigation callbacks for every accepted fix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationUpdate {
    pub position: Fix,
    /// Geodesy output the target report was built from
    pub result: BearingResult,
    pub target: TargetReport,
}

/// Events reported to event callbacks
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Session started with the selected heading source
    Started { heading_source: HeadingSource },
    /// Orientation permission was refused; heading falls back to course over ground
    OrientationUnavailable,
    /// First absolute orientation reading received
    Calibrated { heading: f64 },
    /// A fix with an invalid position was dropped
    FixRejected { error: ValidationError },
    /// Optional fields of a fix failed validation and were cleared
    FixFieldsDropped { errors: Vec<ValidationError> },
    /// The location provider reported an error instead of a fix
    LocationFailed { error: LocationError, message: String },
    /// A haptic pulse was emitted on reaching alignment
    HapticTriggered { pulse: HapticPulse, delivered: bool },
    /// Alignment with the target changed
    AlignmentChanged { aligned: bool, heading: f64 },
    Stopped,
}

/// Snapshot handed to heading callbacks every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingFrame {
    pub state: HeadingState,
    /// Rotation of the target pointer relative to the device, if a target bearing is known
    pub arrow_rotation: Option<f64>,
    pub timestamp_ms: u64,
}
