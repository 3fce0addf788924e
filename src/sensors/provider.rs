//! Sensor provider traits and tracking options

use crate::core::{Fix, LOCATION_MAXIMUM_AGE_MS, LOCATION_TIMEOUT_MS};
use crate::processing::{HapticPulse, OrientationCapability, OrientationSample};
use crate::sensors::SensorResult;
use serde::{Deserialize, Serialize};

/// Source of location fixes
pub trait LocationProvider {
    /// Begin continuous tracking
    fn start(&mut self, options: &TrackingOptions) -> SensorResult<()>;

    /// Next pending update, if any.
    /// Returns Ok(Some(fix)) for a new fix, Ok(None) if nothing arrived since
    /// the last poll, Err(error) if the provider reported an error instead.
    fn poll(&mut self) -> SensorResult<Option<Fix>>;

    /// Stop tracking and release the subscription
    fn stop(&mut self);

    fn is_tracking(&self) -> bool;
}

/// Source of raw device-orientation events
pub trait OrientationProvider {
    /// What the hardware can deliver; probed once before `start`
    fn capability(&self) -> OrientationCapability;

    /// Subscribe to orientation events. Returns false if permission was refused.
    fn start(&mut self) -> bool;

    /// Next pending event, if any (non-blocking)
    fn poll(&mut self) -> Option<OrientationSample>;

    /// Unsubscribe from orientation events
    fn stop(&mut self);
}

/// Vibration motor or equivalent
pub trait HapticActuator {
    /// Play the pulse; returns false if the device cannot vibrate
    fn vibrate(&mut self, pulse: &HapticPulse) -> bool;
}

/// Options handed to the location provider when tracking starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingOptions {
    /// Prefer GPS over network positioning
    pub enable_high_accuracy: bool,
    /// Give up on a fix after this long (milliseconds)
    pub timeout_ms: u32,
    /// Accept cached fixes up to this age (milliseconds)
    pub maximum_age_ms: u32,
}

impl Default for TrackingOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout_ms: LOCATION_TIMEOUT_MS,
            maximum_age_ms: LOCATION_MAXIMUM_AGE_MS,
        }
    }
}
