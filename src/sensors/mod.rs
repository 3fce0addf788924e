//! Sensor abstraction layer
//!
//! The compass consumes fixes from a location provider and raw events from
//! an orientation sensor, and drives an optional haptic actuator. Platform
//! bindings implement these traits; the mocks replay scripted input.

pub mod provider;
pub mod mock;
pub mod error;

pub use provider::{HapticActuator, LocationProvider, OrientationProvider, TrackingOptions};
pub use mock::{MockLocationProvider, MockOrientationSensor, RecordingHaptics};
pub use error::{LocationError, SensorResult};
