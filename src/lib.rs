//! Jerusalem Compass
//!
//! Points the user toward Jerusalem from live device sensors: great-circle
//! distance and bearing from each location fix, a low-pass filtered compass
//! heading, and alignment detection with rate-limited haptic feedback.

pub mod core;
pub mod algorithms;
pub mod processing;
pub mod validation;
pub mod utils;
pub mod sensors;
pub mod api;

// Re-export commonly used types
pub use crate::core::{BearingResult, Cardinal, Fix, GeoPoint, HeadingState, Locale, Target};
pub use crate::algorithms::geodesy::{cardinal, distance_km, initial_bearing_degrees};
pub use crate::api::formatting::format_distance;
pub use crate::processing::{HeadingSmoother, HeadingSource, OrientationSample, TickOutcome};
pub use crate::sensors::{
    HapticActuator, LocationError, LocationProvider, OrientationProvider, TrackingOptions,
};
pub use crate::api::{CompassSession, NavigationUpdate, SessionEvent, SessionState};
pub use crate::utils::CompassConfig;
