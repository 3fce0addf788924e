//! Physical constants and compass parameters

/// Mean Earth radius used by the spherical model (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Jerusalem (Western Wall / Temple Mount) latitude in decimal degrees
pub const JERUSALEM_LATITUDE: f64 = 31.7683;

/// Jerusalem (Western Wall / Temple Mount) longitude in decimal degrees
pub const JERUSALEM_LONGITUDE: f64 = 35.2137;

/// Fraction of the remaining angular error applied per frame
pub const SMOOTHING_FACTOR: f64 = 0.15;

/// Maximum absolute heading error (degrees) that still counts as aligned
pub const ALIGNMENT_THRESHOLD_DEG: f64 = 5.0;

/// Minimum interval between two haptic pulses (milliseconds)
pub const HAPTIC_COOLDOWN_MS: u64 = 3000;

/// Vibrate / pause / vibrate pattern emitted on alignment (milliseconds)
pub const HAPTIC_PATTERN_MS: [u32; 3] = [80, 50, 80];

/// Location provider timeout (milliseconds)
pub const LOCATION_TIMEOUT_MS: u32 = 15_000;

/// Maximum age of a cached location fix the provider may return (milliseconds)
pub const LOCATION_MAXIMUM_AGE_MS: u32 = 5_000;
