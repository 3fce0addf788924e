//! Core data types for the compass

use crate::core::constants::{JERUSALEM_LATITUDE, JERUSALEM_LONGITUDE};
use serde::{Deserialize, Serialize};

/// Point on the Earth's surface in geodetic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees, -90..=90
    pub latitude: f64,
    /// Longitude in decimal degrees, -180..=180
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Location fix as reported by the platform location provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fix {
    #[serde(flatten)]
    pub point: GeoPoint,
    /// Horizontal accuracy radius (meters)
    pub accuracy: Option<f64>,
    /// Altitude above the reference ellipsoid (meters)
    pub altitude: Option<f64>,
    /// Course over ground, degrees clockwise from true north
    pub device_heading: Option<f64>,
    /// Ground speed (m/s)
    pub speed: Option<f64>,
    /// Milliseconds since the Unix epoch
    pub timestamp_millis: u64,
}

impl Fix {
    pub fn new(point: GeoPoint, timestamp_millis: u64) -> Self {
        Self {
            point,
            accuracy: None,
            altitude: None,
            device_heading: None,
            speed: None,
            timestamp_millis,
        }
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    pub fn with_device_heading(mut self, heading: f64) -> Self {
        self.device_heading = Some(heading);
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }
}

/// One of the eight compass sectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cardinal {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Cardinal {
    /// Sectors in clockwise order starting at north
    pub const ALL: [Cardinal; 8] = [
        Cardinal::N,
        Cardinal::NE,
        Cardinal::E,
        Cardinal::SE,
        Cardinal::S,
        Cardinal::SW,
        Cardinal::W,
        Cardinal::NW,
    ];

    /// Sector for an index, wrapping modulo 8
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Position of this sector in clockwise order
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display label for the given locale
    pub fn label(self, locale: Locale) -> &'static str {
        const EN: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
        const PT: [&str; 8] = ["N", "NE", "L", "SE", "S", "SO", "O", "NO"];
        match locale {
            Locale::English => EN[self.index()],
            Locale::PortugueseBr => PT[self.index()],
        }
    }
}

/// Distance, bearing and sector from the user to the target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BearingResult {
    pub distance_km: f64,
    pub bearing_degrees: f64,
    pub cardinal: Cardinal,
}

/// Heading record owned by the smoother and copied out to the display layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingState {
    /// Latest raw heading, `None` until any source has reported
    pub raw_heading: Option<f64>,
    /// Low-pass filtered heading in [0, 360)
    pub smoothed_heading: f64,
    /// An absolute orientation reading has been received at least once
    pub is_calibrated: bool,
    /// Smoothed heading is within the alignment threshold of the target bearing
    pub is_aligned: bool,
}

impl Default for HeadingState {
    fn default() -> Self {
        Self {
            raw_heading: None,
            smoothed_heading: 0.0,
            is_calibrated: false,
            is_aligned: false,
        }
    }
}

/// Language used for user-facing labels and messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    English,
    #[default]
    PortugueseBr,
}

/// Fixed destination the compass points at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub point: GeoPoint,
    pub name: String,
    pub name_hebrew: String,
}

impl Target {
    pub fn jerusalem() -> Self {
        Self {
            point: GeoPoint::new(JERUSALEM_LATITUDE, JERUSALEM_LONGITUDE),
            name: "Jerusalém".to_string(),
            name_hebrew: "יְרוּשָׁלַיִם".to_string(),
        }
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::jerusalem()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_index_wraps() {
        assert_eq!(Cardinal::from_index(0), Cardinal::N);
        assert_eq!(Cardinal::from_index(8), Cardinal::N);
        assert_eq!(Cardinal::from_index(10), Cardinal::E);
        assert_eq!(Cardinal::SW.index(), 5);
    }

    #[test]
    fn test_cardinal_labels_follow_locale() {
        assert_eq!(Cardinal::E.label(Locale::English), "E");
        assert_eq!(Cardinal::E.label(Locale::PortugueseBr), "L");
        assert_eq!(Cardinal::NW.label(Locale::PortugueseBr), "NO");
        assert_eq!(Cardinal::SW.label(Locale::English), "SW");
    }

    #[test]
    fn test_fix_serializes_flat_camel_case() {
        let fix = Fix::new(GeoPoint::new(-23.55, -46.63), 1_000).with_device_heading(45.0);
        let json = serde_json::to_value(&fix).unwrap();

        assert_eq!(json["latitude"], -23.55);
        assert_eq!(json["deviceHeading"], 45.0);
        assert_eq!(json["timestampMillis"], 1_000);
        assert!(json["speed"].is_null());
    }

    #[test]
    fn test_default_target_is_jerusalem() {
        let target = Target::default();
        assert_eq!(target.point, GeoPoint::new(31.7683, 35.2137));
        assert_eq!(target.name, "Jerusalém");
    }
}
