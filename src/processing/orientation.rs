//! Classification of raw device-orientation events into compass readings
//!
//! Platforms deliver orientation on two streams: an absolute one (referenced
//! to magnetic north) and a relative one whose zero is arbitrary. Some
//! platforms also attach a ready-made compass heading to either stream. A
//! sample is turned into at most one [`HeadingReading`]; only absolute
//! readings calibrate the compass.

use crate::algorithms::geodesy::normalize_degrees;
use serde::{Deserialize, Serialize};

/// Event stream a sample was delivered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrientationStream {
    Absolute,
    Relative,
}

/// What the orientation hardware can deliver, probed once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrientationCapability {
    /// Absolute (north-referenced) events are available
    Absolute,
    /// Only relative events; calibration depends on a compass-heading field
    RelativeOnly,
    /// No orientation sensor
    Unavailable,
}

/// Where the smoother's raw heading comes from for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingSource {
    /// Orientation events, with course over ground until calibrated
    OrientationSensor,
    /// Course over ground from the location provider only
    CourseOverGround,
}

impl HeadingSource {
    pub fn select(capability: OrientationCapability) -> Self {
        match capability {
            OrientationCapability::Absolute | OrientationCapability::RelativeOnly => {
                HeadingSource::OrientationSensor
            }
            OrientationCapability::Unavailable => HeadingSource::CourseOverGround,
        }
    }
}

/// Raw orientation event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationSample {
    pub stream: OrientationStream,
    /// Event claims to be referenced to magnetic north
    pub absolute: bool,
    /// Rotation about the z axis, counter-clockwise degrees
    pub alpha: Option<f64>,
    /// Clockwise compass heading supplied directly by the platform
    pub webkit_compass_heading: Option<f64>,
}

impl OrientationSample {
    /// Absolute-stream event carrying only alpha
    pub fn absolute(alpha: f64) -> Self {
        Self {
            stream: OrientationStream::Absolute,
            absolute: true,
            alpha: Some(alpha),
            webkit_compass_heading: None,
        }
    }

    /// Relative-stream event carrying only alpha
    pub fn relative(alpha: f64) -> Self {
        Self {
            stream: OrientationStream::Relative,
            absolute: false,
            alpha: Some(alpha),
            webkit_compass_heading: None,
        }
    }

    /// Event carrying a platform compass heading
    pub fn compass(stream: OrientationStream, heading: f64) -> Self {
        Self {
            stream,
            absolute: false,
            alpha: None,
            webkit_compass_heading: Some(heading),
        }
    }

    /// Interpret this sample given the current calibration status
    pub fn reading(&self, calibrated: bool) -> Option<HeadingReading> {
        match self.stream {
            OrientationStream::Absolute => {
                if !self.absolute && self.webkit_compass_heading.is_none() {
                    return None;
                }
                self.webkit_compass_heading
                    .or_else(|| self.alpha.map(alpha_to_heading))
                    .map(|h| HeadingReading::Absolute(normalize_degrees(h)))
            }
            OrientationStream::Relative => {
                if calibrated {
                    return None;
                }
                if let Some(heading) = self.webkit_compass_heading {
                    return Some(HeadingReading::Absolute(normalize_degrees(heading)));
                }
                self.alpha
                    .map(|alpha| HeadingReading::Relative(normalize_degrees(alpha_to_heading(alpha))))
            }
        }
    }
}

/// Heading extracted from an orientation sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeadingReading {
    /// North-referenced; calibrates the compass
    Absolute(f64),
    /// Best-effort estimate while uncalibrated
    Relative(f64),
}

impl HeadingReading {
    pub fn degrees(self) -> f64 {
        match self {
            HeadingReading::Absolute(h) | HeadingReading::Relative(h) => h,
        }
    }
}

// alpha grows counter-clockwise, compass headings clockwise
fn alpha_to_heading(alpha: f64) -> f64 {
    360.0 - alpha
}
