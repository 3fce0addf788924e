//! Range checks for coordinates and location fixes entering the system

use crate::core::{Fix, GeoPoint};
use thiserror::Error;

/// Validation errors for externally supplied data
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Latitude out of range: {latitude} (expected -90..=90)")]
    LatitudeOutOfRange { latitude: f64 },
    #[error("Longitude out of range: {longitude} (expected -180..=180)")]
    LongitudeOutOfRange { longitude: f64 },
    #[error("Non-finite value for {field}")]
    NotFinite { field: &'static str },
    #[error("Negative {field}: {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("Heading out of range: {heading} (expected 0..=360)")]
    HeadingOutOfRange { heading: f64 },
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Check that a point lies on the globe
pub fn validate_point(point: &GeoPoint) -> ValidationResult<()> {
    if !point.latitude.is_finite() {
        return Err(ValidationError::NotFinite { field: "latitude" });
    }
    if !point.longitude.is_finite() {
        return Err(ValidationError::NotFinite { field: "longitude" });
    }
    if !(-90.0..=90.0).contains(&point.latitude) {
        return Err(ValidationError::LatitudeOutOfRange {
            latitude: point.latitude,
        });
    }
    if !(-180.0..=180.0).contains(&point.longitude) {
        return Err(ValidationError::LongitudeOutOfRange {
            longitude: point.longitude,
        });
    }
    Ok(())
}

/// Check a heading in degrees, accepting the closed range the platform reports
pub fn validate_heading(heading: f64) -> ValidationResult<()> {
    if !heading.is_finite() {
        return Err(ValidationError::NotFinite { field: "heading" });
    }
    if !(0.0..=360.0).contains(&heading) {
        return Err(ValidationError::HeadingOutOfRange { heading });
    }
    Ok(())
}

fn validate_non_negative(field: &'static str, value: Option<f64>) -> ValidationResult<()> {
    match value {
        Some(v) if !v.is_finite() => Err(ValidationError::NotFinite { field }),
        Some(v) if v < 0.0 => Err(ValidationError::Negative { field, value: v }),
        _ => Ok(()),
    }
}

/// Validate every populated field of a fix
pub fn validate_fix(fix: &Fix) -> ValidationResult<()> {
    validate_point(&fix.point)?;
    validate_non_negative("accuracy", fix.accuracy)?;
    validate_non_negative("speed", fix.speed)?;
    if let Some(altitude) = fix.altitude {
        if !altitude.is_finite() {
            return Err(ValidationError::NotFinite { field: "altitude" });
        }
    }
    if let Some(heading) = fix.device_heading {
        validate_heading(heading)?;
    }
    Ok(())
}

/// Check the position of a fix and strip optional fields that fail their
/// checks.
///
/// Only an invalid position is fatal. Bad accuracy, altitude, heading or speed
/// values are cleared and returned alongside the cleaned fix; stationary
/// devices commonly report a NaN heading.
pub fn sanitize_fix(mut fix: Fix) -> ValidationResult<(Fix, Vec<ValidationError>)> {
    validate_point(&fix.point)?;

    let mut dropped = Vec::new();
    clear_if_invalid(&mut fix.accuracy, &mut dropped, |v| {
        validate_non_negative("accuracy", Some(v))
    });
    clear_if_invalid(&mut fix.speed, &mut dropped, |v| {
        validate_non_negative("speed", Some(v))
    });
    clear_if_invalid(&mut fix.altitude, &mut dropped, |v| {
        if v.is_finite() {
            Ok(())
        } else {
            Err(ValidationError::NotFinite { field: "altitude" })
        }
    });
    clear_if_invalid(&mut fix.device_heading, &mut dropped, validate_heading);
    Ok((fix, dropped))
}

fn clear_if_invalid(
    value: &mut Option<f64>,
    dropped: &mut Vec<ValidationError>,
    check: impl Fn(f64) -> ValidationResult<()>,
) {
    if let Some(v) = *value {
        if let Err(error) = check(v) {
            *value = None;
            dropped.push(error);
        }
    }
}
