//! Spherical-Earth geodesy: great-circle distance, initial bearing and
//! compass sectors.
//!
//! All functions are pure. Inputs are not range-checked here; use
//! [`crate::validation::data::validate_point`] at the boundary where
//! coordinates enter the system.

use crate::core::{BearingResult, Cardinal, GeoPoint, EARTH_RADIUS_KM};
use nalgebra::Vector3;

/// Cross-product magnitude below which two n-vectors are treated as parallel
const PARALLEL_EPSILON: f64 = 1e-12;

/// Wrap an angle into [0, 360)
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Signed shortest rotation from `from` to `to`, in [-180, 180)
pub fn shortest_delta_degrees(to: f64, from: f64) -> f64 {
    (to - from + 540.0).rem_euclid(360.0) - 180.0
}

/// Haversine great-circle distance in kilometers
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Forward azimuth from `a` to `b`, degrees clockwise from true north in [0, 360).
///
/// The bearing is undefined for coincident or antipodal points; in that case
/// the result is whatever the formula yields (0 for identical points), see
/// [`is_bearing_defined`].
pub fn initial_bearing_degrees(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    normalize_degrees(y.atan2(x).to_degrees())
}

/// Nearest of the eight compass sectors
pub fn cardinal(bearing_degrees: f64) -> Cardinal {
    let sector = (normalize_degrees(bearing_degrees) / 45.0).round() as usize;
    Cardinal::from_index(sector)
}

/// Distance, bearing and sector from `from` to `to` in one pass
pub fn bearing_result(from: GeoPoint, to: GeoPoint) -> BearingResult {
    let bearing_degrees = initial_bearing_degrees(from, to);
    BearingResult {
        distance_km: distance_km(from, to),
        bearing_degrees,
        cardinal: cardinal(bearing_degrees),
    }
}

/// Unit normal vector to the sphere at `point` (earth-centred, earth-fixed axes)
pub fn to_n_vector(point: GeoPoint) -> Vector3<f64> {
    let lat = point.latitude.to_radians();
    let lon = point.longitude.to_radians();
    Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

/// Whether a unique initial bearing exists between the two points.
///
/// Fails for coincident and antipodal pairs, where every great circle
/// through `a` also passes through `b`.
pub fn is_bearing_defined(a: GeoPoint, b: GeoPoint) -> bool {
    to_n_vector(a).cross(&to_n_vector(b)).norm() > PARALLEL_EPSILON
}
