//! Geodesy algorithms

pub mod geodesy;

pub use geodesy::{
    bearing_result, cardinal, distance_km, initial_bearing_degrees, is_bearing_defined,
    normalize_degrees, shortest_delta_degrees,
};
