//! Data validation for sensor input

pub mod data;

pub use data::{
    sanitize_fix, validate_fix, validate_heading, validate_point, ValidationError, ValidationResult,
};
