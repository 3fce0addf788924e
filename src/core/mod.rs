//! Core types and constants for the compass

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
