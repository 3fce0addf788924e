//! Host-facing API
//!
//! This module provides the callback-driven compass session together with
//! the types it emits and the formatters used to display them.

pub mod callback;
pub mod types;
pub mod formatting;

// Re-export commonly used API types
pub use types::{
    HeadingFrame, NavigationUpdate, SessionError, SessionEvent, SessionResult, SessionState,
    TargetReport,
};
pub use callback::{CompassSession, EventCallback, HeadingCallback, NavigationCallback};
pub use formatting::{
    calibration_hint, format_bearing, format_distance, format_distance_localized,
    format_heading, group_thousands, JsonFormatter, TextFormatter,
};
