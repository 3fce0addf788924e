//! Display formatting for distances, bearings and compass status
//!
//! This module provides the strings shown to the user along with
//! human-readable and JSON renderings of navigation updates.

use crate::algorithms::geodesy::cardinal;
use crate::api::types::{HeadingFrame, NavigationUpdate};
use crate::core::{HeadingState, Locale};

/// Human-readable distance in the default pt-BR form.
///
/// Whole meters below 1 km, one decimal below 100 km, and whole kilometers
/// with `.` thousands separators beyond that.
pub fn format_distance(km: f64) -> String {
    format_distance_localized(km, Locale::PortugueseBr)
}

/// Human-readable distance with the locale's thousands separator
/// (`.` for pt-BR, `,` for English). Halves round away from zero.
pub fn format_distance_localized(km: f64, locale: Locale) -> String {
    if km < 1.0 {
        format!("{} m", (km * 1000.0).round() as i64)
    } else if km < 100.0 {
        format!("{:.1} km", (km * 10.0).round() / 10.0)
    } else {
        format!("{} km", group_thousands(km.round() as u64, thousands_separator(locale)))
    }
}

fn thousands_separator(locale: Locale) -> char {
    match locale {
        Locale::PortugueseBr => '.',
        Locale::English => ',',
    }
}

/// Insert `separator` between every group of three digits
pub fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Rounded bearing with its sector label, e.g. `"58° NE"`
pub fn format_bearing(bearing_degrees: f64, locale: Locale) -> String {
    format!(
        "{}° {}",
        bearing_degrees.round() as i64,
        cardinal(bearing_degrees).label(locale)
    )
}

/// Rounded heading, e.g. `"271°"`
pub fn format_heading(heading_degrees: f64) -> String {
    format!("{}°", heading_degrees.round() as i64)
}

/// Status line telling the user whether the compass needs calibrating
pub fn calibration_hint(calibrated: bool, locale: Locale) -> &'static str {
    match (calibrated, locale) {
        (true, Locale::PortugueseBr) => "🧭 Bússola calibrada",
        (false, Locale::PortugueseBr) => "⚠️ Mova o celular em forma de 8 para calibrar",
        (true, Locale::English) => "🧭 Compass calibrated",
        (false, Locale::English) => "⚠️ Move the phone in a figure 8 to calibrate",
    }
}

/// Human-readable text formatter
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    /// Single-line output
    pub compact: bool,
    pub locale: Locale,
}

impl TextFormatter {
    pub fn new(locale: Locale) -> Self {
        Self {
            compact: false,
            locale,
        }
    }

    pub fn compact(locale: Locale) -> Self {
        Self {
            compact: true,
            locale,
        }
    }

    /// Format a navigation update
    pub fn format_navigation(&self, update: &NavigationUpdate) -> String {
        let bearing = format_bearing(update.result.bearing_degrees, self.locale);
        if self.compact {
            return format!(
                "{}: {} | {} | {:.5}, {:.5}",
                update.target.name,
                update.target.distance_formatted,
                bearing,
                update.position.point.latitude,
                update.position.point.longitude
            );
        }

        let mut output = String::new();
        output.push_str(&format!("Target: {}\n", update.target.name));
        output.push_str(&format!("  Distance: {}\n", update.target.distance_formatted));
        output.push_str(&format!("  Bearing:  {}\n", bearing));
        output.push_str(&format!(
            "  Position: {:.6}, {:.6}",
            update.position.point.latitude, update.position.point.longitude
        ));
        if let Some(accuracy) = update.position.accuracy {
            output.push_str(&format!(" (±{:.0} m)", accuracy));
        }
        output.push('\n');
        output
    }

    /// Format the heading line shown every frame
    pub fn format_heading_state(&self, state: &HeadingState) -> String {
        let mut line = format!(
            "Heading {} | {}",
            format_heading(state.smoothed_heading),
            calibration_hint(state.is_calibrated, self.locale)
        );
        if state.is_aligned {
            line.push_str(" | aligned");
        }
        line
    }
}

/// JSON formatter
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn format_navigation(&self, update: &NavigationUpdate) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(update)
        } else {
            serde_json::to_string(update)
        }
    }

    pub fn format_heading_frame(&self, frame: &HeadingFrame) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(frame)
        } else {
            serde_json::to_string(frame)
        }
    }
}
