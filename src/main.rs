use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use jerusalem_compass::api::{HeadingFrame, JsonFormatter, TextFormatter};
use jerusalem_compass::processing::OrientationCapability;
use jerusalem_compass::sensors::{MockLocationProvider, MockOrientationSensor, RecordingHaptics};
use jerusalem_compass::utils::init_logging;
use jerusalem_compass::{
    initial_bearing_degrees, CompassConfig, CompassSession, Fix, GeoPoint, NavigationUpdate,
    OrientationSample, SessionEvent,
};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::info;

/// Degrees the simulated device starts away from the target
const APPROACH_DEG: f64 = 60.0;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Simulated compass session pointing toward Jerusalem
#[derive(Debug, Parser)]
#[command(name = "jerusalem-compass", version)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulated user latitude
    #[arg(long, default_value_t = -23.5505, allow_hyphen_values = true)]
    lat: f64,

    /// Simulated user longitude
    #[arg(long, default_value_t = -46.6333, allow_hyphen_values = true)]
    lon: f64,

    /// Number of display frames to simulate
    #[arg(long, default_value_t = 240)]
    frames: u64,

    /// Frame interval in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Degrees the simulated device turns per frame
    #[arg(long, default_value_t = 0.5)]
    turn_rate: f64,

    /// Output format for navigation updates
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level).context("failed to initialise logging")?;

    let config = match &cli.config {
        Some(path) => CompassConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => CompassConfig::default(),
    };
    let locale = config.locale;
    let user = GeoPoint::new(cli.lat, cli.lon);

    let mut location = MockLocationProvider::new();
    location.push_fix(Fix::new(user, 0).with_accuracy(12.0));

    // start facing away from the target, turn toward it, then hold still
    let bearing = initial_bearing_degrees(user, config.target.point);
    if cli.turn_rate.is_nan() || cli.turn_rate <= 0.0 {
        anyhow::bail!("turn rate must be positive, got {}", cli.turn_rate);
    }
    let turn_frames = (APPROACH_DEG / cli.turn_rate).ceil() as usize;
    let mut orientation = MockOrientationSensor::new(OrientationCapability::Absolute);
    orientation.push_sweep(bearing - APPROACH_DEG, cli.turn_rate, turn_frames);
    orientation.push_sample(OrientationSample::absolute(360.0 - bearing));

    let haptics = RecordingHaptics::new();
    let pulses = haptics.log();

    let mut session = CompassSession::new(config)
        .with_location_provider(Box::new(location))
        .with_orientation_provider(Box::new(orientation))
        .with_haptics(Box::new(haptics));

    let format = cli.format;
    session.on_navigation(Box::new(move |update: &NavigationUpdate| match format {
        OutputFormat::Text => print!("{}", TextFormatter::new(locale).format_navigation(update)),
        OutputFormat::Json => match JsonFormatter::pretty().format_navigation(update) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!(error = %e, "Failed to serialise navigation update"),
        },
    }));
    session.on_event(Box::new(|event: &SessionEvent| match event {
        SessionEvent::AlignmentChanged { aligned, heading } => {
            info!(aligned, heading = *heading, "Alignment changed")
        }
        SessionEvent::HapticTriggered { pulse, delivered } => {
            info!(pattern = ?pulse.pattern_ms, delivered, "Haptic pulse")
        }
        SessionEvent::LocationFailed { message, .. } => tracing::warn!("{}", message),
        other => tracing::debug!(?other, "Session event"),
    }));

    let last_heading = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&last_heading);
    session.on_heading(Box::new(move |frame: &HeadingFrame| {
        *sink.borrow_mut() = Some(*frame);
    }));

    session.start().context("failed to start compass session")?;

    let text = TextFormatter::new(locale);
    for frame in 0..cli.frames {
        let now_ms = frame * cli.frame_ms;
        session.poll(now_ms);
        if frame % 60 == 0 {
            let latest = *last_heading.borrow();
            if let Some(latest) = latest {
                println!("{}", text.format_heading_state(&latest.state));
            }
        }
    }

    let state = session.heading_state();
    println!("{}", text.format_heading_state(&state));
    println!("Haptic pulses: {}", pulses.borrow().len());
    session.stop();
    Ok(())
}
