//! Callback-based compass session
//!
//! A [`CompassSession`] wires the location provider, the orientation sensor and
//! the haptic actuator to a [`HeadingSmoother`]. The host drives it once per
//! display frame with [`CompassSession::poll`]; results are pushed to the
//! registered callbacks. Sensor errors never escape as `Err`: they surface as
//! [`SessionEvent`]s and the session keeps running.

use crate::algorithms::geodesy::{bearing_result, is_bearing_defined};
use crate::api::formatting::format_distance_localized;
use crate::api::types::{
    HeadingFrame, NavigationUpdate, SessionError, SessionEvent, SessionResult, SessionState,
    TargetReport,
};
use crate::core::{Fix, HeadingState};
use crate::processing::{HeadingReading, HeadingSmoother, HeadingSource, OrientationSample};
use crate::sensors::{HapticActuator, LocationError, LocationProvider, OrientationProvider};
use crate::utils::CompassConfig;
use crate::validation::sanitize_fix;
use tracing::{debug, info, warn};

/// Callback for per-frame heading updates
pub type HeadingCallback = Box<dyn FnMut(&HeadingFrame)>;

/// Callback for per-fix navigation updates
pub type NavigationCallback = Box<dyn FnMut(&NavigationUpdate)>;

/// Callback for session events
pub type EventCallback = Box<dyn FnMut(&SessionEvent)>;

/// Compass session driven by a frame loop
pub struct CompassSession {
    config: CompassConfig,
    smoother: HeadingSmoother,
    state: SessionState,
    heading_source: Option<HeadingSource>,
    location: Option<Box<dyn LocationProvider>>,
    orientation: Option<Box<dyn OrientationProvider>>,
    haptics: Option<Box<dyn HapticActuator>>,
    heading_callbacks: Vec<HeadingCallback>,
    navigation_callbacks: Vec<NavigationCallback>,
    event_callbacks: Vec<EventCallback>,
    last_navigation: Option<NavigationUpdate>,
    last_frame_ms: u64,
}

impl CompassSession {
    pub fn new(config: CompassConfig) -> Self {
        let smoother = config.smoother();
        Self {
            config,
            smoother,
            state: SessionState::Idle,
            heading_source: None,
            location: None,
            orientation: None,
            haptics: None,
            heading_callbacks: Vec::new(),
            navigation_callbacks: Vec::new(),
            event_callbacks: Vec::new(),
            last_navigation: None,
            last_frame_ms: 0,
        }
    }

    pub fn with_location_provider(mut self, provider: Box<dyn LocationProvider>) -> Self {
        self.location = Some(provider);
        self
    }

    pub fn with_orientation_provider(mut self, provider: Box<dyn OrientationProvider>) -> Self {
        self.orientation = Some(provider);
        self
    }

    pub fn with_haptics(mut self, actuator: Box<dyn HapticActuator>) -> Self {
        self.haptics = Some(actuator);
        self
    }

    pub fn on_heading(&mut self, callback: HeadingCallback) {
        self.heading_callbacks.push(callback);
    }

    pub fn on_navigation(&mut self, callback: NavigationCallback) {
        self.navigation_callbacks.push(callback);
    }

    pub fn on_event(&mut self, callback: EventCallback) {
        self.event_callbacks.push(callback);
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &CompassConfig {
        &self.config
    }

    /// Heading source chosen at start, `None` before the session has started
    pub fn heading_source(&self) -> Option<HeadingSource> {
        self.heading_source
    }

    pub fn heading_state(&self) -> HeadingState {
        self.smoother.state()
    }

    pub fn last_navigation(&self) -> Option<&NavigationUpdate> {
        self.last_navigation.as_ref()
    }

    /// Rotation of the target pointer relative to the device
    pub fn arrow_rotation(&self) -> Option<f64> {
        self.smoother.arrow_rotation()
    }

    /// Subscribe to the sensors and begin accepting input.
    ///
    /// The heading source is chosen here, once, from the orientation
    /// sensor's capability. Calling `start` on a running session is a no-op.
    pub fn start(&mut self) -> SessionResult<()> {
        if self.state == SessionState::Running {
            return Ok(());
        }
        self.config.validate()?;

        let location = self.location.as_mut().ok_or(SessionError::NoLocationProvider)?;
        location.start(&self.config.tracking)?;

        let mut source = HeadingSource::CourseOverGround;
        let mut orientation_refused = false;
        if let Some(orientation) = self.orientation.as_mut() {
            source = HeadingSource::select(orientation.capability());
            if source == HeadingSource::OrientationSensor && !orientation.start() {
                orientation_refused = true;
                source = HeadingSource::CourseOverGround;
            }
        }

        self.heading_source = Some(source);
        self.smoother.resume();
        self.state = SessionState::Running;
        info!(?source, target = %self.config.target.name, "Compass session started");

        if orientation_refused {
            warn!("Orientation sensor refused; using course over ground");
            self.emit_event(SessionEvent::OrientationUnavailable);
        }
        self.emit_event(SessionEvent::Started {
            heading_source: source,
        });
        Ok(())
    }

    /// Unsubscribe from all sensors and halt the frame loop
    pub fn stop(&mut self) {
        if self.state != SessionState::Running {
            return;
        }
        if let Some(location) = self.location.as_mut() {
            location.stop();
        }
        if let Some(orientation) = self.orientation.as_mut() {
            orientation.stop();
        }
        self.smoother.stop();
        self.state = SessionState::Stopped;
        info!("Compass session stopped");
        self.emit_event(SessionEvent::Stopped);
    }

    /// Process a new location fix
    pub fn handle_fix(&mut self, fix: Fix) -> Option<&NavigationUpdate> {
        if self.state != SessionState::Running {
            return None;
        }
        let fix = match sanitize_fix(fix) {
            Ok((fix, dropped)) => {
                if !dropped.is_empty() {
                    warn!(?dropped, "Clearing invalid fix fields");
                    self.emit_event(SessionEvent::FixFieldsDropped { errors: dropped });
                }
                fix
            }
            Err(error) => {
                warn!(%error, "Dropping fix with invalid position");
                self.emit_event(SessionEvent::FixRejected { error });
                return None;
            }
        };

        let target = &self.config.target;
        let result = bearing_result(fix.point, target.point);
        if !is_bearing_defined(fix.point, target.point) {
            debug!("Bearing to target undefined at this position");
        }

        self.smoother.set_target_bearing(result.bearing_degrees);
        if let Some(course) = fix.device_heading {
            self.smoother.ingest_course(course);
        }

        let report = TargetReport::new(
            target,
            &result,
            format_distance_localized(result.distance_km, self.config.locale),
            result.cardinal.label(self.config.locale),
        );
        debug!(
            distance_km = result.distance_km,
            bearing = result.bearing_degrees,
            "Navigation updated"
        );

        let update = NavigationUpdate {
            position: fix,
            result,
            target: report,
        };
        for callback in self.navigation_callbacks.iter_mut() {
            callback(&update);
        }
        self.last_navigation = Some(update);
        self.last_navigation.as_ref()
    }

    /// Process an error the location provider reported in place of a fix
    pub fn handle_location_error(&mut self, error: LocationError) {
        let message = error.user_message(self.config.locale).to_string();
        warn!(%error, recoverable = error.is_recoverable(), "Location provider error");
        self.emit_event(SessionEvent::LocationFailed { error, message });
    }

    /// Process a raw orientation event
    pub fn handle_orientation(&mut self, sample: &OrientationSample) {
        if self.state != SessionState::Running
            || self.heading_source != Some(HeadingSource::OrientationSensor)
        {
            return;
        }
        let was_calibrated = self.smoother.state().is_calibrated;
        if let Some(HeadingReading::Absolute(heading)) = self.smoother.ingest_orientation(sample) {
            if !was_calibrated {
                self.emit_event(SessionEvent::Calibrated { heading });
            }
        }
    }

    /// Advance the smoother one frame and notify heading callbacks
    pub fn tick(&mut self, now_ms: u64) -> Option<HeadingFrame> {
        if self.state != SessionState::Running {
            return None;
        }
        self.last_frame_ms = now_ms;
        let outcome = self.smoother.tick(now_ms);

        if outcome.alignment_changed {
            self.emit_event(SessionEvent::AlignmentChanged {
                aligned: outcome.state.is_aligned,
                heading: outcome.state.smoothed_heading,
            });
        }

        if let Some(pulse) = outcome.haptic {
            let delivered = match self.haptics.as_mut() {
                Some(actuator) if self.config.haptics_enabled => actuator.vibrate(&pulse),
                _ => false,
            };
            self.emit_event(SessionEvent::HapticTriggered { pulse, delivered });
        }

        let frame = HeadingFrame {
            state: outcome.state,
            arrow_rotation: self.smoother.arrow_rotation(),
            timestamp_ms: now_ms,
        };
        for callback in self.heading_callbacks.iter_mut() {
            callback(&frame);
        }
        Some(frame)
    }

    /// Drain pending sensor input, then advance one frame
    pub fn poll(&mut self, now_ms: u64) -> Option<HeadingFrame> {
        if self.state != SessionState::Running {
            return None;
        }

        let mut samples = Vec::new();
        if let Some(orientation) = self.orientation.as_mut() {
            while let Some(sample) = orientation.poll() {
                samples.push(sample);
            }
        }
        for sample in &samples {
            self.handle_orientation(sample);
        }

        loop {
            let next = match self.location.as_mut() {
                Some(location) => location.poll(),
                None => Ok(None),
            };
            match next {
                Ok(Some(fix)) => {
                    self.handle_fix(fix);
                }
                Ok(None) => break,
                Err(error) => self.handle_location_error(error),
            }
        }

        self.tick(now_ms)
    }

    /// Timestamp of the most recent frame
    pub fn last_frame_ms(&self) -> u64 {
        self.last_frame_ms
    }

    fn emit_event(&mut self, event: SessionEvent) {
        for callback in self.event_callbacks.iter_mut() {
            callback(&event);
        }
    }
}
