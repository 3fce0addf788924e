//! Scripted sensor implementations for testing and the demo binary

use crate::core::{Fix, GeoPoint};
use crate::processing::{HapticPulse, OrientationCapability, OrientationSample};
use crate::sensors::{
    HapticActuator, LocationError, LocationProvider, OrientationProvider, SensorResult,
    TrackingOptions,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Location provider that replays queued fixes and errors
#[derive(Debug, Default)]
pub struct MockLocationProvider {
    queue: VecDeque<SensorResult<Fix>>,
    tracking: bool,
    start_error: Option<LocationError>,
    options: Option<TrackingOptions>,
    polls: u32,
}

impl MockLocationProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that refuses to start, like a platform without geolocation
    pub fn unsupported() -> Self {
        Self {
            start_error: Some(LocationError::Unsupported),
            ..Self::default()
        }
    }

    /// Make the next `start` fail with `error`
    pub fn fail_start(&mut self, error: LocationError) {
        self.start_error = Some(error);
    }

    pub fn push_fix(&mut self, fix: Fix) {
        self.queue.push_back(Ok(fix));
    }

    pub fn push_error(&mut self, error: LocationError) {
        self.queue.push_back(Err(error));
    }

    /// Queue one fix per point, `interval_ms` apart starting at `start_ms`
    pub fn push_route(&mut self, points: &[GeoPoint], start_ms: u64, interval_ms: u64) {
        for (i, point) in points.iter().enumerate() {
            let fix = Fix::new(*point, start_ms + i as u64 * interval_ms).with_accuracy(5.0);
            self.push_fix(fix);
        }
    }

    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    /// Options passed to the last successful `start`
    pub fn options(&self) -> Option<&TrackingOptions> {
        self.options.as_ref()
    }

    pub fn poll_count(&self) -> u32 {
        self.polls
    }
}

impl LocationProvider for MockLocationProvider {
    fn start(&mut self, options: &TrackingOptions) -> SensorResult<()> {
        if let Some(error) = self.start_error.take() {
            return Err(error);
        }
        self.options = Some(options.clone());
        self.tracking = true;
        Ok(())
    }

    fn poll(&mut self) -> SensorResult<Option<Fix>> {
        if !self.tracking {
            return Ok(None);
        }
        self.polls += 1;
        self.queue.pop_front().transpose()
    }

    fn stop(&mut self) {
        self.tracking = false;
    }

    fn is_tracking(&self) -> bool {
        self.tracking
    }
}

/// Orientation sensor that replays queued samples.
///
/// Samples queued with [`push_sample`](Self::push_sample) are all pending at
/// once. [`end_frame`](Self::end_frame) closes a batch: `poll` returns `None`
/// at the boundary, so a session draining the sensor each frame picks up one
/// batch per frame.
#[derive(Debug)]
pub struct MockOrientationSensor {
    capability: OrientationCapability,
    queue: VecDeque<Option<OrientationSample>>,
    permission_granted: bool,
    subscribed: bool,
}

impl MockOrientationSensor {
    pub fn new(capability: OrientationCapability) -> Self {
        Self {
            capability,
            queue: VecDeque::new(),
            permission_granted: true,
            subscribed: false,
        }
    }

    /// Sensor on a device without orientation hardware
    pub fn unavailable() -> Self {
        Self::new(OrientationCapability::Unavailable)
    }

    pub fn deny_permission(&mut self) {
        self.permission_granted = false;
    }

    pub fn push_sample(&mut self, sample: OrientationSample) {
        self.queue.push_back(Some(sample));
    }

    /// Close the current batch; later samples arrive on a later frame
    pub fn end_frame(&mut self) {
        self.queue.push_back(None);
    }

    /// Queue absolute samples turning the device so its heading moves from
    /// `from_heading` by `step` degrees per frame
    pub fn push_sweep(&mut self, from_heading: f64, step: f64, count: usize) {
        for i in 0..count {
            let heading = from_heading + step * i as f64;
            self.push_sample(OrientationSample::absolute(360.0 - heading));
            self.end_frame();
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Samples not yet delivered, ignoring batch boundaries
    pub fn queued_count(&self) -> usize {
        self.queue.iter().flatten().count()
    }
}

impl OrientationProvider for MockOrientationSensor {
    fn capability(&self) -> OrientationCapability {
        self.capability
    }

    fn start(&mut self) -> bool {
        if self.capability == OrientationCapability::Unavailable || !self.permission_granted {
            return false;
        }
        self.subscribed = true;
        true
    }

    fn poll(&mut self) -> Option<OrientationSample> {
        if !self.subscribed {
            return None;
        }
        self.queue.pop_front().flatten()
    }

    fn stop(&mut self) {
        self.subscribed = false;
    }
}

/// Haptic actuator that records every pulse into a shared log
#[derive(Debug, Clone, Default)]
pub struct RecordingHaptics {
    pulses: Rc<RefCell<Vec<HapticPulse>>>,
}

impl RecordingHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the pulses recorded so far; stays valid after the actuator is moved
    pub fn log(&self) -> Rc<RefCell<Vec<HapticPulse>>> {
        Rc::clone(&self.pulses)
    }
}

impl HapticActuator for RecordingHaptics {
    fn vibrate(&mut self, pulse: &HapticPulse) -> bool {
        self.pulses.borrow_mut().push(pulse.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::OrientationStream;

    #[test]
    fn test_location_mock_replays_in_order() {
        let mut provider = MockLocationProvider::new();
        provider.push_fix(Fix::new(GeoPoint::new(1.0, 2.0), 10));
        provider.push_error(LocationError::PositionUnavailable);

        // nothing is delivered before tracking starts
        assert_eq!(provider.poll(), Ok(None));

        provider.start(&TrackingOptions::default()).unwrap();
        assert_eq!(provider.options().unwrap().timeout_ms, 15_000);
        assert_eq!(provider.poll().unwrap().unwrap().timestamp_millis, 10);
        assert_eq!(provider.poll(), Err(LocationError::PositionUnavailable));
        assert_eq!(provider.poll(), Ok(None));
        assert_eq!(provider.poll_count(), 3);
    }

    #[test]
    fn test_location_mock_start_failure() {
        let mut provider = MockLocationProvider::unsupported();
        assert_eq!(
            provider.start(&TrackingOptions::default()),
            Err(LocationError::Unsupported)
        );
        assert!(!provider.is_tracking());
    }

    #[test]
    fn test_route_timestamps() {
        let mut provider = MockLocationProvider::new();
        provider.push_route(&[GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.1)], 1_000, 500);
        provider.start(&TrackingOptions::default()).unwrap();
        provider.poll().unwrap();
        let second = provider.poll().unwrap().unwrap();
        assert_eq!(second.timestamp_millis, 1_500);
        assert_eq!(second.accuracy, Some(5.0));
    }

    #[test]
    fn test_orientation_mock_subscription() {
        let mut sensor = MockOrientationSensor::new(OrientationCapability::Absolute);
        sensor.push_sample(OrientationSample::compass(OrientationStream::Absolute, 10.0));
        assert_eq!(sensor.poll(), None);

        assert!(sensor.start());
        assert!(sensor.poll().is_some());
        sensor.stop();
        assert!(!sensor.is_subscribed());
    }

    #[test]
    fn test_orientation_mock_refusals() {
        assert!(!MockOrientationSensor::unavailable().start());

        let mut sensor = MockOrientationSensor::new(OrientationCapability::RelativeOnly);
        sensor.deny_permission();
        assert!(!sensor.start());
    }

    #[test]
    fn test_sweep_produces_absolute_headings() {
        let mut sensor = MockOrientationSensor::new(OrientationCapability::Absolute);
        sensor.push_sweep(10.0, 5.0, 3);
        assert_eq!(sensor.queued_count(), 3);
        sensor.start();
        let headings: Vec<f64> = (0..6)
            .filter_map(|_| sensor.poll())
            .filter_map(|s| s.reading(false))
            .map(|r| r.degrees())
            .collect();
        assert_eq!(headings.len(), 3);
        assert!((headings[2] - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_sweep_delivers_one_sample_per_frame() {
        let mut sensor = MockOrientationSensor::new(OrientationCapability::Absolute);
        sensor.push_sample(OrientationSample::relative(0.0));
        sensor.push_sample(OrientationSample::relative(10.0));
        sensor.end_frame();
        sensor.push_sweep(30.0, 1.0, 2);
        sensor.start();

        // drain the way a session does once per frame
        let mut per_frame = Vec::new();
        for _ in 0..4 {
            per_frame.push(std::iter::from_fn(|| sensor.poll()).count());
        }
        assert_eq!(per_frame, vec![2, 1, 1, 0]);
        assert_eq!(sensor.queued_count(), 0);
    }

    #[test]
    fn test_recording_haptics_shares_log() {
        let haptics = RecordingHaptics::new();
        let log = haptics.log();
        let mut actuator: Box<dyn HapticActuator> = Box::new(haptics);
        actuator.vibrate(&HapticPulse {
            pattern_ms: vec![80, 50, 80],
            requested_at_ms: 7,
        });
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(log.borrow()[0].requested_at_ms, 7);
    }
}
