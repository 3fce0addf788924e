//! Heading smoothing and alignment detection
//!
//! The smoother owns the single [`HeadingState`] record. Sensor callbacks
//! overwrite the raw heading; once per display frame [`HeadingSmoother::tick`]
//! moves the smoothed heading a fixed fraction of the shortest angular
//! distance towards it and re-evaluates alignment against the target bearing.
//!
//! Calibration is one-way: the first absolute reading switches the smoother
//! to calibrated and from then on relative readings and course over ground
//! are ignored.

use crate::algorithms::geodesy::{normalize_degrees, shortest_delta_degrees};
use crate::core::{HeadingState, ALIGNMENT_THRESHOLD_DEG, SMOOTHING_FACTOR};
use crate::processing::haptics::{HapticGate, HapticPulse};
use crate::processing::orientation::{HeadingReading, OrientationSample};
use tracing::{debug, info};

/// Result of one smoothing step
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// Copy of the state after the step
    pub state: HeadingState,
    /// Haptic pulse to play, if alignment was just reached outside the cooldown
    pub haptic: Option<HapticPulse>,
    /// `is_aligned` changed during this step
    pub alignment_changed: bool,
}

/// Low-pass heading filter with alignment edge detection
#[derive(Debug, Clone)]
pub struct HeadingSmoother {
    state: HeadingState,
    target_bearing: Option<f64>,
    smoothing_factor: f64,
    alignment_threshold_deg: f64,
    haptics: HapticGate,
    active: bool,
}

impl Default for HeadingSmoother {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadingSmoother {
    pub fn new() -> Self {
        Self::with_parameters(SMOOTHING_FACTOR, ALIGNMENT_THRESHOLD_DEG, HapticGate::default())
    }

    /// Create a smoother with custom filter gain, alignment band and haptic gate.
    ///
    /// `smoothing_factor` is expected in (0, 1]; 1 snaps straight to the raw heading.
    pub fn with_parameters(
        smoothing_factor: f64,
        alignment_threshold_deg: f64,
        haptics: HapticGate,
    ) -> Self {
        Self {
            state: HeadingState::default(),
            target_bearing: None,
            smoothing_factor,
            alignment_threshold_deg,
            haptics,
            active: true,
        }
    }

    /// Current state (copy)
    pub fn state(&self) -> HeadingState {
        self.state
    }

    pub fn target_bearing(&self) -> Option<f64> {
        self.target_bearing
    }

    pub fn set_target_bearing(&mut self, bearing: f64) {
        self.target_bearing = Some(normalize_degrees(bearing));
    }

    /// North-referenced heading; calibrates the compass
    pub fn ingest_absolute(&mut self, heading: f64) {
        if !self.state.is_calibrated {
            info!(heading, "Compass calibrated from absolute orientation");
        }
        self.state.raw_heading = Some(normalize_degrees(heading));
        self.state.is_calibrated = true;
    }

    /// Relative orientation estimate, used only until calibrated
    pub fn ingest_relative(&mut self, heading: f64) -> bool {
        self.ingest_fallback(heading)
    }

    /// Course over ground from the location provider, used only until calibrated
    pub fn ingest_course(&mut self, heading: f64) -> bool {
        self.ingest_fallback(heading)
    }

    fn ingest_fallback(&mut self, heading: f64) -> bool {
        if self.state.is_calibrated {
            return false;
        }
        self.state.raw_heading = Some(normalize_degrees(heading));
        true
    }

    /// Route a raw orientation event; returns the reading that was applied
    pub fn ingest_orientation(&mut self, sample: &OrientationSample) -> Option<HeadingReading> {
        let reading = sample.reading(self.state.is_calibrated)?;
        match reading {
            HeadingReading::Absolute(h) => self.ingest_absolute(h),
            HeadingReading::Relative(h) => {
                self.ingest_relative(h);
            }
        }
        Some(reading)
    }

    /// Rotation of the target pointer relative to the device, in [0, 360)
    pub fn arrow_rotation(&self) -> Option<f64> {
        self.target_bearing
            .map(|target| normalize_degrees(target - self.state.smoothed_heading))
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Halt ticking; the state is frozen until [`resume`](Self::resume)
    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn resume(&mut self) {
        self.active = true;
    }

    /// Advance the filter by one frame
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        if !self.active {
            return TickOutcome {
                state: self.state,
                haptic: None,
                alignment_changed: false,
            };
        }

        if let Some(raw) = self.state.raw_heading {
            let delta = shortest_delta_degrees(raw, self.state.smoothed_heading);
            self.state.smoothed_heading =
                normalize_degrees(self.state.smoothed_heading + delta * self.smoothing_factor);
        }

        let aligned = self.target_bearing.is_some_and(|target| {
            shortest_delta_degrees(target, self.state.smoothed_heading).abs()
                < self.alignment_threshold_deg
        });

        let was_aligned = self.state.is_aligned;
        let mut haptic = None;
        if aligned && !was_aligned {
            self.state.is_aligned = true;
            haptic = self.haptics.try_fire(now_ms);
            debug!(
                heading = self.state.smoothed_heading,
                pulse = haptic.is_some(),
                "Aligned with target"
            );
        } else if !aligned && was_aligned {
            self.state.is_aligned = false;
        }

        TickOutcome {
            state: self.state,
            haptic,
            alignment_changed: aligned != was_aligned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::orientation::OrientationStream;

    fn snapping() -> HeadingSmoother {
        HeadingSmoother::with_parameters(1.0, 5.0, HapticGate::default())
    }

    #[test]
    fn test_single_tick_moves_fifteen_percent() {
        let mut smoother = HeadingSmoother::new();
        smoother.ingest_absolute(90.0);
        let outcome = smoother.tick(0);
        assert!((outcome.state.smoothed_heading - 13.5).abs() < 1e-9);
    }

    #[test]
    fn test_converges_monotonically_without_overshoot() {
        let mut smoother = HeadingSmoother::new();
        smoother.ingest_absolute(90.0);

        let mut previous = smoother.state().smoothed_heading;
        for frame in 0..100 {
            let heading = smoother.tick(frame * 16).state.smoothed_heading;
            assert!(heading >= previous, "frame {}: {} < {}", frame, heading, previous);
            assert!(heading <= 90.0, "frame {}: overshoot {}", frame, heading);
            previous = heading;
        }
        assert!((90.0 - previous).abs() < 0.1);
    }

    #[test]
    fn test_takes_short_way_across_north() {
        let mut smoother = HeadingSmoother::new();
        smoother.ingest_absolute(350.0);
        let heading = smoother.tick(0).state.smoothed_heading;
        // 0 -> 350 is -10 degrees, so one step lands at 358.5
        assert!((heading - 358.5).abs() < 1e-9, "got {}", heading);
    }

    #[test]
    fn test_holds_heading_without_raw_input() {
        let mut smoother = HeadingSmoother::new();
        for frame in 0..10 {
            let outcome = smoother.tick(frame);
            assert_eq!(outcome.state.smoothed_heading, 0.0);
            assert_eq!(outcome.state.raw_heading, None);
            assert!(!outcome.state.is_calibrated);
        }
    }

    #[test]
    fn test_course_used_until_calibrated() {
        let mut smoother = HeadingSmoother::new();
        assert!(smoother.ingest_course(45.0));
        assert_eq!(smoother.state().raw_heading, Some(45.0));
        assert!(!smoother.state().is_calibrated);

        smoother.ingest_absolute(120.0);
        assert!(!smoother.ingest_course(10.0));
        assert!(!smoother.ingest_relative(10.0));
        assert_eq!(smoother.state().raw_heading, Some(120.0));
        assert!(smoother.state().is_calibrated);
    }

    #[test]
    fn test_orientation_samples_routed() {
        let mut smoother = HeadingSmoother::new();

        let applied = smoother.ingest_orientation(&OrientationSample::relative(90.0));
        assert_eq!(applied, Some(HeadingReading::Relative(270.0)));
        assert!(!smoother.state().is_calibrated);

        let applied = smoother.ingest_orientation(&OrientationSample::compass(OrientationStream::Absolute, 15.0));
        assert_eq!(applied, Some(HeadingReading::Absolute(15.0)));
        assert!(smoother.state().is_calibrated);

        assert_eq!(smoother.ingest_orientation(&OrientationSample::relative(0.0)), None);
        assert_eq!(smoother.state().raw_heading, Some(15.0));
    }

    #[test]
    fn test_not_aligned_without_target() {
        let mut smoother = snapping();
        smoother.ingest_absolute(0.0);
        assert!(!smoother.tick(0).state.is_aligned);
    }

    #[test]
    fn test_alignment_edge_flips_once() {
        let mut smoother = snapping();
        smoother.set_target_bearing(90.0);

        smoother.ingest_absolute(96.0);
        let outcome = smoother.tick(0);
        assert!(!outcome.state.is_aligned);
        assert!(outcome.haptic.is_none());

        smoother.ingest_absolute(94.0);
        let outcome = smoother.tick(16);
        assert!(outcome.state.is_aligned);
        assert!(outcome.alignment_changed);
        assert!(outcome.haptic.is_some());

        let outcome = smoother.tick(32);
        assert!(outcome.state.is_aligned);
        assert!(!outcome.alignment_changed);
        assert!(outcome.haptic.is_none());
    }

    #[test]
    fn test_haptic_rate_limited_under_oscillation() {
        let mut smoother = snapping();
        smoother.set_target_bearing(90.0);

        let mut pulses = 0;
        let mut rising_edges = 0;
        // swing in and out of the band every 100 ms for 2.9 s
        for step in 0..30u64 {
            let heading = if step % 2 == 0 { 96.0 } else { 94.0 };
            smoother.ingest_absolute(heading);
            let outcome = smoother.tick(step * 100);
            if outcome.alignment_changed && outcome.state.is_aligned {
                rising_edges += 1;
            }
            if outcome.haptic.is_some() {
                pulses += 1;
            }
        }
        assert_eq!(rising_edges, 15);
        assert_eq!(pulses, 1);

        // next crossing after the window fires again
        smoother.ingest_absolute(96.0);
        smoother.tick(3_200);
        smoother.ingest_absolute(94.0);
        assert!(smoother.tick(3_300).haptic.is_some());
    }

    #[test]
    fn test_alignment_wraps_around_north() {
        let mut smoother = snapping();
        smoother.set_target_bearing(358.0);
        smoother.ingest_absolute(2.0);
        assert!(smoother.tick(0).state.is_aligned);
    }

    #[test]
    fn test_stop_freezes_state() {
        let mut smoother = HeadingSmoother::new();
        smoother.ingest_absolute(90.0);
        smoother.tick(0);
        smoother.stop();

        let frozen = smoother.state();
        let outcome = smoother.tick(16);
        assert_eq!(outcome.state, frozen);
        assert!(!smoother.is_active());

        smoother.resume();
        assert!(smoother.tick(32).state.smoothed_heading > frozen.smoothed_heading);
    }

    #[test]
    fn test_arrow_rotation() {
        let mut smoother = snapping();
        assert_eq!(smoother.arrow_rotation(), None);
        smoother.set_target_bearing(30.0);
        smoother.ingest_absolute(60.0);
        smoother.tick(0);
        assert!((smoother.arrow_rotation().unwrap() - 330.0).abs() < 1e-9);
    }
}
