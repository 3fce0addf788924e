//! End-to-end compass sessions driven by scripted sensors

use jerusalem_compass::api::{HeadingFrame, NavigationUpdate};
use jerusalem_compass::processing::{OrientationCapability, OrientationStream};
use jerusalem_compass::sensors::{MockLocationProvider, MockOrientationSensor, RecordingHaptics};
use jerusalem_compass::{
    initial_bearing_degrees, CompassConfig, CompassSession, Fix, GeoPoint, HeadingSource,
    LocationError, OrientationSample, SessionEvent, Target,
};
use std::cell::RefCell;
use std::rc::Rc;

const SAO_PAULO: GeoPoint = GeoPoint::new(-23.5505, -46.6333);
const FRAME_MS: u64 = 16;

fn record_events(session: &mut CompassSession) -> Rc<RefCell<Vec<SessionEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    session.on_event(Box::new(move |e: &SessionEvent| sink.borrow_mut().push(e.clone())));
    events
}

#[test]
fn test_turning_toward_target_aligns_and_pulses_once() {
    let bearing = initial_bearing_degrees(SAO_PAULO, Target::jerusalem().point);

    let mut location = MockLocationProvider::new();
    location.push_fix(Fix::new(SAO_PAULO, 0).with_accuracy(10.0));

    // turn 1 degree per frame from 40 degrees short of the bearing, then hold it
    let mut orientation = MockOrientationSensor::new(OrientationCapability::Absolute);
    orientation.push_sweep(bearing - 40.0, 1.0, 41);

    let haptics = RecordingHaptics::new();
    let pulses = haptics.log();

    let mut session = CompassSession::new(CompassConfig::default())
        .with_location_provider(Box::new(location))
        .with_orientation_provider(Box::new(orientation))
        .with_haptics(Box::new(haptics));

    let navigation = Rc::new(RefCell::new(Vec::new()));
    let nav_sink = Rc::clone(&navigation);
    session.on_navigation(Box::new(move |u: &NavigationUpdate| nav_sink.borrow_mut().push(u.clone())));
    let events = record_events(&mut session);

    session.start().unwrap();
    assert_eq!(session.heading_source(), Some(HeadingSource::OrientationSensor));

    let frames: Vec<HeadingFrame> = (0..120)
        .map(|i| session.poll(i * FRAME_MS).unwrap())
        .collect();

    // the raw heading climbs one sample per frame
    assert!((frames[10].state.raw_heading.unwrap() - (bearing - 30.0)).abs() < 1e-9);
    assert!((frames[40].state.raw_heading.unwrap() - bearing).abs() < 1e-9);

    // the filter lags the turn, so the band is entered just after the turn ends
    let first_aligned = frames.iter().position(|f| f.state.is_aligned).unwrap();
    assert!((40..=42).contains(&first_aligned), "aligned at frame {}", first_aligned);
    assert!(frames[first_aligned..].iter().all(|f| f.state.is_aligned));

    let last = frames.last().unwrap();
    assert_eq!(navigation.borrow().len(), 1);
    assert_eq!(navigation.borrow()[0].target.distance_formatted, "10.645 km");
    assert!(last.state.is_calibrated);
    assert!((last.state.smoothed_heading - bearing).abs() < 0.1);
    assert_eq!(pulses.borrow().len(), 1);
    assert_eq!(pulses.borrow()[0].pattern_ms, vec![80, 50, 80]);
    assert_eq!(pulses.borrow()[0].requested_at_ms, first_aligned as u64 * FRAME_MS);

    let calibrations = events
        .borrow()
        .iter()
        .filter(|e| matches!(e, SessionEvent::Calibrated { .. }))
        .count();
    assert_eq!(calibrations, 1);
}

#[test]
fn test_without_orientation_sensor_course_drives_heading() {
    let mut location = MockLocationProvider::new();
    location.push_fix(Fix::new(SAO_PAULO, 0).with_device_heading(58.0).with_speed(1.4));

    let mut session = CompassSession::new(CompassConfig::default())
        .with_location_provider(Box::new(location))
        .with_orientation_provider(Box::new(MockOrientationSensor::unavailable()));
    session.start().unwrap();
    assert_eq!(session.heading_source(), Some(HeadingSource::CourseOverGround));

    let mut last = None;
    for i in 0..100 {
        last = session.poll(i * FRAME_MS);
    }
    let state = last.unwrap().state;

    assert!(!state.is_calibrated);
    assert_eq!(state.raw_heading, Some(58.0));
    assert!((state.smoothed_heading - 58.0).abs() < 0.1);
    // bearing from Sao Paulo is about 57.8
    assert!(state.is_aligned);
}

#[test]
fn test_location_error_then_recovery() {
    let mut location = MockLocationProvider::new();
    location.push_error(LocationError::PositionUnavailable);
    location.push_fix(Fix::new(SAO_PAULO, 1_000));

    let mut session = CompassSession::new(CompassConfig::default())
        .with_location_provider(Box::new(location));
    let events = record_events(&mut session);
    session.start().unwrap();
    session.poll(0);

    let failures: Vec<String> = events
        .borrow()
        .iter()
        .filter_map(|e| match e {
            SessionEvent::LocationFailed { message, .. } => Some(message.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(failures, vec!["Localização indisponível. Verifique seu GPS.".to_string()]);
    assert!(session.last_navigation().is_some());
}

#[test]
fn test_relative_heading_until_absolute_arrives() {
    let mut orientation = MockOrientationSensor::new(OrientationCapability::RelativeOnly);
    orientation.push_sample(OrientationSample::relative(270.0));

    let mut session = CompassSession::new(CompassConfig::default().with_smoothing_factor(1.0))
        .with_location_provider(Box::new(MockLocationProvider::new()))
        .with_orientation_provider(Box::new(orientation));
    session.start().unwrap();

    let frame = session.poll(0).unwrap();
    assert!(!frame.state.is_calibrated);
    assert!((frame.state.smoothed_heading - 90.0).abs() < 1e-9);

    session.handle_orientation(&OrientationSample::compass(OrientationStream::Relative, 180.0));
    session.handle_orientation(&OrientationSample::relative(0.0));
    let frame = session.tick(FRAME_MS).unwrap();
    assert!(frame.state.is_calibrated);
    assert!((frame.state.smoothed_heading - 180.0).abs() < 1e-9);
}

#[test]
fn test_heading_callbacks_every_frame_until_stopped() {
    let mut session = CompassSession::new(CompassConfig::default())
        .with_location_provider(Box::new(MockLocationProvider::new()));
    let frames = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&frames);
    session.on_heading(Box::new(move |f: &HeadingFrame| sink.borrow_mut().push(f.timestamp_ms)));
    session.start().unwrap();

    for i in 0..5 {
        session.poll(i * FRAME_MS);
    }
    session.stop();
    session.poll(5 * FRAME_MS);

    assert_eq!(*frames.borrow(), vec![0, 16, 32, 48, 64]);
}

#[test]
fn test_slow_turn_settles_on_target() {
    let bearing = initial_bearing_degrees(SAO_PAULO, Target::jerusalem().point);

    let mut location = MockLocationProvider::new();
    location.push_fix(Fix::new(SAO_PAULO, 0));
    let mut orientation = MockOrientationSensor::new(OrientationCapability::Absolute);
    orientation.push_sweep(bearing - 60.0, 0.5, 120);
    orientation.push_sample(OrientationSample::absolute(360.0 - bearing));

    let mut session = CompassSession::new(CompassConfig::default())
        .with_location_provider(Box::new(location))
        .with_orientation_provider(Box::new(orientation));
    session.start().unwrap();

    let frames: Vec<HeadingFrame> = (0..240)
        .map(|i| session.poll(i * FRAME_MS).unwrap())
        .collect();

    // still turning at the midpoint of the sweep
    assert!(!frames[60].state.is_aligned);
    assert!((frames[60].state.raw_heading.unwrap() - (bearing - 30.0)).abs() < 1e-9);

    let last = frames.last().unwrap();
    assert!(last.state.is_aligned);
    assert!((last.state.smoothed_heading - bearing).abs() < 0.01);
    assert!(last.arrow_rotation.unwrap() < 0.01 || last.arrow_rotation.unwrap() > 359.99);
}
