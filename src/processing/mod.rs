//! Sensor processing: orientation classification, heading smoothing and haptics

pub mod orientation;
pub mod smoother;
pub mod haptics;

pub use orientation::{
    HeadingReading, HeadingSource, OrientationCapability, OrientationSample, OrientationStream,
};
pub use smoother::{HeadingSmoother, TickOutcome};
pub use haptics::{HapticGate, HapticPulse};
