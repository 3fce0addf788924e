//! Rate limiting for alignment haptic feedback

use crate::core::{HAPTIC_COOLDOWN_MS, HAPTIC_PATTERN_MS};
use serde::{Deserialize, Serialize};

/// Vibration request handed to the haptic actuator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HapticPulse {
    /// Alternating on/off durations in milliseconds, starting with "on"
    pub pattern_ms: Vec<u32>,
    /// Clock value at which the pulse was requested
    pub requested_at_ms: u64,
}

/// Lets at most one pulse through per cooldown window
#[derive(Debug, Clone)]
pub struct HapticGate {
    cooldown_ms: u64,
    pattern_ms: Vec<u32>,
    last_fired_ms: Option<u64>,
}

impl Default for HapticGate {
    fn default() -> Self {
        Self::new(HAPTIC_COOLDOWN_MS, HAPTIC_PATTERN_MS.to_vec())
    }
}

impl HapticGate {
    pub fn new(cooldown_ms: u64, pattern_ms: Vec<u32>) -> Self {
        Self {
            cooldown_ms,
            pattern_ms,
            last_fired_ms: None,
        }
    }

    /// Request a pulse at `now_ms`.
    ///
    /// The first request always fires; later ones need strictly more than the
    /// cooldown to have elapsed since the last pulse that fired.
    pub fn try_fire(&mut self, now_ms: u64) -> Option<HapticPulse> {
        if let Some(last) = self.last_fired_ms {
            if now_ms.saturating_sub(last) <= self.cooldown_ms {
                return None;
            }
        }
        self.last_fired_ms = Some(now_ms);
        Some(HapticPulse {
            pattern_ms: self.pattern_ms.clone(),
            requested_at_ms: now_ms,
        })
    }

    pub fn last_fired_ms(&self) -> Option<u64> {
        self.last_fired_ms
    }

    pub fn cooldown_ms(&self) -> u64 {
        self.cooldown_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_request_fires() {
        let mut gate = HapticGate::default();
        let pulse = gate.try_fire(10).unwrap();
        assert_eq!(pulse.pattern_ms, vec![80, 50, 80]);
        assert_eq!(pulse.requested_at_ms, 10);
    }

    #[test]
    fn test_requests_inside_cooldown_suppressed() {
        let mut gate = HapticGate::default();
        assert!(gate.try_fire(1_000).is_some());
        assert!(gate.try_fire(2_000).is_none());
        assert!(gate.try_fire(4_000).is_none());
        assert!(gate.try_fire(4_001).is_some());
        assert_eq!(gate.last_fired_ms(), Some(4_001));
    }

    #[test]
    fn test_suppressed_request_does_not_extend_window() {
        let mut gate = HapticGate::new(100, vec![20]);
        assert!(gate.try_fire(0).is_some());
        assert!(gate.try_fire(90).is_none());
        assert!(gate.try_fire(101).is_some());
    }
}
