//! Tilt classification
//!
//! Threshold-only mapping; debounce/hysteresis happens downstream.

use serde::{Deserialize, Serialize};

/// Roll magnitude beyond which the head counts as tilted, in degrees
pub const TILT_THRESHOLD_DEGREES: f32 = 5.0;

/// Discrete head tilt state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TiltDirection {
    #[default]
    Level,
    TiltedLeft,
    TiltedRight,
}

impl TiltDirection {
    /// Human-readable label matching the status display
    pub fn label(&self) -> &'static str {
        match self {
            TiltDirection::Level => "Level",
            TiltDirection::TiltedLeft => "Tilted Left",
            TiltDirection::TiltedRight => "Tilted Right",
        }
    }
}

/// Classify a roll angle into a tilt direction.
///
/// Strict thresholds: exactly ±5° is still Level.
pub fn classify_tilt(roll_degrees: f32) -> TiltDirection {
    if roll_degrees < -TILT_THRESHOLD_DEGREES {
        TiltDirection::TiltedLeft
    } else if roll_degrees > TILT_THRESHOLD_DEGREES {
        TiltDirection::TiltedRight
    } else {
        TiltDirection::Level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(classify_tilt(-5.0), TiltDirection::Level);
        assert_eq!(classify_tilt(5.0), TiltDirection::Level);
        assert_eq!(classify_tilt(-5.001), TiltDirection::TiltedLeft);
        assert_eq!(classify_tilt(5.001), TiltDirection::TiltedRight);
        assert_eq!(classify_tilt(0.0), TiltDirection::Level);
    }

    proptest! {
        #[test]
        fn classification_partitions_the_roll_axis(roll in -180.0f32..180.0) {
            let direction = classify_tilt(roll);
            match direction {
                TiltDirection::TiltedLeft => prop_assert!(roll < -TILT_THRESHOLD_DEGREES),
                TiltDirection::TiltedRight => prop_assert!(roll > TILT_THRESHOLD_DEGREES),
                TiltDirection::Level => prop_assert!(roll.abs() <= TILT_THRESHOLD_DEGREES),
            }
        }
    }
}
