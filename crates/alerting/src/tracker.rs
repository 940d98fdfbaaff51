//! Debounce/alert tracker
//!
//! Per-signal consecutive-frame counters over the frame stream. A counter
//! increments only while its condition holds on every consecutive frame and
//! resets to zero the moment it does not, including no-face frames. An alert
//! fires once the run reaches the threshold and then again on every fifth
//! consecutive frame while it is sustained, so a held pose neither fires
//! each frame nor only once.

use head_signals::TiltDirection;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Consecutive frames a state must hold before it becomes alertable
pub const CONSECUTIVE_FRAME_THRESHOLD: u32 = 5;

/// A sustained state re-fires whenever its counter is divisible by this
pub const REFIRE_INTERVAL: u32 = 5;

/// Alert kinds, one per debounced signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    TiltLeft,
    TiltRight,
    MouthOpen,
}

/// Host-controlled feature toggles, read at the start of each update.
///
/// Each toggle gates its own signal's counting and alerting without
/// touching the other signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureToggles {
    pub tilt_enabled: bool,
    pub mouth_enabled: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            tilt_enabled: true,
            mouth_enabled: true,
        }
    }
}

/// Classified signals for one frame.
///
/// `None` means the signal was unusable this frame (degenerate geometry):
/// its counters reset but the other signal is unaffected.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameSignals {
    pub face_detected: bool,
    pub tilt: Option<TiltDirection>,
    pub mouth_open: Option<bool>,
}

impl FrameSignals {
    /// A frame in which no face was detected
    pub fn no_face() -> Self {
        Self::default()
    }
}

/// Counter values after an update, for status display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSnapshot {
    pub left_tilt: u32,
    pub right_tilt: u32,
    pub mouth_open: u32,
}

/// Result of feeding one frame through the tracker
#[derive(Debug, Clone, Default)]
pub struct FrameOutcome {
    /// Alerts that fired on this frame (sound-worthy, already toggle-gated)
    pub fired: Vec<AlertKind>,
    /// Tilt has been sustained past the threshold (persistent indicator)
    pub tilt_alert_active: bool,
    /// Mouth-open has been sustained past the threshold
    pub mouth_alert_active: bool,
    /// Counter values after this frame
    pub counters: CounterSnapshot,
}

/// Session-lifetime debounce state.
///
/// Owned by the session and mutated only from the single frame-processing
/// cycle; created on detection start, reset on stop.
#[derive(Debug, Default)]
pub struct AlertTracker {
    left_tilt: u32,
    right_tilt: u32,
    mouth_open: u32,
    last_direction: TiltDirection,
    last_mouth_open: bool,
}

impl AlertTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's classified signals through the tracker.
    pub fn update(&mut self, signals: &FrameSignals, toggles: FeatureToggles) -> FrameOutcome {
        if !signals.face_detected {
            self.reset();
            return FrameOutcome {
                counters: self.snapshot(),
                ..Default::default()
            };
        }

        if toggles.tilt_enabled {
            match signals.tilt {
                Some(TiltDirection::TiltedLeft) => {
                    self.left_tilt += 1;
                    self.right_tilt = 0;
                }
                Some(TiltDirection::TiltedRight) => {
                    self.right_tilt += 1;
                    self.left_tilt = 0;
                }
                Some(TiltDirection::Level) | None => {
                    self.left_tilt = 0;
                    self.right_tilt = 0;
                }
            }
            self.last_direction = signals.tilt.unwrap_or_default();
        } else {
            self.left_tilt = 0;
            self.right_tilt = 0;
            self.last_direction = TiltDirection::Level;
        }

        if toggles.mouth_enabled {
            match signals.mouth_open {
                Some(true) => self.mouth_open += 1,
                Some(false) | None => self.mouth_open = 0,
            }
            self.last_mouth_open = signals.mouth_open.unwrap_or(false);
        } else {
            self.mouth_open = 0;
            self.last_mouth_open = false;
        }

        let mut fired = Vec::new();
        if toggles.tilt_enabled {
            if Self::should_fire(self.left_tilt) {
                fired.push(AlertKind::TiltLeft);
            }
            if Self::should_fire(self.right_tilt) {
                fired.push(AlertKind::TiltRight);
            }
        }
        if toggles.mouth_enabled && Self::should_fire(self.mouth_open) {
            fired.push(AlertKind::MouthOpen);
        }
        if !fired.is_empty() {
            debug!("Alerts fired: {:?} at counters {:?}", fired, self.snapshot());
        }

        FrameOutcome {
            fired,
            tilt_alert_active: self.left_tilt >= CONSECUTIVE_FRAME_THRESHOLD
                || self.right_tilt >= CONSECUTIVE_FRAME_THRESHOLD,
            mouth_alert_active: self.mouth_open >= CONSECUTIVE_FRAME_THRESHOLD,
            counters: self.snapshot(),
        }
    }

    /// Reset all counters and last-observed state (stop, or no-face frame)
    pub fn reset(&mut self) {
        self.left_tilt = 0;
        self.right_tilt = 0;
        self.mouth_open = 0;
        self.last_direction = TiltDirection::Level;
        self.last_mouth_open = false;
    }

    /// Current counter values
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            left_tilt: self.left_tilt,
            right_tilt: self.right_tilt,
            mouth_open: self.mouth_open,
        }
    }

    /// Tilt direction observed on the most recent usable frame
    pub fn last_direction(&self) -> TiltDirection {
        self.last_direction
    }

    /// Mouth state observed on the most recent usable frame
    pub fn last_mouth_open(&self) -> bool {
        self.last_mouth_open
    }

    fn should_fire(counter: u32) -> bool {
        counter >= CONSECUTIVE_FRAME_THRESHOLD && counter % REFIRE_INTERVAL == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tilt_frame(direction: TiltDirection) -> FrameSignals {
        FrameSignals {
            face_detected: true,
            tilt: Some(direction),
            mouth_open: Some(false),
        }
    }

    fn mouth_frame(open: bool) -> FrameSignals {
        FrameSignals {
            face_detected: true,
            tilt: Some(TiltDirection::Level),
            mouth_open: Some(open),
        }
    }

    #[test]
    fn sustained_tilt_fires_on_fifth_and_tenth_frame() {
        let mut tracker = AlertTracker::new();
        let toggles = FeatureToggles::default();

        for frame in 1..=10u32 {
            let outcome = tracker.update(&tilt_frame(TiltDirection::TiltedLeft), toggles);
            assert_eq!(outcome.counters.left_tilt, frame);
            let expect_fire = frame == 5 || frame == 10;
            assert_eq!(
                outcome.fired.contains(&AlertKind::TiltLeft),
                expect_fire,
                "frame {frame}"
            );
            assert_eq!(outcome.tilt_alert_active, frame >= 5, "frame {frame}");
        }
    }

    #[test]
    fn level_frame_after_run_resets_and_stops_alerting() {
        let mut tracker = AlertTracker::new();
        let toggles = FeatureToggles::default();

        for _ in 0..5 {
            tracker.update(&tilt_frame(TiltDirection::TiltedLeft), toggles);
        }
        let outcome = tracker.update(&tilt_frame(TiltDirection::Level), toggles);
        assert_eq!(outcome.counters.left_tilt, 0);
        assert!(outcome.fired.is_empty());
        assert!(!outcome.tilt_alert_active);
    }

    #[test]
    fn direction_flip_resets_the_opposite_counter() {
        let mut tracker = AlertTracker::new();
        let toggles = FeatureToggles::default();

        for _ in 0..3 {
            tracker.update(&tilt_frame(TiltDirection::TiltedLeft), toggles);
        }
        let outcome = tracker.update(&tilt_frame(TiltDirection::TiltedRight), toggles);
        assert_eq!(outcome.counters.left_tilt, 0);
        assert_eq!(outcome.counters.right_tilt, 1);
    }

    #[test]
    fn sustained_mouth_fires_at_five_and_ten_only() {
        let mut tracker = AlertTracker::new();
        let toggles = FeatureToggles::default();
        let mut fired_at = Vec::new();

        for frame in 1..=12u32 {
            let outcome = tracker.update(&mouth_frame(true), toggles);
            if outcome.fired.contains(&AlertKind::MouthOpen) {
                fired_at.push(frame);
            }
        }
        assert_eq!(fired_at, vec![5, 10]);
    }

    #[test]
    fn no_face_frame_resets_every_counter() {
        let mut tracker = AlertTracker::new();
        let toggles = FeatureToggles::default();

        for _ in 0..7 {
            tracker.update(
                &FrameSignals {
                    face_detected: true,
                    tilt: Some(TiltDirection::TiltedRight),
                    mouth_open: Some(true),
                },
                toggles,
            );
        }
        let outcome = tracker.update(&FrameSignals::no_face(), toggles);
        assert_eq!(outcome.counters, CounterSnapshot::default());
        assert!(outcome.fired.is_empty());
        assert!(!outcome.tilt_alert_active);
        assert!(!outcome.mouth_alert_active);
    }

    #[test]
    fn disabling_tilt_mid_session_stops_tilt_but_not_mouth() {
        let mut tracker = AlertTracker::new();
        let both = FeatureToggles::default();
        let mouth_only = FeatureToggles {
            tilt_enabled: false,
            mouth_enabled: true,
        };
        let frame = FrameSignals {
            face_detected: true,
            tilt: Some(TiltDirection::TiltedLeft),
            mouth_open: Some(true),
        };

        for _ in 0..4 {
            tracker.update(&frame, both);
        }
        // toggle flips one frame before the tilt alert would have fired
        let outcome = tracker.update(&frame, mouth_only);
        assert_eq!(outcome.counters.left_tilt, 0);
        assert_eq!(outcome.counters.mouth_open, 5);
        assert_eq!(outcome.fired, vec![AlertKind::MouthOpen]);
    }

    #[test]
    fn unusable_tilt_resets_tilt_counters_but_leaves_mouth_running() {
        let mut tracker = AlertTracker::new();
        let toggles = FeatureToggles::default();

        for _ in 0..3 {
            tracker.update(
                &FrameSignals {
                    face_detected: true,
                    tilt: Some(TiltDirection::TiltedLeft),
                    mouth_open: Some(true),
                },
                toggles,
            );
        }
        let outcome = tracker.update(
            &FrameSignals {
                face_detected: true,
                tilt: None,
                mouth_open: Some(true),
            },
            toggles,
        );
        assert_eq!(outcome.counters.left_tilt, 0);
        assert_eq!(outcome.counters.mouth_open, 4);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut tracker = AlertTracker::new();
        tracker.update(&mouth_frame(true), FeatureToggles::default());
        tracker.reset();
        let after_one = tracker.snapshot();
        tracker.reset();
        assert_eq!(tracker.snapshot(), after_one);
        assert_eq!(after_one, CounterSnapshot::default());
    }

    proptest! {
        #[test]
        fn at_most_one_tilt_counter_is_nonzero(
            directions in prop::collection::vec(0u8..4, 0..200)
        ) {
            let mut tracker = AlertTracker::new();
            let toggles = FeatureToggles::default();
            for d in directions {
                let signals = match d {
                    0 => FrameSignals::no_face(),
                    1 => tilt_frame(TiltDirection::Level),
                    2 => tilt_frame(TiltDirection::TiltedLeft),
                    _ => tilt_frame(TiltDirection::TiltedRight),
                };
                let outcome = tracker.update(&signals, toggles);
                prop_assert!(
                    outcome.counters.left_tilt == 0 || outcome.counters.right_tilt == 0
                );
            }
        }

        #[test]
        fn alerts_only_fire_at_multiples_of_five(
            run_length in 1u32..40
        ) {
            let mut tracker = AlertTracker::new();
            let toggles = FeatureToggles::default();
            for frame in 1..=run_length {
                let outcome = tracker.update(&mouth_frame(true), toggles);
                let fired = outcome.fired.contains(&AlertKind::MouthOpen);
                prop_assert_eq!(fired, frame >= 5 && frame % 5 == 0);
            }
        }
    }
}
