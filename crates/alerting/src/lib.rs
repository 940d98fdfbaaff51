//! Alerting
//!
//! Smooths frame-to-frame classifier noise and rate-limits alerts: a state
//! must hold for a run of consecutive frames before it becomes alertable,
//! and a sustained state re-fires periodically instead of every frame.

mod tracker;

pub use tracker::{
    AlertKind, AlertTracker, CounterSnapshot, FeatureToggles, FrameOutcome, FrameSignals,
    CONSECUTIVE_FRAME_THRESHOLD, REFIRE_INTERVAL,
};
