//! Output sinks
//!
//! The session forwards each frame's outcome to three host-provided sinks:
//! a renderer for the landmark overlay, a status sink for the text readout,
//! and a sound sink for alert beeps. All three are fire-and-forget from the
//! loop's point of view.

use alerting::{AlertKind, CounterSnapshot};
use head_signals::{HeadPose, TiltDirection};
use serde::Serialize;
use tracing::info;

/// Overlay styling constants for the host's canvas renderer
pub mod style {
    /// Dot color for the full landmark set
    pub const LANDMARK_COLOR: &str = "#FF0000";
    /// Color for the eye line and enlarged eye dots
    pub const ACCENT_COLOR: &str = "#00FF00";
    /// Overlay transparency while drawing
    pub const OVERLAY_OPACITY: f32 = 0.6;
    /// Radius of ordinary landmark dots, pixels
    pub const LANDMARK_RADIUS: f32 = 2.0;
    /// Radius of the highlighted eye dots, pixels
    pub const ACCENT_RADIUS: f32 = 4.0;
    /// Width of the eye line, pixels
    pub const LINE_WIDTH: f32 = 2.0;
}

/// Per-frame drawing instructions keyed to detected landmark positions
#[derive(Debug, Clone, Default, Serialize)]
pub struct OverlayFrame {
    /// All landmark positions (drawn as small dots)
    pub points: Vec<(f32, f32)>,
    /// Line between the eye corners, showing the tilt
    pub eye_line: Option<((f32, f32), (f32, f32))>,
    /// Eye corner positions (drawn enlarged)
    pub eye_points: Vec<(f32, f32)>,
}

/// Structured status readout for the host UI
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusUpdate {
    /// One-line summary, e.g. `Head Tilt: Tilted Left (-6.1°)`
    pub headline: String,
    /// Head pose of this frame, when usable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pose: Option<HeadPose>,
    /// Classified tilt direction, when tilt detection ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tilt: Option<TiltDirection>,
    /// Mouth-open ratio, when mouth detection ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mouth_ratio: Option<f32>,
    /// Debounce counters after this frame
    pub counters: CounterSnapshot,
    /// Tilt sustained past the alert threshold
    pub tilt_alert_active: bool,
    /// Mouth-open sustained past the alert threshold
    pub mouth_alert_active: bool,
}

impl StatusUpdate {
    /// Status for a frame with no detected face
    pub fn no_face() -> Self {
        Self {
            headline: "No face detected".to_string(),
            ..Default::default()
        }
    }

    /// Status carrying only a message (acquisition or model failures)
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            headline: text.into(),
            ..Default::default()
        }
    }

    /// Headline for a classified tilt
    pub fn tilt_headline(direction: TiltDirection, roll_degrees: f32) -> String {
        format!("Head Tilt: {} ({:.1}°)", direction.label(), roll_degrees)
    }
}

/// Accepts per-frame overlay drawings
pub trait RenderSink {
    fn draw(&mut self, overlay: &OverlayFrame);
    fn clear(&mut self);
}

/// Accepts status text updates
pub trait StatusSink {
    fn update(&mut self, status: &StatusUpdate);
}

/// Accepts alert sound events, fire-and-forget
pub trait SoundSink {
    fn play(&mut self, kind: AlertKind);
}

/// Render sink that discards overlays (headless operation)
#[derive(Debug, Default)]
pub struct NullRenderSink;

impl RenderSink for NullRenderSink {
    fn draw(&mut self, _overlay: &OverlayFrame) {}
    fn clear(&mut self) {}
}

/// Status sink that logs headline changes
#[derive(Debug, Default)]
pub struct LogStatusSink {
    last_headline: String,
}

impl StatusSink for LogStatusSink {
    fn update(&mut self, status: &StatusUpdate) {
        if status.headline != self.last_headline && !status.headline.is_empty() {
            info!("{}", status.headline);
            self.last_headline = status.headline.clone();
        }
    }
}

/// Sound sink that logs alert events instead of synthesizing audio
#[derive(Debug, Default)]
pub struct LogSoundSink;

impl SoundSink for LogSoundSink {
    fn play(&mut self, kind: AlertKind) {
        info!("Alert sound: {:?}", kind);
    }
}
