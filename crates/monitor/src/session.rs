//! Detection session
//!
//! State machine {Idle, Detecting} around a single-threaded cooperative
//! frame loop: one detection cycle per refresh tick, no overlapping
//! detector calls. Stopping is idempotent; a stop requested while a
//! detector call is in flight discards that call's result.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use alerting::{AlertTracker, FeatureToggles, FrameSignals};
use camera::{CameraError, CameraProvider, FrameSource};
use face_landmarks::{mesh, Face, LandmarkDetector};
use head_signals::{classify_tilt, head_pose, head_roll_2d, mouth_state};
use thiserror::Error;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::MonitorConfig;
use crate::sinks::{OverlayFrame, RenderSink, SoundSink, StatusSink, StatusUpdate};

/// Monitor error types
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Error accessing camera: {0}")]
    Camera(#[from] CameraError),

    #[error("Detection already running; stop the current session first")]
    AlreadyDetecting,

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Detecting,
}

/// Cloneable control surface for a running session.
///
/// The host UI uses this to stop detection and flip feature toggles at any
/// time; the loop reads the flags at the start of each cycle.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    detecting: Arc<AtomicBool>,
    tilt_enabled: Arc<AtomicBool>,
    mouth_enabled: Arc<AtomicBool>,
}

impl SessionHandle {
    fn new(tilt_enabled: bool, mouth_enabled: bool) -> Self {
        Self {
            detecting: Arc::new(AtomicBool::new(false)),
            tilt_enabled: Arc::new(AtomicBool::new(tilt_enabled)),
            mouth_enabled: Arc::new(AtomicBool::new(mouth_enabled)),
        }
    }

    /// Request the loop to stop; idempotent
    pub fn stop(&self) {
        self.detecting.store(false, Ordering::SeqCst);
    }

    pub fn is_detecting(&self) -> bool {
        self.detecting.load(Ordering::SeqCst)
    }

    pub fn set_tilt_enabled(&self, enabled: bool) {
        self.tilt_enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn set_mouth_enabled(&self, enabled: bool) {
        self.mouth_enabled.store(enabled, Ordering::SeqCst);
    }

    /// Toggle values for one classification step
    pub fn toggles(&self) -> FeatureToggles {
        FeatureToggles {
            tilt_enabled: self.tilt_enabled.load(Ordering::SeqCst),
            mouth_enabled: self.mouth_enabled.load(Ordering::SeqCst),
        }
    }
}

/// A detection session: camera stream, detector, debounce state, and sinks.
///
/// There is exactly one pipeline instance per active session; all mutation
/// happens from the single frame-processing cycle.
pub struct MonitorSession<C, D, R, S, A>
where
    C: CameraProvider,
    D: LandmarkDetector,
    R: RenderSink,
    S: StatusSink,
    A: SoundSink,
{
    camera: C,
    detector: D,
    render: R,
    status: S,
    sound: A,
    config: MonitorConfig,
    handle: SessionHandle,
    stream: Option<C::Stream>,
    tracker: AlertTracker,
}

impl<C, D, R, S, A> MonitorSession<C, D, R, S, A>
where
    C: CameraProvider,
    D: LandmarkDetector,
    R: RenderSink,
    S: StatusSink,
    A: SoundSink,
{
    pub fn new(
        camera: C,
        detector: D,
        render: R,
        status: S,
        sound: A,
        config: MonitorConfig,
    ) -> Self {
        let handle = SessionHandle::new(config.tilt_enabled, config.mouth_enabled);
        Self {
            camera,
            detector,
            render,
            status,
            sound,
            config,
            handle,
            stream: None,
            tracker: AlertTracker::new(),
        }
    }

    /// Control surface for the host UI
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    pub fn state(&self) -> SessionState {
        if self.handle.is_detecting() && self.stream.is_some() {
            SessionState::Detecting
        } else {
            SessionState::Idle
        }
    }

    /// Acquire the camera stream and enter Detecting.
    ///
    /// Acquisition failures are surfaced on the status sink and leave the
    /// session Idle. Starting while already detecting is an error.
    pub fn start(&mut self) -> Result<(), MonitorError> {
        if self.state() == SessionState::Detecting {
            return Err(MonitorError::AlreadyDetecting);
        }

        match self.camera.start_stream(self.config.device_id.as_deref()) {
            Ok(stream) => {
                self.stream = Some(stream);
                self.tracker.reset();
                self.handle.detecting.store(true, Ordering::SeqCst);
                info!("Detection started");
                Ok(())
            }
            Err(e) => {
                warn!("Camera acquisition failed: {}", e);
                self.status
                    .update(&StatusUpdate::message(format!("Error accessing camera: {e}")));
                Err(e.into())
            }
        }
    }

    /// Stop detection: release the stream, reset debounce state, clear the
    /// overlay and status text. Idempotent.
    pub fn stop(&mut self) {
        self.handle.stop();
        if let Some(stream) = self.stream.take() {
            self.camera.stop_stream(stream);
            info!("Detection stopped");
        }
        self.tracker.reset();
        self.render.clear();
        self.status.update(&StatusUpdate::default());
    }

    /// Drive detection cycles until stop is requested
    pub async fn run(&mut self) {
        let mut interval = tokio::time::interval(self.config.refresh_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("Frame loop running at {} Hz", self.config.refresh_rate_hz);

        while self.handle.is_detecting() {
            interval.tick().await;
            self.process_cycle().await;
        }
        info!("Frame loop exited");
    }

    /// Run one detection cycle. Returns false when the session is stopped
    /// (including a stop that landed while the detector call was in flight).
    pub async fn process_cycle(&mut self) -> bool {
        if !self.handle.is_detecting() {
            return false;
        }
        let Some(stream) = self.stream.as_mut() else {
            return false;
        };

        let toggles = self.handle.toggles();
        let Some(frame) = stream.latest_frame() else {
            // stream produced nothing yet; same effect as an empty detection
            self.apply_no_face(toggles);
            return true;
        };

        let result = self.detector.estimate_faces(&frame).await;
        if !self.handle.is_detecting() {
            // stopped mid-flight; discard the late result
            return false;
        }

        let faces = match result {
            Ok(faces) => faces,
            Err(e) => {
                warn!("Error in face detection: {}", e);
                let outcome = self.tracker.update(&FrameSignals::no_face(), toggles);
                self.render.clear();
                let mut status = StatusUpdate::message("Error in face detection");
                status.counters = outcome.counters;
                self.status.update(&status);
                return true;
            }
        };

        // multi-face input is accepted but only the first face is read
        match faces.first() {
            Some(face) => self.apply_face(face, toggles),
            None => self.apply_no_face(toggles),
        }
        true
    }

    fn apply_no_face(&mut self, toggles: FeatureToggles) {
        let outcome = self.tracker.update(&FrameSignals::no_face(), toggles);
        self.render.clear();
        let mut status = StatusUpdate::no_face();
        status.counters = outcome.counters;
        self.status.update(&status);
    }

    fn apply_face(&mut self, face: &Face, toggles: FeatureToggles) {
        let mut signals = FrameSignals {
            face_detected: true,
            tilt: None,
            mouth_open: None,
        };
        let mut status = StatusUpdate::default();

        if toggles.tilt_enabled {
            match head_pose(face) {
                Ok(pose) => {
                    let direction = classify_tilt(pose.roll);
                    signals.tilt = Some(direction);
                    status.headline = StatusUpdate::tilt_headline(direction, pose.roll);
                    status.pose = Some(pose);
                }
                // fall back to the image-plane eye line when depth is unusable
                Err(pose_err) => match head_roll_2d(face) {
                    Ok(roll) => {
                        let direction = classify_tilt(roll);
                        signals.tilt = Some(direction);
                        status.headline = StatusUpdate::tilt_headline(direction, roll);
                    }
                    Err(_) => {
                        debug!("No usable tilt signal this frame: {}", pose_err);
                    }
                },
            }
            status.tilt = signals.tilt;
        }

        if toggles.mouth_enabled {
            match mouth_state(face) {
                Ok(mouth) => {
                    signals.mouth_open = Some(mouth.is_open);
                    status.mouth_ratio = Some(mouth.ratio);
                }
                Err(e) => {
                    debug!("No usable mouth signal this frame: {}", e);
                }
            }
        }

        let outcome = self.tracker.update(&signals, toggles);
        for kind in &outcome.fired {
            self.sound.play(*kind);
        }

        self.render.draw(&overlay_for(face));

        status.counters = outcome.counters;
        status.tilt_alert_active = outcome.tilt_alert_active;
        status.mouth_alert_active = outcome.mouth_alert_active;
        self.status.update(&status);
    }
}

fn overlay_for(face: &Face) -> OverlayFrame {
    let points = face.keypoints.iter().map(|kp| (kp.x, kp.y)).collect();

    let left = face.keypoint(mesh::LEFT_EYE_OUTER);
    let right = face.keypoint(mesh::RIGHT_EYE_OUTER);
    let eye_line = match (left, right) {
        (Some(l), Some(r)) => Some(((l.x, l.y), (r.x, r.y))),
        _ => None,
    };
    let eye_points = [left, right]
        .into_iter()
        .flatten()
        .map(|kp| (kp.x, kp.y))
        .collect();

    OverlayFrame {
        points,
        eye_line,
        eye_points,
    }
}
