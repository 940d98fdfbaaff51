//! Landmark detector contract and synthetic fallback

use camera::VideoFrame;
use tracing::info;

use crate::{mesh, DetectionError, Face, Keypoint};

/// External facial-landmark detection capability.
///
/// One call per detection cycle; the caller only reads the first face of a
/// multi-face result.
pub trait LandmarkDetector {
    /// Detect faces in the frame, ordered by detection confidence
    fn estimate_faces(
        &mut self,
        frame: &VideoFrame,
    ) -> impl std::future::Future<Output = Result<Vec<Face>, DetectionError>>;
}

/// Synthetic detector producing one frontal face per frame.
///
/// Used when no real model is configured. Head roll and lip separation are
/// settable so downstream behavior can be exercised end to end.
pub struct SyntheticDetector {
    roll_degrees: f32,
    mouth_ratio: f32,
}

impl SyntheticDetector {
    pub fn new() -> Self {
        Self {
            roll_degrees: 0.0,
            mouth_ratio: 0.0,
        }
    }

    /// Set the head roll of generated faces, in degrees
    pub fn set_roll_degrees(&mut self, degrees: f32) {
        self.roll_degrees = degrees;
    }

    /// Set the lip separation of generated faces, as a fraction of face height
    pub fn set_mouth_ratio(&mut self, ratio: f32) {
        self.mouth_ratio = ratio;
    }

    fn build_face(&self, frame: &VideoFrame) -> Face {
        let w = frame.width as f32;
        let h = frame.height as f32;
        let (cx, cy) = (w * 0.5, h * 0.45);

        let mut keypoints = vec![Keypoint::with_z(cx, cy, 0.0); mesh::MESH_SIZE];

        // Eyes on a line through the bridge, rotated by the requested roll
        let span = w * 0.15;
        let (sin, cos) = self.roll_degrees.to_radians().sin_cos();
        keypoints[mesh::LEFT_EYE_OUTER] = Keypoint::with_z(cx - span * cos, cy - span * sin, 0.0);
        keypoints[mesh::RIGHT_EYE_OUTER] = Keypoint::with_z(cx + span * cos, cy + span * sin, 0.0);

        keypoints[mesh::NOSE_BRIDGE] = Keypoint::with_z(cx, cy, 0.0);
        keypoints[mesh::NOSE_TIP] = Keypoint::with_z(cx, cy + h * 0.08, -w * 0.05);

        let face_height = h * 0.3;
        keypoints[mesh::CHIN] = Keypoint::with_z(cx, cy + face_height, 0.0);

        let mouth_y = cy + face_height * 0.7;
        let lip_gap = face_height * self.mouth_ratio;
        keypoints[mesh::UPPER_LIP] = Keypoint::with_z(cx, mouth_y - lip_gap * 0.5, 0.0);
        keypoints[mesh::LOWER_LIP] = Keypoint::with_z(cx, mouth_y + lip_gap * 0.5, 0.0);

        Face { keypoints }
    }
}

impl Default for SyntheticDetector {
    fn default() -> Self {
        info!("No landmark model configured, using synthetic detector");
        Self::new()
    }
}

impl LandmarkDetector for SyntheticDetector {
    async fn estimate_faces(&mut self, frame: &VideoFrame) -> Result<Vec<Face>, DetectionError> {
        Ok(vec![self.build_face(frame)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn synthetic_face_has_required_landmarks() {
        let mut detector = SyntheticDetector::new();
        let frame = VideoFrame::blank(640, 480, 0);
        let faces = detector.estimate_faces(&frame).await.unwrap();
        assert_eq!(faces.len(), 1);
        assert!(faces[0].has_required_landmarks());
    }

    #[tokio::test]
    async fn synthetic_roll_tilts_the_eye_line() {
        let mut detector = SyntheticDetector::new();
        detector.set_roll_degrees(10.0);
        let frame = VideoFrame::blank(640, 480, 0);
        let faces = detector.estimate_faces(&frame).await.unwrap();
        let left = faces[0].keypoint(mesh::LEFT_EYE_OUTER).unwrap();
        let right = faces[0].keypoint(mesh::RIGHT_EYE_OUTER).unwrap();
        let angle = (right.y - left.y).atan2(right.x - left.x).to_degrees();
        assert!((angle - 10.0).abs() < 1e-3);
    }
}
