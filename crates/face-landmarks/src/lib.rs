//! Facial Landmark Model
//!
//! Data model and contract for the external landmark detector:
//! - `Keypoint` / `Face` as produced by a face-mesh model
//! - The fixed anatomical index table behind named constants
//! - The `LandmarkDetector` trait the frame loop consumes
//!
//! Detection itself is an external capability; this crate ships a synthetic
//! detector for development and tests, the way a capture backend falls back
//! to a mock when no real device is configured.

pub mod detector;
pub mod mesh;

pub use detector::{LandmarkDetector, SyntheticDetector};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Detection error types
#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("Model loading failed: {0}")]
    ModelLoad(String),

    #[error("Inference failed: {0}")]
    Inference(String),
}

/// A single labeled landmark point.
///
/// Coordinate convention follows the detector: x right, y down, z away from
/// the camera. `z` is absent for detectors that only produce 2D meshes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Keypoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: None,
            name: None,
        }
    }

    pub fn with_z(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            name: None,
        }
    }
}

/// One detected face: keypoints ordered by the fixed mesh numbering
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Face {
    pub keypoints: Vec<Keypoint>,
}

impl Face {
    /// Keypoint at a fixed mesh index, if the mesh is large enough
    pub fn keypoint(&self, index: usize) -> Option<&Keypoint> {
        self.keypoints.get(index)
    }

    /// Whether all indices needed for signal derivation are present
    pub fn has_required_landmarks(&self) -> bool {
        mesh::REQUIRED_INDICES
            .iter()
            .all(|&i| i < self.keypoints.len())
    }
}
