//! Landmark geometry extraction
//!
//! The pose angles are heuristic approximations from two landmark vectors,
//! not a calibrated 3D pose solve. They assume the detector's coordinate
//! convention (x right, y down, z away from camera) and a roughly frontal
//! face. Alerting correctness depends on reproducing these formulas as-is,
//! so they must not be "improved" to a PnP solve.

use face_landmarks::{mesh, Face, Keypoint};
use serde::{Deserialize, Serialize};

use crate::GeometryError;

/// Vector magnitude below which a landmark vector is considered degenerate
const DEGENERATE_EPSILON: f32 = 1e-6;

/// Mouth-open threshold on the lip-separation ratio
pub const MOUTH_OPEN_RATIO: f32 = 0.01;

/// Head orientation in degrees, approximated from landmark vectors
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadPose {
    /// Yaw (left-right rotation) in degrees
    pub yaw: f32,
    /// Pitch (up-down tilt) in degrees
    pub pitch: f32,
    /// Roll (side tilt) in degrees
    pub roll: f32,
}

/// Mouth openness for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouthState {
    /// Lip separation normalized by face height
    pub ratio: f32,
    /// `ratio > MOUTH_OPEN_RATIO`, strictly
    pub is_open: bool,
}

struct Vec3 {
    x: f32,
    y: f32,
    z: f32,
}

impl Vec3 {
    fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

fn landmark(face: &Face, index: usize) -> Result<&Keypoint, GeometryError> {
    face.keypoint(index)
        .ok_or(GeometryError::MissingLandmark(index))
}

fn vector_between(from: &Keypoint, to: &Keypoint, index: usize) -> Result<Vec3, GeometryError> {
    let from_z = from.z.ok_or(GeometryError::MissingDepth(index))?;
    let to_z = to.z.ok_or(GeometryError::MissingDepth(index))?;
    Ok(Vec3 {
        x: to.x - from.x,
        y: to.y - from.y,
        z: to_z - from_z,
    })
}

/// Approximate head pose from the eye and nose landmark vectors.
///
/// `yaw = atan2(eye.z, eye.x)`, `pitch = atan2(-nose.y, -nose.z)`,
/// `roll = atan2(eye.y, sqrt(eye.x^2 + eye.z^2))`, all in degrees.
/// Signs follow the source convention and may flip for non-frontal faces.
pub fn head_pose(face: &Face) -> Result<HeadPose, GeometryError> {
    let left_eye = landmark(face, mesh::LEFT_EYE_OUTER)?;
    let right_eye = landmark(face, mesh::RIGHT_EYE_OUTER)?;
    let nose_bridge = landmark(face, mesh::NOSE_BRIDGE)?;
    let nose_tip = landmark(face, mesh::NOSE_TIP)?;

    let eye = vector_between(left_eye, right_eye, mesh::RIGHT_EYE_OUTER)?;
    let nose = vector_between(nose_bridge, nose_tip, mesh::NOSE_TIP)?;

    if eye.magnitude() < DEGENERATE_EPSILON {
        return Err(GeometryError::DegenerateVector("eye"));
    }
    if nose.magnitude() < DEGENERATE_EPSILON {
        return Err(GeometryError::DegenerateVector("nose"));
    }

    Ok(HeadPose {
        yaw: eye.z.atan2(eye.x).to_degrees(),
        pitch: (-nose.y).atan2(-nose.z).to_degrees(),
        roll: eye.y.atan2((eye.x * eye.x + eye.z * eye.z).sqrt()).to_degrees(),
    })
}

/// Two-point roll proxy for meshes without trustworthy depth:
/// the angle of the eye line in the image plane, in degrees.
pub fn head_roll_2d(face: &Face) -> Result<f32, GeometryError> {
    let left_eye = landmark(face, mesh::LEFT_EYE_OUTER)?;
    let right_eye = landmark(face, mesh::RIGHT_EYE_OUTER)?;

    let dx = right_eye.x - left_eye.x;
    let dy = right_eye.y - left_eye.y;
    if (dx * dx + dy * dy).sqrt() < DEGENERATE_EPSILON {
        return Err(GeometryError::DegenerateVector("eye"));
    }

    Ok(dy.atan2(dx).to_degrees())
}

/// Mouth openness: lip separation over face height.
///
/// Face height is chin to nose bridge; a zero-height face (degenerate
/// bounding box) yields an error instead of an infinite ratio.
pub fn mouth_state(face: &Face) -> Result<MouthState, GeometryError> {
    let upper_lip = landmark(face, mesh::UPPER_LIP)?;
    let lower_lip = landmark(face, mesh::LOWER_LIP)?;
    let chin = landmark(face, mesh::CHIN)?;
    let nose_bridge = landmark(face, mesh::NOSE_BRIDGE)?;

    let lip_distance = (upper_lip.y - lower_lip.y).abs();
    let face_height = (chin.y - nose_bridge.y).abs();
    if face_height < DEGENERATE_EPSILON {
        return Err(GeometryError::ZeroFaceHeight);
    }

    let ratio = lip_distance / face_height;
    Ok(MouthState {
        ratio,
        is_open: ratio > MOUTH_OPEN_RATIO,
    })
}
