//! Head Signal Derivation
//!
//! Pure per-frame mapping from facial landmarks to scalar signals and
//! discrete states:
//! - Head yaw/pitch/roll from the eye and nose landmark vectors
//! - Mouth-open ratio normalized by face height
//! - Tilt classification against fixed thresholds
//!
//! All functions are deterministic and side-effect free; smoothing and
//! debouncing live in the `alerting` crate.

pub mod classify;
pub mod geometry;

pub use classify::{classify_tilt, TiltDirection, TILT_THRESHOLD_DEGREES};
pub use geometry::{head_pose, head_roll_2d, mouth_state, HeadPose, MouthState};

use thiserror::Error;

/// Geometry errors: the frame carries no usable signal of the given kind.
///
/// These are per-frame outcomes, never fatal; the caller skips the affected
/// signal for the frame and continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Landmark index {0} missing from mesh")]
    MissingLandmark(usize),

    #[error("Landmark index {0} has no depth coordinate")]
    MissingDepth(usize),

    #[error("Degenerate {0} vector (near-zero magnitude)")]
    DegenerateVector(&'static str),

    #[error("Face height is zero")]
    ZeroFaceHeight,
}
