//! Camera Provider Interface
//!
//! Abstracts the host's video input devices:
//! - Device enumeration with label fallback
//! - Stream start/stop lifecycle
//! - Frame access for the detection loop
//!
//! Real capture backends live in the host application; this crate defines
//! the contract plus a synthetic provider for development and tests.

pub mod frame;
pub mod provider;
pub mod synthetic;

pub use frame::VideoFrame;
pub use provider::{CameraProvider, FrameSource, VideoDevice};
pub use synthetic::{SyntheticCamera, SyntheticStream};

use thiserror::Error;

/// Camera error types
#[derive(Error, Debug)]
pub enum CameraError {
    #[error("Camera permission denied: {0}")]
    PermissionDenied(String),

    #[error("No camera device found: {0}")]
    NotFound(String),

    #[error("Camera device busy: {0}")]
    DeviceBusy(String),

    #[error("Device enumeration failed: {0}")]
    Enumeration(String),

    #[error("Streaming error: {0}")]
    Stream(String),
}
