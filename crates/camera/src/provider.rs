//! Camera provider and stream traits

use serde::{Deserialize, Serialize};

use crate::frame::VideoFrame;
use crate::CameraError;

/// A video input device as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDevice {
    /// Host-assigned device identifier
    pub id: String,
    /// Human-readable label (may be empty before permissions are granted)
    pub label: String,
}

impl VideoDevice {
    /// Display label, falling back to "Camera N" for unlabeled devices.
    /// `position` is the device's 0-based index in the enumeration order.
    pub fn display_label(&self, position: usize) -> String {
        if self.label.is_empty() {
            format!("Camera {}", position + 1)
        } else {
            self.label.clone()
        }
    }
}

/// An active video stream handing out frames
pub trait FrameSource {
    /// Most recent frame from the stream, if one is available yet
    fn latest_frame(&mut self) -> Option<VideoFrame>;
}

/// Host-side camera capability
pub trait CameraProvider {
    type Stream: FrameSource;

    /// Enumerate available video input devices
    fn list_devices(&self) -> Result<Vec<VideoDevice>, CameraError>;

    /// Start a stream on the given device, or the default device when `None`
    fn start_stream(&mut self, device_id: Option<&str>) -> Result<Self::Stream, CameraError>;

    /// Release a stream and its underlying device
    fn stop_stream(&mut self, stream: Self::Stream);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlabeled_device_falls_back_to_positional_name() {
        let dev = VideoDevice {
            id: "cam0".into(),
            label: String::new(),
        };
        assert_eq!(dev.display_label(0), "Camera 1");
        assert_eq!(dev.display_label(2), "Camera 3");
    }

    #[test]
    fn labeled_device_keeps_its_label() {
        let dev = VideoDevice {
            id: "cam0".into(),
            label: "Integrated Webcam".into(),
        };
        assert_eq!(dev.display_label(0), "Integrated Webcam");
    }
}
