//! Synthetic camera provider
//!
//! Stands in for a real capture backend when none is configured, mirroring
//! how detection falls back to a mock model. Produces blank frames at a
//! fixed size with an incrementing sequence number.

use tracing::info;

use crate::frame::VideoFrame;
use crate::provider::{CameraProvider, FrameSource, VideoDevice};
use crate::CameraError;

/// Stream of blank frames from the synthetic camera
pub struct SyntheticStream {
    width: u32,
    height: u32,
    sequence: u32,
}

impl FrameSource for SyntheticStream {
    fn latest_frame(&mut self) -> Option<VideoFrame> {
        self.sequence = self.sequence.wrapping_add(1);
        Some(VideoFrame::blank(self.width, self.height, self.sequence))
    }
}

/// Synthetic camera exposing a single fake device
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    streaming: bool,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            streaming: false,
        }
    }

    /// Whether a stream is currently active
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }
}

impl Default for SyntheticCamera {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

impl CameraProvider for SyntheticCamera {
    type Stream = SyntheticStream;

    fn list_devices(&self) -> Result<Vec<VideoDevice>, CameraError> {
        Ok(vec![VideoDevice {
            id: "synthetic-0".to_string(),
            label: "Synthetic Camera".to_string(),
        }])
    }

    fn start_stream(&mut self, device_id: Option<&str>) -> Result<Self::Stream, CameraError> {
        if self.streaming {
            return Err(CameraError::DeviceBusy("synthetic-0".to_string()));
        }
        if let Some(id) = device_id {
            if id != "synthetic-0" {
                return Err(CameraError::NotFound(id.to_string()));
            }
        }
        info!("Starting synthetic camera stream ({}x{})", self.width, self.height);
        self.streaming = true;
        Ok(SyntheticStream {
            width: self.width,
            height: self.height,
            sequence: 0,
        })
    }

    fn stop_stream(&mut self, _stream: Self::Stream) {
        info!("Stopping synthetic camera stream");
        self.streaming = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_start_without_stop_is_busy() {
        let mut cam = SyntheticCamera::default();
        let stream = cam.start_stream(None).unwrap();
        assert!(matches!(
            cam.start_stream(None),
            Err(CameraError::DeviceBusy(_))
        ));
        cam.stop_stream(stream);
        assert!(cam.start_stream(None).is_ok());
    }

    #[test]
    fn unknown_device_id_is_not_found() {
        let mut cam = SyntheticCamera::default();
        assert!(matches!(
            cam.start_stream(Some("does-not-exist")),
            Err(CameraError::NotFound(_))
        ));
    }

    #[test]
    fn stream_yields_frames_with_increasing_sequence() {
        let mut cam = SyntheticCamera::new(8, 8);
        let mut stream = cam.start_stream(Some("synthetic-0")).unwrap();
        let a = stream.latest_frame().unwrap();
        let b = stream.latest_frame().unwrap();
        assert!(b.sequence > a.sequence);
        assert_eq!(a.width, 8);
    }
}
