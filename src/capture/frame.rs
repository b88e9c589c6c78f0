//! Frame data structures for captured camera content

use std::time::Instant;

/// A decoded frame from the camera
#[derive(Debug)]
pub struct CameraFrame {
    /// Raw RGB pixel data
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Timestamp when the frame was received
    pub timestamp: Instant,
}

impl CameraFrame {
    /// Create a new camera frame
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            timestamp: Instant::now(),
        }
    }

    /// Get frame dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_dimensions() {
        let frame = CameraFrame::new(vec![0; 12], 2, 2);
        assert_eq!(frame.dimensions(), (2, 2));
        assert_eq!(frame.data.len(), 12);
    }
}
