//! Camera Capture Layer
//!
//! Owns the webcam on a background thread and ships decoded RGB frames to the
//! UI over a bounded channel. The device is opened inside the thread; the
//! outcome of the open is reported back once so the UI can gate the
//! "recognizing" transition on a ready stream.

pub mod frame;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    ApiBackend, CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType,
    Resolution,
};
use nokhwa::Camera;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use thiserror::Error;
use tracing::{debug, info, warn};

use self::frame::CameraFrame;

/// Camera capture configuration
#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// Capture device index
    pub device_index: u32,
    /// Preferred capture width
    pub width: u32,
    /// Preferred capture height
    pub height: u32,
    /// Preferred frame rate
    pub frame_rate: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device_index: 0,
            width: 1280,
            height: 720,
            frame_rate: 30,
        }
    }
}

impl From<&crate::config::CameraSettings> for CameraConfig {
    fn from(settings: &crate::config::CameraSettings) -> Self {
        Self {
            device_index: settings.device_index,
            width: settings.width,
            height: settings.height,
            frame_rate: settings.frame_rate,
        }
    }
}

/// Errors from the camera subsystem
#[derive(Debug, Error)]
pub enum CameraError {
    #[error("failed to open camera {index}: {source}")]
    Open {
        index: u32,
        #[source]
        source: nokhwa::NokhwaError,
    },
    #[error("camera stream failed: {0}")]
    Stream(#[source] nokhwa::NokhwaError),
    #[error("failed to start camera thread: {0}")]
    Thread(#[from] std::io::Error),
}

/// List human-readable names of available capture devices
pub fn list_cameras() -> Vec<String> {
    match nokhwa::query(ApiBackend::Auto) {
        Ok(devices) => devices
            .iter()
            .map(|d| format!("[{}] {}", d.index(), d.human_name()))
            .collect(),
        Err(e) => {
            warn!("Failed to enumerate cameras: {}", e);
            Vec::new()
        }
    }
}

/// Camera capture manager
///
/// Spawning is cheap and never blocks the UI thread; the open handshake is
/// delivered asynchronously through `try_open_result`.
pub struct CameraCapture {
    frames: Receiver<CameraFrame>,
    open_result: Receiver<Result<(u32, u32), CameraError>>,
    stop_flag: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl CameraCapture {
    /// Start capturing on a background thread
    pub fn start(config: CameraConfig) -> Self {
        let (frame_tx, frame_rx) = bounded(2);
        let (open_tx, open_rx) = bounded(1);
        let stop_flag = Arc::new(AtomicBool::new(false));

        let thread_stop = stop_flag.clone();
        let open_tx_clone = open_tx.clone();
        let handle = match std::thread::Builder::new()
            .name("camera-capture".to_string())
            .spawn(move || capture_loop(config, frame_tx, open_tx_clone, thread_stop))
        {
            Ok(handle) => Some(handle),
            Err(e) => {
                // Spawn failure goes through the open handshake; the
                // bounded(1) channel is still empty at this point.
                warn!("Failed to spawn camera thread: {}", e);
                let _ = open_tx.try_send(Err(CameraError::Thread(e)));
                None
            }
        };

        Self {
            frames: frame_rx,
            open_result: open_rx,
            stop_flag,
            handle,
        }
    }

    /// Poll the outcome of the device open, if it has arrived yet
    ///
    /// Returns the actual stream resolution on success. Yields a value at
    /// most once.
    pub fn try_open_result(&self) -> Option<Result<(u32, u32), CameraError>> {
        self.open_result.try_recv().ok()
    }

    /// Get the most recent frame without blocking, draining older ones
    pub fn try_next_frame(&self) -> Option<CameraFrame> {
        let mut latest = None;
        while let Ok(frame) = self.frames.try_recv() {
            latest = Some(frame);
        }
        latest
    }

    /// Check if the capture thread is still running
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }

    /// Stop capturing and release the device
    ///
    /// Idempotent; joins the capture thread so the device is released by the
    /// time this returns.
    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Body of the capture thread: open the device, report the handshake, then
/// pump frames until the stop flag is raised.
fn capture_loop(
    config: CameraConfig,
    frames: Sender<CameraFrame>,
    open_result: Sender<Result<(u32, u32), CameraError>>,
    stop_flag: Arc<AtomicBool>,
) {
    let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
        CameraFormat::new(
            Resolution::new(config.width, config.height),
            FrameFormat::MJPEG,
            config.frame_rate,
        ),
    ));

    let mut camera = match Camera::new(CameraIndex::Index(config.device_index), requested) {
        Ok(camera) => camera,
        Err(e) => {
            let _ = open_result.send(Err(CameraError::Open {
                index: config.device_index,
                source: e,
            }));
            return;
        }
    };

    if let Err(e) = camera.open_stream() {
        let _ = open_result.send(Err(CameraError::Open {
            index: config.device_index,
            source: e,
        }));
        return;
    }

    let resolution = camera.resolution();
    info!(
        "Camera {} open at {}x{}",
        config.device_index,
        resolution.width(),
        resolution.height()
    );
    let _ = open_result.send(Ok((resolution.width(), resolution.height())));

    while !stop_flag.load(Ordering::Relaxed) {
        let buffer = match camera.frame() {
            Ok(buffer) => buffer,
            Err(e) => {
                warn!("Camera frame read failed, stopping capture: {}", e);
                break;
            }
        };

        let image = match buffer.decode_image::<RgbFormat>() {
            Ok(image) => image,
            Err(e) => {
                debug!("Dropping undecodable frame: {}", e);
                continue;
            }
        };

        let (width, height) = (image.width(), image.height());
        let frame = CameraFrame::new(image.into_raw(), width, height);
        match frames.try_send(frame) {
            Ok(()) => {}
            // UI is behind; drop the frame rather than block the device
            Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Disconnected(_)) => break,
        }
    }

    if let Err(e) = camera.stop_stream() {
        debug!("Error stopping camera stream: {}", e);
    }
    info!("Camera {} released", config.device_index);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_config_from_settings() {
        let settings = crate::config::CameraSettings::default();
        let config = CameraConfig::from(&settings);
        assert_eq!(config.device_index, 0);
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 720);
    }

    #[test]
    fn test_open_failure_is_reported_once() {
        // Device index far beyond anything plausible; the thread must report
        // the failure through the handshake and exit cleanly.
        let mut capture = CameraCapture::start(CameraConfig {
            device_index: u32::MAX,
            ..CameraConfig::default()
        });

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        let result = loop {
            if let Some(result) = capture.try_open_result() {
                break result;
            }
            assert!(std::time::Instant::now() < deadline, "open handshake never arrived");
            std::thread::sleep(std::time::Duration::from_millis(20));
        };
        assert!(result.is_err());

        // Handshake is consumed; nothing further is delivered.
        assert!(capture.try_open_result().is_none());
        capture.stop();
        assert!(!capture.is_running());
    }

    #[test]
    fn test_thread_error_surfaces_through_camera_error() {
        let err = CameraError::Thread(std::io::Error::new(
            std::io::ErrorKind::WouldBlock,
            "resource exhausted",
        ));
        assert!(err.to_string().contains("failed to start camera thread"));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut capture = CameraCapture::start(CameraConfig {
            device_index: u32::MAX,
            ..CameraConfig::default()
        });
        capture.stop();
        capture.stop();
        assert!(!capture.is_running());
        assert!(capture.try_next_frame().is_none());
    }
}
