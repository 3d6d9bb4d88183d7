//! Camera capture handle.

#[cfg(feature = "camera")]
use nokhwa::pixel_format::RgbFormat;
#[cfg(feature = "camera")]
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat as NokhwaFrameFormat, RequestedFormat,
    RequestedFormatType,
};
#[cfg(feature = "camera")]
use nokhwa::Camera;

#[cfg(feature = "camera")]
use super::device::list_devices;
#[cfg(feature = "camera")]
use super::frame_utils::convert_to_rgb;
use super::frame_utils::mirror_horizontal;
use super::source::FrameSource;
use super::types::{CameraError, CameraSettings, Frame, Resolution};

/// Consecutive undecodable buffers tolerated before the stream counts as ended.
#[cfg(feature = "camera")]
const MAX_DECODE_FAILURES: u32 = 30;

/// Exclusive handle to a camera device.
///
/// The stream is opened in [`CameraCapture::open`] and stopped exactly once,
/// either by [`CameraCapture::release`] or when the handle is dropped.
pub struct CameraCapture {
    #[cfg(feature = "camera")]
    camera: Option<Camera>,
    /// Current settings
    settings: CameraSettings,
    /// Actual resolution reported by the device
    actual_resolution: Option<Resolution>,
    /// Actual FPS reported by the device
    actual_fps: Option<u32>,
    released: bool,
}

impl std::fmt::Debug for CameraCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraCapture")
            .field("settings", &self.settings)
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}

impl CameraCapture {
    /// Open a camera and start its stream.
    ///
    /// # Errors
    /// * `CameraError::DeviceNotFound` - If the device index doesn't exist
    /// * `CameraError::PermissionDenied` - If camera access is denied (macOS)
    /// * `CameraError::DeviceUnavailable` - If the camera fails to open or stream
    #[cfg(feature = "camera")]
    pub fn open(settings: CameraSettings) -> Result<Self, CameraError> {
        let devices = list_devices()?;
        if !devices.iter().any(|d| d.index == settings.device_index) {
            return Err(CameraError::DeviceNotFound(settings.device_index));
        }

        let index = CameraIndex::Index(settings.device_index);
        let mut camera = open_camera_with_fallback(&index, &settings)?;

        camera
            .open_stream()
            .map_err(|e| CameraError::DeviceUnavailable(e.to_string()))?;

        let res = camera.resolution();
        let actual_resolution = Resolution {
            width: res.width(),
            height: res.height(),
        };
        let actual_fps = camera.frame_rate();
        log::info!(
            "Camera {} streaming at {}x{} @ {} fps",
            settings.device_index,
            actual_resolution.width,
            actual_resolution.height,
            actual_fps
        );

        Ok(Self {
            camera: Some(camera),
            settings,
            actual_resolution: Some(actual_resolution),
            actual_fps: Some(actual_fps),
            released: false,
        })
    }

    /// Open a camera and start its stream.
    ///
    /// Without the `camera` feature no capture backend is compiled in, so
    /// every device is unavailable.
    #[cfg(not(feature = "camera"))]
    pub fn open(settings: CameraSettings) -> Result<Self, CameraError> {
        log::warn!(
            "Cannot open camera {}: capture support not compiled in",
            settings.device_index
        );
        Err(CameraError::DeviceUnavailable(
            "built without the `camera` feature".to_string(),
        ))
    }

    /// Get the actual resolution the camera is using.
    ///
    /// This may differ from the requested resolution if the camera
    /// doesn't support it exactly.
    pub fn actual_resolution(&self) -> Option<Resolution> {
        self.actual_resolution
    }

    /// Get the actual frame rate the camera is using.
    pub fn actual_fps(&self) -> Option<u32> {
        self.actual_fps
    }

    /// Whether the device has been released.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Stop the stream and give the device back. Later calls do nothing.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        #[cfg(feature = "camera")]
        {
            if let Some(mut camera) = self.camera.take() {
                if let Err(e) = camera.stop_stream() {
                    log::warn!("Failed to stop camera stream: {}", e);
                }
            }
        }

        log::info!("Released camera {}", self.settings.device_index);
    }

    #[cfg(feature = "camera")]
    fn capture_raw(&mut self) -> Result<Option<Frame>, CameraError> {
        let Some(camera) = self.camera.as_mut() else {
            return Ok(None);
        };

        let mut failures = 0;
        loop {
            let buffer = camera
                .frame()
                .map_err(|e| CameraError::DeviceUnavailable(e.to_string()))?;

            match convert_to_rgb(&buffer) {
                Some(frame) => return Ok(Some(frame)),
                None => {
                    failures += 1;
                    log::debug!("Skipping undecodable camera buffer ({})", failures);
                    if failures >= MAX_DECODE_FAILURES {
                        return Ok(None);
                    }
                }
            }
        }
    }

    #[cfg(not(feature = "camera"))]
    fn capture_raw(&mut self) -> Result<Option<Frame>, CameraError> {
        Ok(None)
    }
}

impl FrameSource for CameraCapture {
    fn read_frame(&mut self) -> Result<Option<Frame>, CameraError> {
        if self.released {
            return Ok(None);
        }

        let mut frame = match self.capture_raw()? {
            Some(frame) => frame,
            None => return Ok(None),
        };

        if self.settings.mirror {
            mirror_horizontal(&mut frame);
        }

        Ok(Some(frame))
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        self.release();
    }
}

/// Try to open a camera with multiple format fallback strategies.
#[cfg(feature = "camera")]
fn open_camera_with_fallback(
    index: &CameraIndex,
    settings: &CameraSettings,
) -> Result<Camera, CameraError> {
    // Closest MJPEG match first, then NV12, then whatever the camera offers.
    let format_attempts: Vec<RequestedFormat> = vec![
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            nokhwa::utils::Resolution::new(settings.resolution.width, settings.resolution.height),
            NokhwaFrameFormat::MJPEG,
            settings.fps,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            nokhwa::utils::Resolution::new(settings.resolution.width, settings.resolution.height),
            NokhwaFrameFormat::NV12,
            settings.fps,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution),
    ];

    let mut last_error = None;

    for requested in format_attempts {
        match Camera::new(index.clone(), requested) {
            Ok(cam) => return Ok(cam),
            Err(e) => {
                log::debug!("Camera format attempt failed: {}", e);
                last_error = Some(e);
            }
        }
    }

    let msg = last_error
        .map(|e| e.to_string())
        .unwrap_or_else(|| "no usable camera format".to_string());
    let lower = msg.to_lowercase();
    if lower.contains("permission")
        || lower.contains("denied")
        || lower.contains("authorization")
    {
        Err(CameraError::PermissionDenied)
    } else {
        Err(CameraError::DeviceUnavailable(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "camera"))]
    #[test]
    fn test_open_without_backend_is_unavailable() {
        match CameraCapture::open(CameraSettings::default()) {
            Err(CameraError::DeviceUnavailable(msg)) => assert!(msg.contains("camera")),
            other => panic!("Expected DeviceUnavailable, got {:?}", other),
        }
    }

    #[cfg(not(feature = "camera"))]
    fn closed_capture(mirror: bool) -> CameraCapture {
        CameraCapture {
            settings: CameraSettings {
                mirror,
                ..CameraSettings::default()
            },
            actual_resolution: None,
            actual_fps: None,
            released: false,
        }
    }

    #[cfg(not(feature = "camera"))]
    #[test]
    fn test_release_is_idempotent() {
        let mut capture = closed_capture(false);
        assert!(!capture.is_released());

        capture.release();
        assert!(capture.is_released());
        capture.release();
        assert!(capture.is_released());

        assert!(matches!(capture.read_frame(), Ok(None)));
        drop(capture);
    }

    #[cfg(not(feature = "camera"))]
    #[test]
    fn test_drop_releases_unreleased_capture() {
        let capture = closed_capture(true);
        assert!(!capture.is_released());
        drop(capture);
    }

    #[cfg(feature = "camera")]
    #[test]
    fn test_camera_open_invalid_device() {
        let settings = CameraSettings {
            device_index: 999,
            ..CameraSettings::default()
        };
        match CameraCapture::open(settings) {
            Err(CameraError::DeviceNotFound(idx)) => assert_eq!(idx, 999),
            Err(CameraError::QueryFailed(_)) => {}
            other => panic!("Expected DeviceNotFound, got {:?}", other),
        }
    }
}
