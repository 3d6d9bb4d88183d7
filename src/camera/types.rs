//! Camera types and data structures.

use std::fmt;

/// Information about an available camera device.
#[derive(Debug, Clone)]
pub struct CameraInfo {
    /// Device index for selection
    pub index: u32,
    /// Human-readable device name
    pub name: String,
    /// Device description
    pub description: String,
}

impl fmt::Display for CameraInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.index, self.name, self.description)
    }
}

/// Camera resolution settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Low resolution (320x240)
    pub const LOW: Resolution = Resolution {
        width: 320,
        height: 240,
    };

    /// Medium resolution (640x480), what most webcams deliver by default
    pub const MEDIUM: Resolution = Resolution {
        width: 640,
        height: 480,
    };

    /// High resolution (1280x720)
    pub const HIGH: Resolution = Resolution {
        width: 1280,
        height: 720,
    };
}

impl Default for Resolution {
    fn default() -> Self {
        Self::MEDIUM
    }
}

/// Pixel layout of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    /// Interleaved R, G, B (3 bytes per pixel)
    Rgb,
    /// Single luminance channel (1 byte per pixel)
    Gray,
}

impl FrameFormat {
    /// Number of 8-bit samples per pixel.
    pub fn channels(self) -> usize {
        match self {
            FrameFormat::Rgb => 3,
            FrameFormat::Gray => 1,
        }
    }
}

/// A frame of 8-bit pixel samples in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Raw samples, `width * height * channels` bytes
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Pixel format
    pub format: FrameFormat,
}

impl Frame {
    /// A zero-filled (black) frame.
    pub fn new(width: u32, height: u32, format: FrameFormat) -> Self {
        let len = width as usize * height as usize * format.channels();
        Self {
            data: vec![0; len],
            width,
            height,
            format,
        }
    }

    /// Wrap an RGB buffer. `data` must hold `width * height * 3` bytes.
    pub fn from_rgb(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * 3);
        Self {
            data,
            width,
            height,
            format: FrameFormat::Rgb,
        }
    }

    /// Wrap a single-channel buffer. `data` must hold `width * height` bytes.
    pub fn from_gray(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            data,
            width,
            height,
            format: FrameFormat::Gray,
        }
    }

    /// Get the number of bytes per pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.channels()
    }

    /// Number of pixels in the frame.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Byte offset of pixel `(x, y)`.
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.bytes_per_pixel()
    }

    /// Samples of pixel `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let start = self.offset(x, y);
        &self.data[start..start + self.bytes_per_pixel()]
    }

    /// Mutable samples of pixel `(x, y)`.
    #[inline]
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let start = self.offset(x, y);
        let bpp = self.bytes_per_pixel();
        &mut self.data[start..start + bpp]
    }

    /// Whether two frames have the same dimensions and format.
    pub fn same_shape(&self, other: &Frame) -> bool {
        self.width == other.width && self.height == other.height && self.format == other.format
    }
}

/// Settings for camera capture.
#[derive(Debug, Clone)]
pub struct CameraSettings {
    /// Camera device index
    pub device_index: u32,
    /// Requested capture resolution
    pub resolution: Resolution,
    /// Target FPS (actual may vary)
    pub fps: u32,
    /// Mirror horizontally (selfie mode)
    pub mirror: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            device_index: 0,
            resolution: Resolution::default(),
            fps: 30,
            mirror: false,
        }
    }
}

/// Errors that can occur during camera operations.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    /// Failed to query camera devices
    #[error("Failed to query cameras: {0}")]
    QueryFailed(String),
    /// Camera device not found at specified index
    #[error("Camera device {0} not found. Run 'list-cameras' to see available devices")]
    DeviceNotFound(u32),
    /// Camera permission denied (macOS)
    #[error(
        "Camera permission denied. On macOS, grant access in System Settings > Privacy & Security > Camera"
    )]
    PermissionDenied,
    /// The device exists but could not be opened or started
    #[error("Camera unavailable: {0}")]
    DeviceUnavailable(String),
    /// A read produced no frame
    #[error("Camera stream ended")]
    StreamEnded,
}
