//! Sepia tone as a fixed 3×3 channel remap.

use crate::camera::{Frame, FrameFormat};

/// Sepia coefficients in blue-green-red order.
///
/// Row `i` produces output channel `i` of a (B, G, R) pixel from the input
/// (B, G, R) samples. Frames here are RGB, so both the rows and the columns
/// are walked in reverse when the matrix is applied.
pub const SEPIA_BGR: [[f32; 3]; 3] = [
    [0.272, 0.534, 0.131],
    [0.349, 0.686, 0.168],
    [0.393, 0.769, 0.189],
];

/// Round and clamp to the 8-bit range.
#[inline]
pub fn saturate_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Apply the sepia matrix to one RGB pixel.
#[inline]
pub fn sepia_pixel(rgb: [u8; 3]) -> [u8; 3] {
    let bgr = [rgb[2] as f32, rgb[1] as f32, rgb[0] as f32];
    let channel = |row: &[f32; 3]| saturate_u8(row[0] * bgr[0] + row[1] * bgr[1] + row[2] * bgr[2]);

    let b = channel(&SEPIA_BGR[0]);
    let g = channel(&SEPIA_BGR[1]);
    let r = channel(&SEPIA_BGR[2]);
    [r, g, b]
}

/// Apply the sepia tone to a frame. The output is always RGB; a gray input
/// is treated as a neutral color pixel.
pub fn apply_sepia(frame: &Frame) -> Frame {
    let mut data = Vec::with_capacity(frame.pixel_count() * 3);

    match frame.format {
        FrameFormat::Rgb => {
            for rgb in frame.data.chunks_exact(3) {
                data.extend_from_slice(&sepia_pixel([rgb[0], rgb[1], rgb[2]]));
            }
        }
        FrameFormat::Gray => {
            for &v in &frame.data {
                data.extend_from_slice(&sepia_pixel([v, v, v]));
            }
        }
    }

    Frame::from_rgb(data, frame.width, frame.height)
}
