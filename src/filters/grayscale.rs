//! RGB to grayscale conversion using ITU-R BT.601 luminance formula.

use crate::camera::{Frame, FrameFormat};

/// Luminance of one RGB pixel: `Y = 0.299*R + 0.587*G + 0.114*B`, rounded.
///
/// Integer math with the coefficients scaled by 1000 (299 + 587 + 114 = 1000),
/// so white stays exactly 255.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000) as u8
}

/// Convert a frame to a single-channel luminance frame.
///
/// Gray frames are returned unchanged.
pub fn to_grayscale(frame: &Frame) -> Frame {
    let mut gray = Vec::new();
    to_grayscale_into(frame, &mut gray);
    Frame::from_gray(gray, frame.width, frame.height)
}

/// Convert a frame to grayscale samples, reusing an existing buffer.
///
/// # Returns
/// The number of pixels written to the buffer
pub fn to_grayscale_into(frame: &Frame, buffer: &mut Vec<u8>) -> usize {
    let pixel_count = frame.pixel_count();
    buffer.clear();
    buffer.reserve(pixel_count);

    match frame.format {
        FrameFormat::Gray => buffer.extend_from_slice(&frame.data),
        FrameFormat::Rgb => {
            for rgb in frame.data.chunks_exact(3) {
                buffer.push(luminance(rgb[0], rgb[1], rgb[2]));
            }
        }
    }

    pixel_count
}
