//! Thermal vision: luminance through a jet color map.

use std::sync::OnceLock;

use super::grayscale::to_grayscale_into;
use crate::camera::Frame;

/// Map a luminance value to its jet palette color (RGB).
///
/// Dark values run through blue and cyan, mid-tones through green and
/// yellow, bright values into red.
pub fn jet_color(value: u8) -> [u8; 3] {
    palette()[value as usize]
}

/// The 256-entry jet palette, built on first use.
pub fn palette() -> &'static [[u8; 3]; 256] {
    static PALETTE: OnceLock<[[u8; 3]; 256]> = OnceLock::new();
    PALETTE.get_or_init(|| {
        let mut table = [[0u8; 3]; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            let t = i as f32 / 255.0;
            let ramp = |center: f32| ((1.5 - (4.0 * t - center).abs()).clamp(0.0, 1.0) * 255.0).round() as u8;
            *entry = [ramp(3.0), ramp(2.0), ramp(1.0)];
        }
        table
    })
}

/// Grayscale a frame and color it with the jet palette. The output is RGB.
pub fn apply_thermal(frame: &Frame) -> Frame {
    let mut gray = Vec::new();
    to_grayscale_into(frame, &mut gray);

    let lut = palette();
    let mut data = Vec::with_capacity(gray.len() * 3);
    for v in gray {
        data.extend_from_slice(&lut[v as usize]);
    }

    Frame::from_rgb(data, frame.width, frame.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::FrameFormat;

    #[test]
    fn test_palette_endpoints() {
        // Jet starts in dark blue and ends in dark red.
        assert_eq!(jet_color(0), [0, 0, 128]);
        assert_eq!(jet_color(255), [128, 0, 0]);
    }

    #[test]
    fn test_palette_midpoint_is_greenish() {
        let [r, g, b] = jet_color(128);
        assert_eq!(g, 255);
        assert!(r > 100 && b > 100);
    }

    #[test]
    fn test_palette_is_cached() {
        assert!(std::ptr::eq(palette(), palette()));
    }

    #[test]
    fn test_apply_thermal_outputs_rgb() {
        let frame = Frame::from_rgb(vec![0, 0, 0, 255, 255, 255], 2, 1);
        let out = apply_thermal(&frame);
        assert_eq!(out.format, FrameFormat::Rgb);
        assert_eq!(out.data, vec![0, 0, 128, 128, 0, 0]);
    }

    #[test]
    fn test_apply_thermal_accepts_gray() {
        let frame = Frame::from_gray(vec![0, 255], 2, 1);
        let out = apply_thermal(&frame);
        assert_eq!(out.data.len(), 6);
    }
}
