//! Canny edge detection.
//!
//! The pipeline is the classic one:
//!
//! 1. 3×3 Sobel gradients with a replicated border
//! 2. L1 gradient magnitude `|gx| + |gy|`
//! 3. Non-maximum suppression along one of four quantized directions
//! 4. Double threshold with hysteresis over 8-connected neighbours
//!
//! No smoothing is applied before the gradients.

use super::grayscale::to_grayscale_into;
use crate::camera::Frame;

/// Gradient magnitude a pixel must exceed to be an edge candidate.
pub const LOW_THRESHOLD: i32 = 50;
/// Gradient magnitude a pixel must exceed to seed an edge.
pub const HIGH_THRESHOLD: i32 = 150;

/// `tan(22.5°)` in Q15 fixed point.
const TG22: i64 = 13573;
const TG_SHIFT: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeState {
    None,
    Weak,
    Strong,
}

/// Grayscale a frame and extract binary edges (0 or 255) with the default
/// thresholds. The output is single-channel.
pub fn detect_edges(frame: &Frame) -> Frame {
    let mut gray = Vec::new();
    to_grayscale_into(frame, &mut gray);
    let edges = canny(&gray, frame.width, frame.height, LOW_THRESHOLD, HIGH_THRESHOLD);
    Frame::from_gray(edges, frame.width, frame.height)
}

/// Sobel gradients `(gx, gy)` of a grayscale image, replicating border pixels.
///
/// The kernels used are:
/// ```text
/// Gx:          Gy:
/// [-1  0  1]   [-1 -2 -1]
/// [-2  0  2]   [ 0  0  0]
/// [-1  0  1]   [ 1  2  1]
/// ```
pub fn sobel(gray: &[u8], width: u32, height: u32) -> (Vec<i32>, Vec<i32>) {
    let w = width as usize;
    let h = height as usize;
    let mut gx = vec![0i32; w * h];
    let mut gy = vec![0i32; w * h];

    if w == 0 || h == 0 || gray.len() < w * h {
        return (gx, gy);
    }

    let px = |x: usize, y: usize| gray[y * w + x] as i32;

    for y in 0..h {
        let up = y.saturating_sub(1);
        let down = (y + 1).min(h - 1);
        for x in 0..w {
            let left = x.saturating_sub(1);
            let right = (x + 1).min(w - 1);

            let dx = (px(right, up) + 2 * px(right, y) + px(right, down))
                - (px(left, up) + 2 * px(left, y) + px(left, down));
            let dy = (px(left, down) + 2 * px(x, down) + px(right, down))
                - (px(left, up) + 2 * px(x, up) + px(right, up));

            gx[y * w + x] = dx;
            gy[y * w + x] = dy;
        }
    }

    (gx, gy)
}

/// Canny edge detection on a grayscale image.
///
/// # Arguments
/// * `gray` - Grayscale pixel data (one byte per pixel, row-major order)
/// * `width` - Width of the image in pixels
/// * `height` - Height of the image in pixels
/// * `low` - Hysteresis threshold for edge continuation
/// * `high` - Hysteresis threshold for edge seeds
///
/// # Returns
/// A binary edge map (0 or 255), same dimensions as input.
pub fn canny(gray: &[u8], width: u32, height: u32, low: i32, high: i32) -> Vec<u8> {
    let w = width as usize;
    let h = height as usize;
    if w == 0 || h == 0 || gray.len() < w * h {
        return vec![0; w * h];
    }

    let (gx, gy) = sobel(gray, width, height);
    let mag: Vec<i32> = gx.iter().zip(&gy).map(|(x, y)| x.abs() + y.abs()).collect();

    // Magnitude outside the image counts as zero.
    let mag_at = |x: isize, y: isize| -> i32 {
        if x < 0 || y < 0 || x as usize >= w || y as usize >= h {
            0
        } else {
            mag[y as usize * w + x as usize]
        }
    };

    let mut state = vec![EdgeState::None; w * h];
    let mut stack = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let i = y * w + x;
            let m = mag[i];
            if m <= low {
                continue;
            }

            let (xi, yi) = (x as isize, y as isize);
            let dx = gx[i] as i64;
            let dy = gy[i] as i64;
            let xs = dx.abs();
            let ys = dy.abs() << TG_SHIFT;
            let tg22x = xs * TG22;

            let is_max = if ys < tg22x {
                // Mostly horizontal gradient: compare left and right.
                m > mag_at(xi - 1, yi) && m >= mag_at(xi + 1, yi)
            } else {
                let tg67x = tg22x + (xs << (TG_SHIFT + 1));
                if ys > tg67x {
                    // Mostly vertical gradient: compare up and down.
                    m > mag_at(xi, yi - 1) && m >= mag_at(xi, yi + 1)
                } else {
                    let s = if (dx ^ dy) < 0 { -1 } else { 1 };
                    m > mag_at(xi - s, yi - 1) && m > mag_at(xi + s, yi + 1)
                }
            };

            if !is_max {
                continue;
            }

            if m > high {
                state[i] = EdgeState::Strong;
                stack.push(i);
            } else {
                state[i] = EdgeState::Weak;
            }
        }
    }

    // Hysteresis: grow strong edges through connected weak candidates.
    while let Some(i) = stack.pop() {
        let x = i % w;
        let y = i / w;
        for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                let j = ny * w + nx;
                if state[j] == EdgeState::Weak {
                    state[j] = EdgeState::Strong;
                    stack.push(j);
                }
            }
        }
    }

    state
        .into_iter()
        .map(|s| if s == EdgeState::Strong { 255 } else { 0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::FrameFormat;

    fn step_image(width: u32, height: u32, step_at: u32) -> Vec<u8> {
        let mut gray = Vec::with_capacity((width * height) as usize);
        for _ in 0..height {
            for x in 0..width {
                gray.push(if x < step_at { 0 } else { 255 });
            }
        }
        gray
    }

    #[test]
    fn test_sobel_flat_is_zero() {
        let (gx, gy) = sobel(&[100; 16], 4, 4);
        assert!(gx.iter().all(|&v| v == 0));
        assert!(gy.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_sobel_vertical_step() {
        let gray = step_image(6, 3, 3);
        let (gx, gy) = sobel(&gray, 6, 3);
        // Pixels either side of the step see the full 4 * 255 response.
        let row = 6;
        assert_eq!(gx[row + 2], 1020);
        assert_eq!(gx[row + 3], 1020);
        assert_eq!(gx[row], 0);
        assert!(gy.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_canny_flat_image_has_no_edges() {
        let edges = canny(&[128; 64], 8, 8, LOW_THRESHOLD, HIGH_THRESHOLD);
        assert!(edges.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_canny_vertical_step_single_column() {
        let gray = step_image(8, 8, 4);
        let edges = canny(&gray, 8, 8, LOW_THRESHOLD, HIGH_THRESHOLD);

        for y in 0..8 {
            for x in 0..8 {
                let expected = if x == 3 { 255 } else { 0 };
                assert_eq!(edges[y * 8 + x], expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_canny_weak_step_below_high_threshold() {
        // A step of 20 gives a magnitude of 80: above low, below high, no seed.
        let mut gray = vec![100u8; 64];
        for y in 0..8 {
            for x in 4..8 {
                gray[y * 8 + x] = 120;
            }
        }
        let edges = canny(&gray, 8, 8, LOW_THRESHOLD, HIGH_THRESHOLD);
        assert!(edges.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_canny_tiny_images() {
        assert!(canny(&[], 0, 0, LOW_THRESHOLD, HIGH_THRESHOLD).is_empty());
        assert_eq!(canny(&[255], 1, 1, LOW_THRESHOLD, HIGH_THRESHOLD), vec![0]);
    }

    #[test]
    fn test_detect_edges_output_is_binary_gray() {
        let mut data = Vec::new();
        for y in 0..10u32 {
            for x in 0..10u32 {
                let v = ((x * 37 + y * 91) % 256) as u8;
                data.extend_from_slice(&[v, v / 2, 255 - v]);
            }
        }
        let frame = Frame::from_rgb(data, 10, 10);
        let edges = detect_edges(&frame);
        assert_eq!(edges.format, FrameFormat::Gray);
        assert_eq!(edges.data.len(), 100);
        assert!(edges.data.iter().all(|&v| v == 0 || v == 255));
    }
}
