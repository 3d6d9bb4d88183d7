//! Kaleidoscope: rotate the frame, then mirror its top-left quadrant into
//! the other three.

use super::sepia::saturate_u8;
use crate::camera::Frame;

/// Rotation applied before mirroring, in degrees (counter-clockwise).
pub const ROTATION_DEGREES: f32 = 45.0;

/// A 2×3 affine transform mapping source coordinates to destination
/// coordinates: `dst = [a b tx; c d ty] * [x y 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub m: [[f32; 3]; 2],
}

impl Affine {
    /// Rotation by `angle_deg` (counter-clockwise on screen) about `center`,
    /// with uniform `scale`.
    pub fn rotation(center: (f32, f32), angle_deg: f32, scale: f32) -> Self {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        let alpha = cos * scale;
        let beta = sin * scale;
        let (cx, cy) = center;
        Self {
            m: [
                [alpha, beta, (1.0 - alpha) * cx - beta * cy],
                [-beta, alpha, beta * cx + (1.0 - alpha) * cy],
            ],
        }
    }

    /// The inverse transform, or `None` when the matrix is singular.
    pub fn inverse(&self) -> Option<Self> {
        let [[a, b, tx], [c, d, ty]] = self.m;
        let det = a * d - b * c;
        if det.abs() < f32::EPSILON {
            return None;
        }
        let (ia, ib, ic, id) = (d / det, -b / det, -c / det, a / det);
        Some(Self {
            m: [
                [ia, ib, -(ia * tx + ib * ty)],
                [ic, id, -(ic * tx + id * ty)],
            ],
        })
    }

    /// Map a point.
    #[inline]
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        let [[a, b, tx], [c, d, ty]] = self.m;
        (a * x + b * y + tx, c * x + d * y + ty)
    }
}

/// Warp `frame` with `transform` into a frame of the same size.
///
/// Each destination pixel is sampled from the source bilinearly; samples
/// falling outside the source read as zero.
pub fn warp_affine(frame: &Frame, transform: &Affine) -> Frame {
    let mut out = Frame::new(frame.width, frame.height, frame.format);
    let Some(inverse) = transform.inverse() else {
        return out;
    };

    let w = frame.width as i64;
    let h = frame.height as i64;
    let bpp = frame.bytes_per_pixel();

    let sample = |x: i64, y: i64, c: usize| -> f32 {
        if x < 0 || y < 0 || x >= w || y >= h {
            0.0
        } else {
            frame.data[(y as usize * w as usize + x as usize) * bpp + c] as f32
        }
    };

    for y in 0..frame.height {
        for x in 0..frame.width {
            let (sx, sy) = inverse.apply(x as f32, y as f32);
            let x0 = sx.floor();
            let y0 = sy.floor();
            let fx = sx - x0;
            let fy = sy - y0;
            let (x0, y0) = (x0 as i64, y0 as i64);

            if x0 < -1 || y0 < -1 || x0 >= w || y0 >= h {
                continue;
            }

            let dst = out.offset(x, y);
            for c in 0..bpp {
                let top = sample(x0, y0, c) * (1.0 - fx) + sample(x0 + 1, y0, c) * fx;
                let bottom = sample(x0, y0 + 1, c) * (1.0 - fx) + sample(x0 + 1, y0 + 1, c) * fx;
                out.data[dst + c] = saturate_u8(top * (1.0 - fy) + bottom * fy);
            }
        }
    }

    out
}

/// Apply the kaleidoscope effect.
///
/// The frame is rotated 45° about its integer center. The rotated top-left
/// quadrant is written back to the top-left of the input, its vertical flip
/// to the bottom-left, its horizontal flip to the top-right and its
/// both-axis flip to the bottom-right. Quadrants are `height / 2` by
/// `width / 2`, so an odd dimension leaves the last row or column of the
/// input untouched.
pub fn apply_kaleidoscope(frame: &Frame) -> Frame {
    let half_w = frame.width / 2;
    let half_h = frame.height / 2;
    let center = (half_w as f32, half_h as f32);

    let rotated = warp_affine(frame, &Affine::rotation(center, ROTATION_DEGREES, 1.0));

    let mut out = frame.clone();
    for y in 0..half_h {
        let mirror_y = half_h + (half_h - 1 - y);
        for x in 0..half_w {
            let mirror_x = half_w + (half_w - 1 - x);
            let px = rotated.pixel(x, y);

            out.pixel_mut(x, y).copy_from_slice(px);
            out.pixel_mut(x, mirror_y).copy_from_slice(px);
            out.pixel_mut(mirror_x, y).copy_from_slice(px);
            out.pixel_mut(mirror_x, mirror_y).copy_from_slice(px);
        }
    }

    out
}
