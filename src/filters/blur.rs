//! Separable Gaussian blur.

use super::sepia::saturate_u8;
use crate::camera::Frame;

/// Side length of the blur kernel.
pub const BLUR_KERNEL_SIZE: usize = 15;

/// Sigma derived from the kernel size, as used when no sigma is given:
/// `0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`.
pub fn sigma_for_kernel(ksize: usize) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1D Gaussian weights of length `ksize`.
pub fn gaussian_kernel(ksize: usize, sigma: f32) -> Vec<f32> {
    let center = (ksize as f32 - 1.0) / 2.0;
    let denom = 2.0 * sigma * sigma;
    let mut weights: Vec<f32> = (0..ksize)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / denom).exp()
        })
        .collect();

    let sum: f32 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    weights
}

/// Mirror an out-of-range index back into `0..len` without repeating the
/// edge sample (`gfedcb|abcdefgh|gfedcba`).
fn reflect_101(mut i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    loop {
        if i < 0 {
            i = -i;
        } else if i > last {
            i = 2 * last - i;
        } else {
            return i as usize;
        }
    }
}

/// Blur a frame with a 15×15 Gaussian kernel. Works on any channel count.
pub fn apply_blur(frame: &Frame) -> Frame {
    let kernel = gaussian_kernel(BLUR_KERNEL_SIZE, sigma_for_kernel(BLUR_KERNEL_SIZE));
    gaussian_blur(frame, &kernel)
}

/// Convolve a frame with `kernel` horizontally, then vertically.
pub fn gaussian_blur(frame: &Frame, kernel: &[f32]) -> Frame {
    let w = frame.width as usize;
    let h = frame.height as usize;
    let bpp = frame.bytes_per_pixel();
    if w == 0 || h == 0 || kernel.is_empty() {
        return frame.clone();
    }

    let radius = (kernel.len() / 2) as isize;

    let mut horizontal = vec![0f32; frame.data.len()];
    for y in 0..h {
        let row = y * w * bpp;
        for x in 0..w {
            for c in 0..bpp {
                let mut acc = 0.0;
                for (k, weight) in kernel.iter().enumerate() {
                    let sx = reflect_101(x as isize + k as isize - radius, w);
                    acc += weight * frame.data[row + sx * bpp + c] as f32;
                }
                horizontal[row + x * bpp + c] = acc;
            }
        }
    }

    let mut out = Frame::new(frame.width, frame.height, frame.format);
    for y in 0..h {
        for x in 0..w {
            for c in 0..bpp {
                let mut acc = 0.0;
                for (k, weight) in kernel.iter().enumerate() {
                    let sy = reflect_101(y as isize + k as isize - radius, h);
                    acc += weight * horizontal[(sy * w + x) * bpp + c];
                }
                out.data[(y * w + x) * bpp + c] = saturate_u8(acc);
            }
        }
    }

    out
}
