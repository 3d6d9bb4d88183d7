//! Frame conversion and transformation utilities.

use super::types::Frame;

/// Convert a nokhwa buffer to our RGB Frame format.
///
/// Handles various camera formats (MJPEG, YUYV, NV12, etc.) by using
/// nokhwa's built-in decode_image which automatically converts from
/// the camera's native format to RGB.
///
/// Returns `None` if the conversion fails (unsupported format or corrupt data).
#[cfg(feature = "camera")]
pub fn convert_to_rgb(buffer: &nokhwa::Buffer) -> Option<Frame> {
    use nokhwa::pixel_format::RgbFormat;

    let decoded = buffer.decode_image::<RgbFormat>().ok()?;
    let resolution = buffer.resolution();
    let data = decoded.into_raw();

    let expected = resolution.width() as usize * resolution.height() as usize * 3;
    if data.len() != expected {
        return None;
    }

    Some(Frame::from_rgb(data, resolution.width(), resolution.height()))
}

/// Mirror a frame horizontally (flip left-right) for selfie mode.
pub fn mirror_horizontal(frame: &mut Frame) {
    let width = frame.width as usize;
    let bpp = frame.bytes_per_pixel();
    if width == 0 {
        return;
    }

    for row in frame.data.chunks_exact_mut(width * bpp) {
        for x in 0..width / 2 {
            let left = x * bpp;
            let right = (width - 1 - x) * bpp;
            for i in 0..bpp {
                row.swap(left + i, right + i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_horizontal_2x1() {
        let mut frame = Frame::from_rgb(vec![1, 2, 3, 4, 5, 6], 2, 1);
        mirror_horizontal(&mut frame);
        assert_eq!(frame.data, vec![4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn test_mirror_horizontal_3x2() {
        // Row 0: [A, B, C], Row 1: [D, E, F]
        let mut frame = Frame::from_rgb(
            vec![
                1, 1, 1, 2, 2, 2, 3, 3, 3, //
                4, 4, 4, 5, 5, 5, 6, 6, 6,
            ],
            3,
            2,
        );
        mirror_horizontal(&mut frame);
        assert_eq!(
            frame.data,
            vec![
                3, 3, 3, 2, 2, 2, 1, 1, 1, //
                6, 6, 6, 5, 5, 5, 4, 4, 4,
            ]
        );
    }

    #[test]
    fn test_mirror_horizontal_gray() {
        let mut frame = Frame::from_gray(vec![1, 2, 3, 4, 5, 6], 3, 2);
        mirror_horizontal(&mut frame);
        assert_eq!(frame.data, vec![3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn test_mirror_horizontal_single_pixel() {
        let mut frame = Frame::from_rgb(vec![1, 2, 3], 1, 1);
        mirror_horizontal(&mut frame);
        assert_eq!(frame.data, vec![1, 2, 3]);
    }
}
