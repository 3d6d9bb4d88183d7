//! Instruction text overlay.
//!
//! The text is drawn onto a copy of the filtered frame, then the copy is
//! blended back over the frame so the underlying image stays faintly
//! visible beneath the glyphs.

use font8x8::{UnicodeFonts, BASIC_FONTS};

use crate::camera::{Frame, FrameFormat};
use crate::filters::{luminance, saturate_u8};

/// Key help drawn onto every frame.
pub const INSTRUCTIONS: &str = "Press 'q' to Quit | 'g': Grayscale | 'e': Edges | 's': Sepia | 'b': Blur | 'd': Strange | 't': Thermal | 'n': Normal";

/// Glyph cell size of the bitmap font.
const GLYPH_SIZE: i64 = 8;

/// Weight of the annotated copy in the final blend.
pub const OVERLAY_ALPHA: f32 = 0.9;

/// How text is placed and painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Bottom-left corner of the first glyph (x, baseline y)
    pub origin: (i64, i64),
    /// Integer glyph magnification
    pub scale: u32,
    /// RGB color; gray frames use its luminance
    pub color: [u8; 3],
    /// Stroke thickness in pixels
    pub thickness: u32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            origin: (10, 30),
            scale: 1,
            color: [0, 255, 0],
            thickness: 2,
        }
    }
}

/// Draw `text` onto `frame`. Pixels outside the frame are clipped.
/// Characters without a glyph are skipped but still advance the pen.
pub fn put_text(frame: &mut Frame, text: &str, style: &TextStyle) {
    let scale = style.scale.max(1) as i64;
    let thickness = style.thickness.max(1) as i64;
    let cell = GLYPH_SIZE * scale;
    let (origin_x, baseline) = style.origin;
    let top = baseline - cell;

    let color: Vec<u8> = match frame.format {
        FrameFormat::Rgb => style.color.to_vec(),
        FrameFormat::Gray => vec![luminance(style.color[0], style.color[1], style.color[2])],
    };

    for (i, c) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(c) else {
            continue;
        };
        let left = origin_x + i as i64 * cell;
        if left >= frame.width as i64 {
            break;
        }

        for (row, &bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                if (bits >> col) & 1 == 0 {
                    continue;
                }
                let x = left + col * scale;
                let y = top + row as i64 * scale;
                fill_rect(frame, x, y, scale + thickness - 1, &color);
            }
        }
    }
}

/// Paint a `size`×`size` square with its top-left corner at `(x, y)`.
fn fill_rect(frame: &mut Frame, x: i64, y: i64, size: i64, color: &[u8]) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + size).min(frame.width as i64);
    let y1 = (y + size).min(frame.height as i64);

    for py in y0..y1 {
        for px in x0..x1 {
            frame.pixel_mut(px as u32, py as u32).copy_from_slice(color);
        }
    }
}

/// Per-sample `saturate(alpha * a + (1 - alpha) * b)`.
///
/// Returns `None` when the frames differ in shape.
pub fn blend(a: &Frame, b: &Frame, alpha: f32) -> Option<Frame> {
    if !a.same_shape(b) {
        return None;
    }
    let beta = 1.0 - alpha;
    let data = a
        .data
        .iter()
        .zip(&b.data)
        .map(|(&x, &y)| saturate_u8(alpha * x as f32 + beta * y as f32))
        .collect();

    Some(Frame {
        data,
        width: a.width,
        height: a.height,
        format: a.format,
    })
}

/// Draw the key help onto a copy of `frame` and blend it back over the
/// original at 0.9 / 0.1.
pub fn annotate(frame: &Frame, text: &str, style: &TextStyle) -> Frame {
    let mut annotated = frame.clone();
    put_text(&mut annotated, text, style);
    blend(&annotated, frame, OVERLAY_ALPHA).unwrap_or(annotated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_identical_frames_is_identity() {
        let mut data = Vec::new();
        for i in 0..48u32 {
            data.push((i * 5) as u8);
        }
        let frame = Frame::from_rgb(data, 4, 4);
        assert_eq!(blend(&frame, &frame, OVERLAY_ALPHA), Some(frame));
    }

    #[test]
    fn test_blend_weights() {
        let a = Frame::from_gray(vec![200, 0], 2, 1);
        let b = Frame::from_gray(vec![0, 100], 2, 1);
        let out = blend(&a, &b, 0.9).unwrap();
        assert_eq!(out.data, vec![180, 10]);
    }

    #[test]
    fn test_blend_shape_mismatch() {
        let a = Frame::new(2, 2, FrameFormat::Rgb);
        let b = Frame::new(2, 2, FrameFormat::Gray);
        assert!(blend(&a, &b, 0.5).is_none());
    }

    #[test]
    fn test_put_text_paints_green_on_rgb() {
        let mut frame = Frame::new(64, 40, FrameFormat::Rgb);
        put_text(&mut frame, "P", &TextStyle::default());

        let painted: Vec<&[u8]> = frame
            .data
            .chunks_exact(3)
            .filter(|px| *px != [0u8, 0, 0])
            .collect();
        assert!(!painted.is_empty());
        assert!(painted.iter().all(|px| *px == [0u8, 255, 0]));

        // Glyph rows sit just above the baseline.
        for y in 0..22 {
            for x in 0..64 {
                assert_eq!(frame.pixel(x, y), &[0, 0, 0]);
            }
        }
    }

    #[test]
    fn test_put_text_gray_uses_luminance() {
        let mut frame = Frame::new(64, 40, FrameFormat::Gray);
        put_text(&mut frame, "X", &TextStyle::default());
        assert!(frame.data.iter().all(|&v| v == 0 || v == 150));
        assert!(frame.data.contains(&150));
    }

    #[test]
    fn test_put_text_clips_at_edges() {
        let mut narrow = Frame::new(12, 12, FrameFormat::Rgb);
        put_text(&mut narrow, INSTRUCTIONS, &TextStyle::default());
        assert!(narrow.data.iter().all(|&v| v == 0));

        let mut tiny = Frame::new(1, 1, FrameFormat::Gray);
        put_text(&mut tiny, INSTRUCTIONS, &TextStyle::default());
        assert_eq!(tiny.data, vec![0]);
    }

    #[test]
    fn test_spaces_leave_frame_untouched() {
        let mut frame = Frame::new(40, 40, FrameFormat::Rgb);
        put_text(&mut frame, "   ", &TextStyle::default());
        assert!(frame.data.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_annotate_keeps_background_faintly() {
        let frame = Frame::from_rgb(vec![200; 64 * 40 * 3], 64, 40);
        let out = annotate(&frame, "H", &TextStyle::default());
        assert!(out.same_shape(&frame));
        // Untouched pixels stay the same.
        assert_eq!(out.pixel(0, 0), &[200, 200, 200]);
        // Text pixels are 0.9 * green + 0.1 * background.
        assert!(out
            .data
            .chunks_exact(3)
            .any(|px| px[0] == 20 && px[2] == 20 && px[1] > 240));
    }
}
