//! Truecolor half-block rendering.
//!
//! Each terminal cell shows two vertically stacked pixels: the upper one as
//! the foreground color of `▀` and the lower one as the background color.
//! Output is built as ANSI escape strings, one per terminal row.

use std::fmt::Write;

use crate::camera::{Frame, FrameFormat};

/// Upper half block.
pub const HALF_BLOCK: char = '▀';

/// Average color of each cell when `frame` is resampled to
/// `grid_width × grid_height`.
///
/// Gray frames are expanded to neutral RGB. When the grid is larger than the
/// frame every cell still covers at least one source pixel.
pub fn downsample_colors(frame: &Frame, grid_width: u16, grid_height: u16) -> Vec<[u8; 3]> {
    let img_width = frame.width;
    let img_height = frame.height;

    if grid_width == 0 || grid_height == 0 || img_width == 0 || img_height == 0 {
        return Vec::new();
    }

    let cell_w = img_width as f32 / grid_width as f32;
    let cell_h = img_height as f32 / grid_height as f32;

    let span = |cell: u16, size: f32, limit: u32| -> (u32, u32) {
        let start = ((cell as f32 * size) as u32).min(limit - 1);
        let end = (((cell + 1) as f32 * size) as u32).clamp(start + 1, limit);
        (start, end)
    };

    let mut result = Vec::with_capacity(grid_width as usize * grid_height as usize);

    for gy in 0..grid_height {
        let (start_y, end_y) = span(gy, cell_h, img_height);
        for gx in 0..grid_width {
            let (start_x, end_x) = span(gx, cell_w, img_width);

            let mut sum = [0u32; 3];
            let mut count = 0u32;
            for py in start_y..end_y {
                for px in start_x..end_x {
                    let idx = frame.offset(px, py);
                    match frame.format {
                        FrameFormat::Rgb => {
                            sum[0] += frame.data[idx] as u32;
                            sum[1] += frame.data[idx + 1] as u32;
                            sum[2] += frame.data[idx + 2] as u32;
                        }
                        FrameFormat::Gray => {
                            let v = frame.data[idx] as u32;
                            sum[0] += v;
                            sum[1] += v;
                            sum[2] += v;
                        }
                    }
                    count += 1;
                }
            }

            result.push([
                (sum[0] / count) as u8,
                (sum[1] / count) as u8,
                (sum[2] / count) as u8,
            ]);
        }
    }

    result
}

/// Render `frame` into `cols × rows` terminal cells.
///
/// # Returns
/// One string per terminal row, each ending with an attribute reset. Cursor
/// positioning is left to the caller.
pub fn render_half_blocks(frame: &Frame, cols: u16, rows: u16) -> Vec<String> {
    let grid_h = rows.saturating_mul(2);
    let colors = downsample_colors(frame, cols, grid_h);
    if colors.is_empty() {
        return Vec::new();
    }

    let width = cols as usize;
    let mut lines = Vec::with_capacity(rows as usize);

    for row in 0..rows as usize {
        let top_row = &colors[(2 * row) * width..(2 * row + 1) * width];
        let bottom_row = &colors[(2 * row + 1) * width..(2 * row + 2) * width];

        let mut line = String::with_capacity(width * 24);
        let mut last: Option<([u8; 3], [u8; 3])> = None;

        for (top, bottom) in top_row.iter().zip(bottom_row) {
            if last != Some((*top, *bottom)) {
                // ANSI true color: 38 = foreground, 48 = background
                let _ = write!(
                    line,
                    "\x1b[38;2;{};{};{};48;2;{};{};{}m",
                    top[0], top[1], top[2], bottom[0], bottom[1], bottom[2]
                );
                last = Some((*top, *bottom));
            }
            line.push(HALF_BLOCK);
        }

        line.push_str("\x1b[0m");
        lines.push(line);
    }

    lines
}
