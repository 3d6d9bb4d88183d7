//! Fitting a frame into the terminal while keeping its aspect ratio.

/// Terminal cells are roughly twice as tall as they are wide.
pub const DEFAULT_CELL_ASPECT_RATIO: f32 = 2.0;

/// Where a frame lands on screen, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Left column of the picture
    pub x: u16,
    /// Top row of the picture
    pub y: u16,
    /// Picture width in cells (one pixel column per cell)
    pub cols: u16,
    /// Picture height in cells (two pixel rows per cell)
    pub rows: u16,
}

impl Placement {
    pub fn is_empty(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }
}

/// Calculate the largest cell area with the image's aspect ratio that fits
/// in `max_cols × max_rows`.
///
/// `cell_aspect` is the height/width ratio of one terminal cell. A 1:1 image
/// therefore needs `cell_aspect` times fewer rows than columns.
///
/// # Returns
/// `(cols, rows)`, or `(0, 0)` when any input is zero.
pub fn fit_cells(
    img_width: u32,
    img_height: u32,
    max_cols: u16,
    max_rows: u16,
    cell_aspect: f32,
) -> (u16, u16) {
    if img_width == 0 || img_height == 0 || max_cols == 0 || max_rows == 0 {
        return (0, 0);
    }

    let target_aspect = img_width as f32 / img_height as f32 * cell_aspect;

    // Try fitting to the full width first
    let rows = (max_cols as f32 / target_aspect).round() as u16;
    if rows <= max_rows && rows > 0 {
        return (max_cols, rows);
    }

    let cols = ((max_rows as f32 * target_aspect).round() as u16).min(max_cols);
    (cols.max(1), max_rows)
}

/// Center a frame in a `term_cols × picture_rows` area.
pub fn place(img_width: u32, img_height: u32, term_cols: u16, picture_rows: u16) -> Placement {
    let (cols, rows) = fit_cells(
        img_width,
        img_height,
        term_cols,
        picture_rows,
        DEFAULT_CELL_ASPECT_RATIO,
    );
    Placement {
        x: (term_cols - cols) / 2,
        y: (picture_rows - rows) / 2,
        cols,
        rows,
    }
}
