//! Terminal output: raw mode, layout, half-block rendering and the status line.

mod display;
mod layout;
mod raw_mode;
mod renderer;
mod status_bar;

pub use display::TerminalDisplay;
pub use layout::{fit_cells, place, Placement, DEFAULT_CELL_ASPECT_RATIO};
pub use raw_mode::TerminalGuard;
pub use renderer::{downsample_colors, render_half_blocks, HALF_BLOCK};
pub use status_bar::StatusBar;
