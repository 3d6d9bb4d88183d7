//! CLI enum types.

use clap::ValueEnum;

use crate::filters::FilterMode;

/// Filter mode as accepted by `--mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModeArg {
    #[default]
    None,
    Grayscale,
    Edges,
    Sepia,
    Blur,
    Kaleidoscope,
    Thermal,
}

impl From<ModeArg> for FilterMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::None => FilterMode::None,
            ModeArg::Grayscale => FilterMode::Grayscale,
            ModeArg::Edges => FilterMode::Edges,
            ModeArg::Sepia => FilterMode::Sepia,
            ModeArg::Blur => FilterMode::Blurred,
            ModeArg::Kaleidoscope => FilterMode::Kaleidoscope,
            ModeArg::Thermal => FilterMode::Thermal,
        }
    }
}
