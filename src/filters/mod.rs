//! Per-frame image filters and the mode that selects between them.
//!
//! Every filter is a pure function from one [`Frame`] to a new one. The
//! [`FilterMode`] enum names the filters and dispatches to them.

mod blur;
mod edges;
mod grayscale;
mod kaleidoscope;
mod sepia;
mod thermal;

use std::fmt;
use std::str::FromStr;

use crate::camera::Frame;

pub use blur::{apply_blur, gaussian_blur, gaussian_kernel, sigma_for_kernel, BLUR_KERNEL_SIZE};
pub use edges::{canny, detect_edges, sobel, HIGH_THRESHOLD, LOW_THRESHOLD};
pub use grayscale::{luminance, to_grayscale, to_grayscale_into};
pub use kaleidoscope::{apply_kaleidoscope, warp_affine, Affine, ROTATION_DEGREES};
pub use sepia::{apply_sepia, saturate_u8, sepia_pixel, SEPIA_BGR};
pub use thermal::{apply_thermal, jet_color, palette};

/// The filter applied to each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    /// Frames pass through untouched
    #[default]
    None,
    Grayscale,
    Edges,
    Sepia,
    Blurred,
    Kaleidoscope,
    Thermal,
}

impl FilterMode {
    /// All modes, in key-help order.
    pub const ALL: [FilterMode; 7] = [
        FilterMode::None,
        FilterMode::Grayscale,
        FilterMode::Edges,
        FilterMode::Sepia,
        FilterMode::Blurred,
        FilterMode::Kaleidoscope,
        FilterMode::Thermal,
    ];

    /// Run this mode's filter over a frame.
    pub fn apply(&self, frame: &Frame) -> Frame {
        match self {
            FilterMode::None => frame.clone(),
            FilterMode::Grayscale => to_grayscale(frame),
            FilterMode::Edges => detect_edges(frame),
            FilterMode::Sepia => apply_sepia(frame),
            FilterMode::Blurred => apply_blur(frame),
            FilterMode::Kaleidoscope => apply_kaleidoscope(frame),
            FilterMode::Thermal => apply_thermal(frame),
        }
    }

    /// Human-readable name used in the "Switched to ... Mode." message.
    pub fn label(&self) -> &'static str {
        match self {
            FilterMode::None => "Normal",
            FilterMode::Grayscale => "Grayscale",
            FilterMode::Edges => "Edge Detection",
            FilterMode::Sepia => "Sepia",
            FilterMode::Blurred => "Blurred",
            FilterMode::Kaleidoscope => "Doctor Strange",
            FilterMode::Thermal => "Thermal Vision",
        }
    }

    /// Short identifier used in config files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            FilterMode::None => "none",
            FilterMode::Grayscale => "grayscale",
            FilterMode::Edges => "edges",
            FilterMode::Sepia => "sepia",
            FilterMode::Blurred => "blur",
            FilterMode::Kaleidoscope => "kaleidoscope",
            FilterMode::Thermal => "thermal",
        }
    }

    /// The key that selects this mode.
    pub fn key(&self) -> char {
        match self {
            FilterMode::None => 'n',
            FilterMode::Grayscale => 'g',
            FilterMode::Edges => 'e',
            FilterMode::Sepia => 's',
            FilterMode::Blurred => 'b',
            FilterMode::Kaleidoscope => 'd',
            FilterMode::Thermal => 't',
        }
    }

    /// The mode selected by `key`, if any. Only lowercase keys are mapped.
    pub fn from_key(key: char) -> Option<FilterMode> {
        Self::ALL.into_iter().find(|mode| mode.key() == key)
    }

    /// Whether this mode's output has a single channel.
    pub fn is_single_channel(&self) -> bool {
        matches!(self, FilterMode::Grayscale | FilterMode::Edges)
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a filter name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter mode '{0}' (expected one of: none, grayscale, edges, sepia, blur, kaleidoscope, thermal)")]
pub struct ParseModeError(pub String);

impl FromStr for FilterMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "normal" => Ok(FilterMode::None),
            "grayscale" | "gray" | "grey" => Ok(FilterMode::Grayscale),
            "edges" | "edge" | "canny" => Ok(FilterMode::Edges),
            "sepia" => Ok(FilterMode::Sepia),
            "blur" | "blurred" => Ok(FilterMode::Blurred),
            "kaleidoscope" | "strange" => Ok(FilterMode::Kaleidoscope),
            "thermal" => Ok(FilterMode::Thermal),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::FrameFormat;

    fn sample_frame() -> Frame {
        let mut data = Vec::new();
        for y in 0..6u32 {
            for x in 0..8u32 {
                data.extend_from_slice(&[(x * 30) as u8, (y * 40) as u8, 200]);
            }
        }
        Frame::from_rgb(data, 8, 6)
    }

    #[test]
    fn test_default_mode_is_none() {
        assert_eq!(FilterMode::default(), FilterMode::None);
    }

    #[test]
    fn test_none_is_identity() {
        let frame = sample_frame();
        assert_eq!(FilterMode::None.apply(&frame), frame);
    }

    #[test]
    fn test_output_channels_per_mode() {
        let frame = sample_frame();
        for mode in FilterMode::ALL {
            let out = mode.apply(&frame);
            assert_eq!((out.width, out.height), (8, 6), "{}", mode);
            let expected = if mode.is_single_channel() {
                FrameFormat::Gray
            } else {
                FrameFormat::Rgb
            };
            assert_eq!(out.format, expected, "{}", mode);
            assert_eq!(out.data.len(), 48 * expected.channels(), "{}", mode);
        }
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(FilterMode::from_key('n'), Some(FilterMode::None));
        assert_eq!(FilterMode::from_key('g'), Some(FilterMode::Grayscale));
        assert_eq!(FilterMode::from_key('e'), Some(FilterMode::Edges));
        assert_eq!(FilterMode::from_key('s'), Some(FilterMode::Sepia));
        assert_eq!(FilterMode::from_key('b'), Some(FilterMode::Blurred));
        assert_eq!(FilterMode::from_key('d'), Some(FilterMode::Kaleidoscope));
        assert_eq!(FilterMode::from_key('t'), Some(FilterMode::Thermal));
        assert_eq!(FilterMode::from_key('q'), None);
        assert_eq!(FilterMode::from_key('G'), None);
    }

    #[test]
    fn test_parse_names() {
        for mode in FilterMode::ALL {
            assert_eq!(mode.name().parse::<FilterMode>(), Ok(mode));
        }
        assert_eq!("Strange".parse::<FilterMode>(), Ok(FilterMode::Kaleidoscope));
        assert!("sharpen".parse::<FilterMode>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(FilterMode::None.label(), "Normal");
        assert_eq!(FilterMode::Edges.label(), "Edge Detection");
        assert_eq!(FilterMode::Thermal.label(), "Thermal Vision");
    }
}
