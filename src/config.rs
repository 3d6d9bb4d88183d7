//! Configuration file handling for filter-cam.
//!
//! Loads configuration from `<config dir>/filter-cam/config.toml` or a
//! custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::camera::{CameraSettings, Resolution};
use crate::filters::FilterMode;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct CameraConfig {
    /// Device index
    #[serde(default)]
    pub device: u32,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Flip frames horizontally at capture
    #[serde(default)]
    pub mirror: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: 0,
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            mirror: false,
        }
    }
}

impl CameraConfig {
    pub fn to_settings(&self) -> CameraSettings {
        CameraSettings {
            device_index: self.device,
            resolution: Resolution {
                width: self.width,
                height: self.height,
            },
            fps: self.fps,
            mirror: self.mirror,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct UiConfig {
    /// Draw the key help onto frames
    #[serde(default = "default_true")]
    pub instructions: bool,
    #[serde(default = "default_true")]
    pub status_bar: bool,
    /// Mode name, e.g. "sepia"
    #[serde(default)]
    pub initial_mode: Option<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            instructions: true,
            status_bar: true,
            initial_mode: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_width() -> u32 {
    Resolution::default().width
}

fn default_height() -> u32 {
    Resolution::default().height
}

fn default_fps() -> u32 {
    30
}

impl Config {
    /// Load configuration from a file path, or the default path if `None`.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            Self::load_from(&path)
        } else {
            log::debug!("No config file at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Load configuration from a file that must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.initial_mode()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// The configured starting mode, `FilterMode::None` when unset.
    pub fn initial_mode(&self) -> Result<FilterMode, ConfigError> {
        match &self.ui.initial_mode {
            None => Ok(FilterMode::None),
            Some(name) => name.parse().map_err(|e| ConfigError::InvalidValue {
                key: "ui.initial_mode",
                message: format!("{}", e),
            }),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid config value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("filter-cam").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/filter-cam/config.toml")
        })
}

/// Contents written by `filter-cam config init`.
pub const DEFAULT_CONFIG: &str = r#"# filter-cam configuration

[camera]
# Camera device index (see `filter-cam list-cameras`)
device = 0
# Requested capture size; the camera may pick the closest it supports
width = 640
height = 480
fps = 30
# Mirror horizontally (selfie mode)
mirror = false

[ui]
# Draw the key help onto every frame
instructions = true
# Show the status line under the picture
status_bar = true
# Mode to start in: none, grayscale, edges, sepia, blur, kaleidoscope, thermal
initial_mode = "none"
"#;
