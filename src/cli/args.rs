//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::ModeArg;
use crate::camera::{CameraSettings, Resolution};
use crate::config::{Config, ConfigError};
use crate::filters::FilterMode;

/// Live webcam viewer with switchable image filters
#[derive(Parser, Debug)]
#[command(name = "filter-cam")]
#[command(version, about = "Live webcam filters in your terminal", long_about = None)]
#[command(after_help = "KEYS (while running):
    n    Normal
    g    Grayscale
    e    Edge detection
    s    Sepia
    b    Blur
    d    Doctor Strange (kaleidoscope)
    t    Thermal vision
    q    Quit")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Camera device index (from list-cameras)
    #[arg(long, short)]
    pub device: Option<u32>,

    /// Filter to start with
    #[arg(long, short)]
    pub mode: Option<ModeArg>,

    /// Requested capture width
    #[arg(long)]
    pub width: Option<u32>,

    /// Requested capture height
    #[arg(long)]
    pub height: Option<u32>,

    /// Mirror the camera horizontally (selfie mode)
    #[arg(long)]
    pub mirror: bool,

    /// Do not draw the key help onto frames
    #[arg(long)]
    pub no_instructions: bool,

    /// Hide status bar
    #[arg(long)]
    pub no_status: bool,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available cameras
    ListCameras,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

/// Settings for one viewer run after merging CLI args over the config file.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub camera: CameraSettings,
    pub initial_mode: FilterMode,
    pub instructions: bool,
    pub status_bar: bool,
}

impl Args {
    /// Merge settings: CLI args > config file > built-in defaults.
    pub fn resolve(&self, config: &Config) -> Result<RunSettings, ConfigError> {
        let mut camera = config.camera.to_settings();
        if let Some(device) = self.device {
            camera.device_index = device;
        }
        camera.resolution = Resolution {
            width: self.width.unwrap_or(camera.resolution.width),
            height: self.height.unwrap_or(camera.resolution.height),
        };
        if self.mirror {
            camera.mirror = true;
        }

        let initial_mode = match self.mode {
            Some(mode) => mode.into(),
            None => config.initial_mode()?,
        };

        Ok(RunSettings {
            camera,
            initial_mode,
            instructions: config.ui.instructions && !self.no_instructions,
            status_bar: config.ui.status_bar && !self.no_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["filter-cam"]);
        assert!(args.command.is_none());
        assert!(args.device.is_none());
        assert!(args.mode.is_none());
        assert!(args.width.is_none());
        assert!(args.height.is_none());
        assert!(!args.mirror);
        assert!(!args.no_instructions);
        assert!(!args.no_status);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_args_device_index() {
        let args = Args::parse_from(["filter-cam", "--device", "2"]);
        assert_eq!(args.device, Some(2));

        let args = Args::parse_from(["filter-cam", "-d", "1"]);
        assert_eq!(args.device, Some(1));
    }

    #[test]
    fn test_args_mode_values() {
        let args = Args::parse_from(["filter-cam", "--mode", "sepia"]);
        assert_eq!(args.mode, Some(ModeArg::Sepia));

        let args = Args::parse_from(["filter-cam", "-m", "kaleidoscope"]);
        assert_eq!(args.mode, Some(ModeArg::Kaleidoscope));

        assert!(Args::try_parse_from(["filter-cam", "--mode", "sharpen"]).is_err());
    }

    #[test]
    fn test_args_config_option() {
        let args = Args::parse_from(["filter-cam", "--config", "/tmp/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/config.toml")));

        let args = Args::parse_from(["filter-cam", "-c", "/tmp/test.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/test.toml")));
    }

    #[test]
    fn test_args_list_cameras_subcommand() {
        let args = Args::parse_from(["filter-cam", "list-cameras"]);
        assert!(matches!(args.command, Some(Command::ListCameras)));
    }

    #[test]
    fn test_args_config_subcommands() {
        let args = Args::parse_from(["filter-cam", "config", "show"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));

        let args = Args::parse_from(["filter-cam", "config", "init"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn test_resolve_uses_config_when_no_flags() {
        let args = Args::parse_from(["filter-cam"]);
        let settings = args.resolve(&Config::default()).unwrap();
        assert_eq!(settings.camera.device_index, 0);
        assert_eq!(settings.camera.resolution, Resolution::MEDIUM);
        assert!(!settings.camera.mirror);
        assert_eq!(settings.initial_mode, FilterMode::None);
        assert!(settings.instructions);
        assert!(settings.status_bar);
    }

    #[test]
    fn test_resolve_flags_override_config() {
        let args = Args::parse_from([
            "filter-cam",
            "--device",
            "3",
            "--mode",
            "thermal",
            "--width",
            "1280",
            "--height",
            "720",
            "--mirror",
            "--no-status",
            "--no-instructions",
        ]);
        let mut config = Config::default();
        config.ui.initial_mode = Some("sepia".to_string());

        let settings = args.resolve(&config).unwrap();
        assert_eq!(settings.camera.device_index, 3);
        assert_eq!(settings.camera.resolution, Resolution::HIGH);
        assert!(settings.camera.mirror);
        assert_eq!(settings.initial_mode, FilterMode::Thermal);
        assert!(!settings.instructions);
        assert!(!settings.status_bar);
    }

    #[test]
    fn test_resolve_keeps_config_mirror_without_flag() {
        let args = Args::parse_from(["filter-cam"]);
        let mut config = Config::default();
        config.camera.mirror = true;
        assert!(args.resolve(&config).unwrap().camera.mirror);
    }

    #[test]
    fn test_resolve_bad_config_mode() {
        let args = Args::parse_from(["filter-cam"]);
        let mut config = Config::default();
        config.ui.initial_mode = Some("sharpen".to_string());
        assert!(args.resolve(&config).is_err());
    }
}
