//! Subcommand handlers for list-cameras and config actions.

use std::path::Path;

use super::args::ConfigAction;
use crate::camera::{self, CameraError};
use crate::config::{default_path, Config, ConfigError, DEFAULT_CONFIG};

/// Errors from subcommands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Camera(#[from] CameraError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Config file already exists: {}\nUse 'filter-cam config show' to view current settings.", .0.display())]
    AlreadyExists(std::path::PathBuf),
    #[error("Error writing config file: {0}")]
    Write(#[source] std::io::Error),
}

/// List available cameras and print them to stdout.
pub fn list_cameras() -> Result<(), CommandError> {
    let devices = camera::list_devices()?;

    if devices.is_empty() {
        println!("No cameras found.");
        println!();
        println!("Make sure your camera is connected and permissions are granted.");
        println!("On macOS, grant access in System Settings > Privacy & Security > Camera.");
    } else {
        println!("Available cameras:");
        for device in devices {
            println!("  {}", device);
        }
        println!();
        println!("Use --device <index> to select a camera.");
    }
    Ok(())
}

/// Handle config subcommand actions. `path` overrides the default location.
pub fn handle_config_action(action: ConfigAction, path: Option<&Path>) -> Result<(), CommandError> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(&config_path))?;
            let mode = config.initial_mode()?;
            let yes_no = |b: bool| if b { "yes" } else { "no" };

            println!("Current configuration:");
            println!("  Camera: {}", config.camera.device);
            println!(
                "  Resolution: {}x{} @ {} fps",
                config.camera.width, config.camera.height, config.camera.fps
            );
            println!("  Mirror: {}", yes_no(config.camera.mirror));
            println!("  Initial mode: {}", mode);
            println!("  Instructions: {}", yes_no(config.ui.instructions));
            println!("  Status bar: {}", yes_no(config.ui.status_bar));
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            write_default_config(&config_path)?;
            println!("Created config file: {}", config_path.display());
        }
    }
    Ok(())
}

/// Write the commented default config, refusing to overwrite.
pub fn write_default_config(path: &Path) -> Result<(), CommandError> {
    if path.exists() {
        return Err(CommandError::AlreadyExists(path.to_path_buf()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(CommandError::Write)?;
    }
    std::fs::write(path, DEFAULT_CONFIG).map_err(CommandError::Write)?;
    log::info!("Wrote default config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_default_config_creates_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/filter-cam/config.toml");

        write_default_config(&path).unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.camera.device, 0);
    }

    #[test]
    fn test_write_default_config_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[camera]\ndevice = 4\n").unwrap();

        let err = write_default_config(&path).unwrap_err();
        assert!(matches!(err, CommandError::AlreadyExists(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[camera]\ndevice = 4\n");
    }

    #[test]
    fn test_config_show_with_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(handle_config_action(ConfigAction::Show, Some(&path)).is_ok());
    }
}
