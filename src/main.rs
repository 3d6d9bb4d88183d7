use clap::Parser;
use filter_cam::camera::CameraCapture;
use filter_cam::cli::{handle_config_action, list_cameras, Args, Command};
use filter_cam::config::Config;
use filter_cam::filters::FilterMode;
use filter_cam::terminal::{StatusBar, TerminalDisplay};
use filter_cam::viewer::{StopReason, Viewer, ViewerOptions};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn main() {
    // Quiet by default: log lines would tear the picture
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    match &args.command {
        Some(Command::ListCameras) => {
            if let Err(e) = list_cameras() {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Command::Config { action }) => {
            if let Err(e) = handle_config_action(action.clone(), args.config.as_deref()) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        None => std::process::exit(run(&args)),
    }
}

/// Load config file.
/// If --config is specified, require the file to exist.
/// Otherwise, fall back to defaults if the default config is missing or broken.
fn load_config(args: &Args) -> Result<Config, String> {
    match &args.config {
        Some(path) => Config::load_from(path).map_err(|e| e.to_string()),
        None => match Config::load(None) {
            Ok(c) => Ok(c),
            Err(e) => {
                eprintln!("Warning: Failed to load config file: {}", e);
                eprintln!("Using default settings.\n");
                Ok(Config::default())
            }
        },
    }
}

fn print_key_help() {
    println!("Live filter viewer started.");
    println!("Press the following keys to switch modes:");
    for mode in FilterMode::ALL {
        println!("'{}': {} Mode", mode.key(), mode.label());
    }
    println!("'q': Quit");
}

/// Run the viewer. Returns the process exit code.
fn run(args: &Args) -> i32 {
    let config = match load_config(args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let settings = match args.resolve(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        log::warn!("Failed to install Ctrl+C handler: {}", e);
    }

    print_key_help();

    let camera = match CameraCapture::open(settings.camera.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: Could not open camera.");
            eprintln!("  {}", e);
            return 1;
        }
    };
    if let Some(res) = camera.actual_resolution() {
        log::info!(
            "Capturing at {}x{} @ {} fps",
            res.width,
            res.height,
            camera.actual_fps().unwrap_or(settings.camera.fps)
        );
    }

    let display = match TerminalDisplay::open(StatusBar::with_visibility(settings.status_bar)) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: Could not set up the terminal: {}", e);
            return 1;
        }
    };

    let options = ViewerOptions {
        initial_mode: settings.initial_mode,
        instructions: settings.instructions,
        ..Default::default()
    };

    // The viewer owns the camera and the terminal; both are released when
    // run returns, before anything below prints.
    let result = Viewer::with_options(camera, display, options)
        .with_interrupt_flag(interrupted)
        .run();

    match result {
        Ok(summary) => {
            match summary.reason {
                StopReason::StreamEnded => {
                    eprintln!("Error: Can't receive frame (stream end?). Exiting ...");
                }
                StopReason::Interrupted => eprintln!("Interrupted."),
                StopReason::Quit => {}
            }
            log::info!(
                "Showed {} frames, last mode {}",
                summary.frames_shown,
                summary.final_mode
            );
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}
