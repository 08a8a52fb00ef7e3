//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "orrery", about = "Sun, Earth and Moon orbiting on the GPU")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Enable or disable vsync.
    #[arg(long)]
    pub vsync: Option<bool>,

    /// Days advanced per frame.
    #[arg(long)]
    pub day_step: Option<f64>,

    /// Day counter at startup.
    #[arg(long)]
    pub start_day: Option<f64>,

    /// Initial camera target (1 = Sun, 2 = Earth, 3 = Moon).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub camera: Option<u8>,

    /// Start with the simulation clock stopped.
    #[arg(long)]
    pub paused: bool,

    /// Directory for captured frames.
    #[arg(long)]
    pub capture_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(vsync) = args.vsync {
            self.window.vsync = vsync;
        }
        if let Some(step) = args.day_step {
            self.simulation.day_step = step;
        }
        if let Some(day) = args.start_day {
            self.simulation.start_day = day;
        }
        if let Some(mode) = args.camera {
            self.camera.initial_mode = mode;
        }
        if args.paused {
            self.simulation.paused = true;
        }
        if let Some(ref dir) = args.capture_dir {
            self.capture.directory = dir.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
