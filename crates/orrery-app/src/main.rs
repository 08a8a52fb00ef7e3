//! The orrery binary.

use clap::Parser;
use orrery_app::startup::load_config;
use orrery_app::window::run_with_config;
use orrery_config::{CliArgs, default_config_dir};

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);
    let (config, source) = load_config(&config_dir, &args);

    let log_dir = config_dir.join("logs");
    orrery_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));
    source.log();
    tracing::info!("Capturing to {}", config.capture.directory.display());

    run_with_config(config, config_dir, args);
}
