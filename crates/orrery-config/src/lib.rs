//! Configuration for the orrery demo.
//!
//! Settings persist to disk as `config.ron`, tolerate missing and unknown
//! fields, and can be overridden per run from the command line.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, CameraConfig, CaptureConfig, Config, DebugConfig, InputConfig, RenderConfig,
    SceneConfig, SimulationConfig, WindowConfig, default_config_dir,
};
pub use error::ConfigError;
