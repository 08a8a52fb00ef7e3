//! Config loading at startup.
//!
//! The config is read before the tracing subscriber exists, so the outcome is
//! kept in a [`ConfigSource`] and logged once logging is up.

use std::path::{Path, PathBuf};

use orrery_config::{CONFIG_FILE_NAME, CliArgs, Config, ConfigError};
use tracing::{info, warn};

/// Where the running config came from.
#[derive(Debug)]
pub enum ConfigSource {
    Loaded(PathBuf),
    Created(PathBuf),
    /// The file could not be used; defaults are running instead.
    Defaults(ConfigError),
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::Loaded(path) => info!("Loaded config from {}", path.display()),
            ConfigSource::Created(path) => info!("Created default config at {}", path.display()),
            ConfigSource::Defaults(e) => warn!("Failed to load config: {e}, using defaults"),
        }
    }
}

/// Load or create `config.ron` in `config_dir` and apply the CLI overrides.
///
/// A broken file, or overrides that make the config invalid, fall back to the
/// defaults.
pub fn load_config(config_dir: &Path, args: &CliArgs) -> (Config, ConfigSource) {
    let path = config_dir.join(CONFIG_FILE_NAME);
    let existed = path.exists();

    let (mut config, source) = match Config::load_or_create(config_dir) {
        Ok(config) if existed => (config, ConfigSource::Loaded(path)),
        Ok(config) => (config, ConfigSource::Created(path)),
        Err(e) => (Config::default(), ConfigSource::Defaults(e)),
    };

    config.apply_cli_overrides(args);
    if let Err(e) = config.validate() {
        return (Config::default(), ConfigSource::Defaults(e));
    }
    (config, source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_run_creates_then_loads() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs::default();

        let (config, source) = load_config(dir.path(), &args);
        assert!(matches!(source, ConfigSource::Created(ref p) if p.ends_with(CONFIG_FILE_NAME)));
        assert_eq!(config, Config::default());

        let (_, source) = load_config(dir.path(), &args);
        assert!(matches!(source, ConfigSource::Loaded(_)));
    }

    #[test]
    fn test_broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "not ron {{{").unwrap();

        let (config, source) = load_config(dir.path(), &CliArgs::default());
        assert!(matches!(source, ConfigSource::Defaults(ConfigError::ParseError(_))));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_cli_overrides_applied() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            camera: Some(3),
            day_step: Some(0.5),
            ..CliArgs::default()
        };
        let (config, _) = load_config(dir.path(), &args);
        assert_eq!(config.camera.initial_mode, 3);
        assert_eq!(config.simulation.day_step, 0.5);
    }

    #[test]
    fn test_invalid_override_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            width: Some(0),
            ..CliArgs::default()
        };
        let (config, source) = load_config(dir.path(), &args);
        assert!(matches!(
            source,
            ConfigSource::Defaults(ConfigError::InvalidValue { field: "window", .. })
        ));
        assert_eq!(config.window.width, 1024);
    }
}
