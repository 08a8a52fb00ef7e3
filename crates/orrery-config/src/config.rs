//! Configuration structs with defaults matching the demo and RON persistence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use orrery_space::CAMERA_EYE;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Default config directory: `<platform config dir>/orrery`, or the working
/// directory when the platform has none.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("orrery")
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub camera: CameraConfig,
    pub simulation: SimulationConfig,
    pub scene: SceneConfig,
    pub input: InputConfig,
    pub capture: CaptureConfig,
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    pub title: String,
}

/// Projection and clear settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Fixed projection aspect ratio. The window size does not affect it.
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    /// Background color, written to the framebuffer as given.
    pub clear_color: [f64; 3],
    /// Render to an sRGB surface, gamma-encoding every color on write.
    pub srgb: bool,
}

/// Camera placement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// World-space eye position.
    pub eye: [f64; 3],
    /// Camera target at startup: 1 = Sun, 2 = Earth, 3 = Moon.
    pub initial_mode: u8,
}

/// Simulation clock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Days added per rendered frame.
    pub day_step: f64,
    /// Day counter at startup.
    pub start_day: f64,
    /// Start with the clock stopped.
    pub paused: bool,
}

/// Mesh sizes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Octahedron sizes (corner-to-corner extent along each axis).
    pub sun_size: f32,
    pub earth_size: f32,
    pub moon_size: f32,
    pub marker_radius: f32,
    pub marker_sectors: u32,
    pub marker_stacks: u32,
}

/// Input configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Keybinding overrides (action name -> key name, e.g. `"capture": "F12"`).
    pub keybindings: HashMap<String, String>,
}

/// Frame capture output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaptureConfig {
    /// Directory for captured frames, created on first capture.
    pub directory: PathBuf,
    /// File name prefix; files are `<prefix>_<camera>_<frame>.ppm`.
    pub prefix: String,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 576,
            vsync: true,
            title: "Orrery".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            clear_color: [0.3, 0.4, 0.5],
            srgb: false,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: CAMERA_EYE.to_array(),
            initial_mode: 1,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            day_step: 1.0 / 96.0,
            start_day: 0.0,
            paused: false,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            sun_size: 18.0,
            earth_size: 10.0,
            moon_size: 6.0,
            marker_radius: 10.0,
            marker_sectors: 36,
            marker_stacks: 18,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("captures"),
            prefix: "orrery".to_string(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Validation ---

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be a positive number, got {value}")))
    }
}

impl Config {
    /// Reject values the renderer or mesh generators cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid("window", "width and height must be non-zero"));
        }

        require_positive("render.fov_y_degrees", self.render.fov_y_degrees)?;
        if self.render.fov_y_degrees >= 180.0 {
            return Err(invalid("render.fov_y_degrees", "must be below 180"));
        }
        require_positive("render.aspect_ratio", self.render.aspect_ratio)?;
        require_positive("render.near", self.render.near)?;
        if self.render.far.is_nan() || self.render.far <= self.render.near {
            return Err(invalid("render.far", "must be greater than render.near"));
        }

        if !(1..=3).contains(&self.camera.initial_mode) {
            return Err(invalid(
                "camera.initial_mode",
                format!("expected 1, 2 or 3, got {}", self.camera.initial_mode),
            ));
        }

        if !self.simulation.day_step.is_finite() || !self.simulation.start_day.is_finite() {
            return Err(invalid("simulation", "day_step and start_day must be finite"));
        }

        require_positive("scene.sun_size", self.scene.sun_size)?;
        require_positive("scene.earth_size", self.scene.earth_size)?;
        require_positive("scene.moon_size", self.scene.moon_size)?;
        require_positive("scene.marker_radius", self.scene.marker_radius)?;
        if self.scene.marker_sectors < 3 {
            return Err(invalid("scene.marker_sectors", "must be at least 3"));
        }
        if self.scene.marker_stacks < 2 {
            return Err(invalid("scene.marker_stacks", "must be at least 2"));
        }

        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    ///
    /// A loaded file is validated; an invalid one is reported as an error and
    /// left untouched on disk.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE_NAME), serialized)
            .map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read the file: `Some(new_config)` if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo() {
        let config = Config::default();
        assert_eq!((config.window.width, config.window.height), (1024, 576));
        assert_eq!(config.render.fov_y_degrees, 45.0);
        assert!((config.render.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
        assert_eq!(config.render.clear_color, [0.3, 0.4, 0.5]);
        assert_eq!(config.camera.eye, [30.0, 20.0, 90.0]);
        assert_eq!(config.camera.eye, CAMERA_EYE.to_array());
        assert_eq!(config.camera.initial_mode, 1);
        assert_eq!(config.simulation.day_step, 1.0 / 96.0);
        assert_eq!(
            (config.scene.marker_sectors, config.scene.marker_stacks),
            (36, 18)
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("width: 1024"));
        assert!(ron_str.contains("marker_sectors: 36"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config
            .input
            .keybindings
            .insert("capture".to_string(), "F12".to_string());
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(window: (width: 800), render: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 576);
        assert_eq!(config.scene, SceneConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// orrery settings\n(\n  // nothing overridden\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.simulation.day_step = 0.5;
        config.capture.prefix = "frame".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.camera.initial_mode = 3;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.camera.initial_mode), Some(3));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_invalid_value_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "(scene: (marker_sectors: 2))",
        )
        .unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "scene.marker_sectors",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.render.far = 0.05;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.camera.initial_mode = 4;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.scene.moon_size = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.simulation.day_step = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.window.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_day_step_is_allowed() {
        let mut config = Config::default();
        config.simulation.day_step = -1.0 / 96.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_dir_ends_with_orrery() {
        assert!(default_config_dir().ends_with("orrery"));
    }
}
