//! Camera target selection.
//!
//! The eye never moves; the three modes only change what it looks at.

use std::fmt;

use glam::DVec3;

use crate::transforms::{earth_position, moon_position};

/// Fixed eye position.
pub const CAMERA_EYE: DVec3 = DVec3::new(30.0, 20.0, 90.0);
/// World up vector used for the view matrix.
pub const CAMERA_UP: DVec3 = DVec3::Y;

/// Which body the camera tracks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CameraMode {
    #[default]
    Sun = 1,
    Earth = 2,
    Moon = 3,
}

/// A camera selector outside `1..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid camera mode {0}, expected 1, 2 or 3")]
pub struct InvalidCameraMode(pub u8);

impl CameraMode {
    pub const ALL: [CameraMode; 3] = [CameraMode::Sun, CameraMode::Earth, CameraMode::Moon];

    /// Numeric selector (1, 2 or 3).
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Lower-case body name, used in log lines and capture file names.
    pub fn name(self) -> &'static str {
        match self {
            CameraMode::Sun => "sun",
            CameraMode::Earth => "earth",
            CameraMode::Moon => "moon",
        }
    }

    /// World-space point the camera looks at on the given day.
    pub fn target(self, day: f64) -> DVec3 {
        match self {
            CameraMode::Sun => DVec3::ZERO,
            CameraMode::Earth => earth_position(day),
            CameraMode::Moon => moon_position(day),
        }
    }
}

impl TryFrom<u8> for CameraMode {
    type Error = InvalidCameraMode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CameraMode::Sun),
            2 => Ok(CameraMode::Earth),
            3 => Ok(CameraMode::Moon),
            other => Err(InvalidCameraMode(other)),
        }
    }
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
