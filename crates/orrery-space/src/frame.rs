//! Per-frame simulation state.

use glam::{DMat4, DVec3};

use crate::camera::CameraMode;
use crate::transforms::{earth_transform, marker_transform, moon_transform, sun_transform};

/// Model matrices for every drawable in one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyTransforms {
    pub sun: DMat4,
    pub earth: DMat4,
    pub moon: DMat4,
    pub marker: DMat4,
}

/// The only mutable state of the demo: elapsed days and the camera target.
///
/// Frames never mutate a `FrameState` in place; [`FrameState::advanced`] and
/// [`FrameState::with_camera_mode`] return the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameState {
    pub day: f64,
    pub camera_mode: CameraMode,
}

impl FrameState {
    pub fn new(day: f64, camera_mode: CameraMode) -> Self {
        Self { day, camera_mode }
    }

    /// The state one time step later. `day` is never wrapped or clamped.
    pub fn advanced(self, day_step: f64) -> Self {
        Self {
            day: self.day + day_step,
            ..self
        }
    }

    /// The same instant looking at a different body.
    pub fn with_camera_mode(self, camera_mode: CameraMode) -> Self {
        if camera_mode != self.camera_mode {
            log::debug!("camera target: {} -> {}", self.camera_mode, camera_mode);
        }
        Self {
            camera_mode,
            ..self
        }
    }

    pub fn transforms(&self) -> BodyTransforms {
        BodyTransforms {
            sun: sun_transform(self.day),
            earth: earth_transform(self.day),
            moon: moon_transform(self.day),
            marker: marker_transform(),
        }
    }

    pub fn camera_target(&self) -> DVec3 {
        self.camera_mode.target(self.day)
    }
}
