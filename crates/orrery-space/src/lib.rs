//! Sun–Earth–Moon kinematics: rotation angles as functions of the elapsed day,
//! the body transform hierarchy, camera target selection and the per-frame
//! simulation state.

pub mod camera;
pub mod frame;
pub mod orbital;
pub mod transforms;

pub use camera::{CAMERA_EYE, CAMERA_UP, CameraMode, InvalidCameraMode};
pub use frame::{BodyTransforms, FrameState};
pub use orbital::{
    earth_revolution_angle, earth_self_rotation_angle, moon_revolution_angle,
    moon_self_rotation_angle, sun_self_rotation_angle,
};
pub use transforms::{
    EARTH_AXIAL_TILT_DEGREES, EARTH_ORBIT_RADIUS, MARKER_POSITION, MOON_ORBIT_RADIUS,
    earth_position, earth_transform, marker_transform, moon_position, moon_transform,
    sun_transform,
};
