//! The body transform hierarchy.
//!
//! Matrices are composed in `f64` and rebuilt from scratch every call, so no
//! error accumulates as the day counter grows. Rendering converts them with
//! [`DMat4::as_mat4`] right before upload.

use glam::{DMat4, DVec3};

use crate::orbital::{
    earth_revolution_angle, earth_self_rotation_angle, moon_revolution_angle,
    moon_self_rotation_angle, sun_self_rotation_angle,
};

/// Distance from the Sun to the Earth's center.
pub const EARTH_ORBIT_RADIUS: f64 = 30.0;
/// Distance from the Earth to the Moon's center.
pub const MOON_ORBIT_RADIUS: f64 = 15.0;
/// Tilt of the Earth's spin axis about `+Z`.
pub const EARTH_AXIAL_TILT_DEGREES: f64 = 23.4;
/// Fixed world position of the sphere marker.
pub const MARKER_POSITION: DVec3 = DVec3::new(20.0, 20.0, 0.0);

fn rotation_y_degrees(angle: f64) -> DMat4 {
    DMat4::from_rotation_y(angle.to_radians())
}

/// Revolution around the Sun followed by the orbit offset. The Earth's
/// local frame and the origin of the Moon's orbit.
fn earth_orbit_frame(day: f64) -> DMat4 {
    rotation_y_degrees(earth_revolution_angle(day))
        * DMat4::from_translation(DVec3::new(EARTH_ORBIT_RADIUS, 0.0, 0.0))
}

fn moon_orbit_frame(day: f64) -> DMat4 {
    earth_orbit_frame(day)
        * rotation_y_degrees(moon_revolution_angle(day))
        * DMat4::from_translation(DVec3::new(MOON_ORBIT_RADIUS, 0.0, 0.0))
}

/// `RotY(sun self-rotation)`.
pub fn sun_transform(day: f64) -> DMat4 {
    rotation_y_degrees(sun_self_rotation_angle(day))
}

/// `RotY(revolution) · T(30, 0, 0) · RotZ(23.4°) · RotY(self-rotation)`.
///
/// The tilt is applied after the orbit offset, so it tilts the spin axis
/// without moving the body off its orbit.
pub fn earth_transform(day: f64) -> DMat4 {
    earth_orbit_frame(day)
        * DMat4::from_rotation_z(EARTH_AXIAL_TILT_DEGREES.to_radians())
        * rotation_y_degrees(earth_self_rotation_angle(day))
}

/// `RotY(earth revolution) · T(30, 0, 0) · RotY(revolution) · T(15, 0, 0) · RotY(self-rotation)`.
///
/// The Moon inherits the Earth's orbit but not its tilt or spin.
pub fn moon_transform(day: f64) -> DMat4 {
    moon_orbit_frame(day) * rotation_y_degrees(moon_self_rotation_angle(day))
}

/// `T(20, 20, 0)`; the marker never moves.
pub fn marker_transform() -> DMat4 {
    DMat4::from_translation(MARKER_POSITION)
}

/// World-space center of the Earth.
pub fn earth_position(day: f64) -> DVec3 {
    earth_orbit_frame(day).transform_point3(DVec3::ZERO)
}

/// World-space center of the Moon.
pub fn moon_position(day: f64) -> DVec3 {
    moon_orbit_frame(day).transform_point3(DVec3::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: DVec3, expected: DVec3) {
        assert!(
            (actual - expected).length() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_sun_stays_at_origin() {
        for day in [0.0, 3.5, 27.0, 400.0] {
            assert_close(sun_transform(day).transform_point3(DVec3::ZERO), DVec3::ZERO);
        }
    }

    #[test]
    fn test_sun_identity_at_day_zero() {
        assert!(sun_transform(0.0).abs_diff_eq(DMat4::IDENTITY, 1e-12));
    }

    #[test]
    fn test_earth_position_matches_transform_origin() {
        for day in [0.0, 1.3, 91.25, 200.0] {
            assert_close(
                earth_transform(day).transform_point3(DVec3::ZERO),
                earth_position(day),
            );
        }
    }

    #[test]
    fn test_moon_position_matches_transform_origin() {
        for day in [0.0, 7.0, 91.25, 300.0] {
            assert_close(
                moon_transform(day).transform_point3(DVec3::ZERO),
                moon_position(day),
            );
        }
    }

    #[test]
    fn test_earth_stays_on_orbit_radius() {
        for i in 0..50 {
            let day = i as f64 * 7.3;
            let r = earth_position(day).length();
            assert!((r - EARTH_ORBIT_RADIUS).abs() < 1e-9, "day {day}: r = {r}");
            assert!(earth_position(day).y.abs() < 1e-12);
        }
    }

    #[test]
    fn test_moon_stays_on_orbit_around_earth() {
        for i in 0..50 {
            let day = i as f64 * 1.7;
            let d = (moon_position(day) - earth_position(day)).length();
            assert!((d - MOON_ORBIT_RADIUS).abs() < 1e-9, "day {day}: d = {d}");
        }
    }

    #[test]
    fn test_moon_at_day_zero() {
        assert_close(moon_position(0.0), DVec3::new(45.0, 0.0, 0.0));
    }

    #[test]
    fn test_earth_spin_axis_is_tilted() {
        let axis = earth_transform(0.0).transform_vector3(DVec3::Y);
        let tilt = axis.angle_between(DVec3::Y).to_degrees();
        assert!((tilt - EARTH_AXIAL_TILT_DEGREES).abs() < 1e-9);
    }

    #[test]
    fn test_marker_is_fixed() {
        assert_close(
            marker_transform().transform_point3(DVec3::ZERO),
            DVec3::new(20.0, 20.0, 0.0),
        );
    }
}
