//! Rotation angles of the three bodies.
//!
//! Every angle is in degrees, linear in the elapsed day count and never
//! wrapped. Periods are deliberately round numbers rather than sidereal values.

/// Days for the Sun to spin once about its own axis.
pub const SUN_ROTATION_PERIOD_DAYS: f64 = 27.0;
/// Days for the Earth to complete one orbit of the Sun.
pub const EARTH_ORBITAL_PERIOD_DAYS: f64 = 365.0;
/// Days for the Earth to spin once about its own axis.
pub const EARTH_ROTATION_PERIOD_DAYS: f64 = 1.0;
/// Days for the Moon to complete one orbit of the Earth.
pub const MOON_ORBITAL_PERIOD_DAYS: f64 = 28.0;
/// Days for the Moon to spin once; tidally locked, so equal to its orbit.
pub const MOON_ROTATION_PERIOD_DAYS: f64 = 28.0;

fn angle_for_period(day: f64, period_days: f64) -> f64 {
    (360.0 / period_days) * day
}

pub fn sun_self_rotation_angle(day: f64) -> f64 {
    angle_for_period(day, SUN_ROTATION_PERIOD_DAYS)
}

pub fn earth_revolution_angle(day: f64) -> f64 {
    angle_for_period(day, EARTH_ORBITAL_PERIOD_DAYS)
}

pub fn earth_self_rotation_angle(day: f64) -> f64 {
    angle_for_period(day, EARTH_ROTATION_PERIOD_DAYS)
}

pub fn moon_revolution_angle(day: f64) -> f64 {
    angle_for_period(day, MOON_ORBITAL_PERIOD_DAYS)
}

pub fn moon_self_rotation_angle(day: f64) -> f64 {
    angle_for_period(day, MOON_ROTATION_PERIOD_DAYS)
}
