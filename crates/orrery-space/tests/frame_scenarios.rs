use glam::DVec3;
use orrery_space::*;

fn assert_close(actual: DVec3, expected: DVec3) {
    assert!(
        (actual - expected).length() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn origin_of(m: glam::DMat4) -> DVec3 {
    m.transform_point3(DVec3::ZERO)
}

#[test]
fn test_earth_starts_on_positive_x() {
    let t = FrameState::new(0.0, CameraMode::Sun).transforms();
    assert_close(origin_of(t.earth), DVec3::new(30.0, 0.0, 0.0));
}

#[test]
fn test_earth_quarter_orbit() {
    // Right-handed rotation about +Y carries +X toward -Z.
    let t = FrameState::new(91.25, CameraMode::Sun).transforms();
    assert_close(origin_of(t.earth), DVec3::new(0.0, 0.0, -30.0));
}

#[test]
fn test_earth_returns_after_one_year() {
    let t = FrameState::new(365.0, CameraMode::Sun).transforms();
    assert_close(origin_of(t.earth), DVec3::new(30.0, 0.0, 0.0));
}

#[test]
fn test_moon_quarter_lunar_orbit() {
    // Earth has barely moved after 7 days; the Moon has swung a quarter turn.
    let day = 7.0;
    let earth = earth_position(day);
    let rel = moon_position(day) - earth;
    let earth_angle = earth_revolution_angle(day).to_radians();
    let expected_angle = earth_angle + moon_revolution_angle(day).to_radians();
    let expected = DVec3::new(expected_angle.cos(), 0.0, -expected_angle.sin()) * MOON_ORBIT_RADIUS;
    assert_close(rel, expected);
}

#[test]
fn test_camera_targets_per_mode() {
    let day = 91.25;
    let sun = FrameState::new(day, CameraMode::Sun);
    let earth = sun.with_camera_mode(CameraMode::Earth);
    let moon = sun.with_camera_mode(CameraMode::Moon);

    assert_close(sun.camera_target(), DVec3::ZERO);
    assert_close(earth.camera_target(), DVec3::new(0.0, 0.0, -30.0));
    assert_close(moon.camera_target(), origin_of(moon.transforms().moon));
}

#[test]
fn test_camera_mode_from_key_number() {
    let state = FrameState::default();
    let selected = CameraMode::try_from(2).map(|mode| state.with_camera_mode(mode));
    assert_eq!(selected.map(|s| s.camera_mode), Ok(CameraMode::Earth));
    assert!(CameraMode::try_from(7).is_err());
}

#[test]
fn test_marker_never_moves() {
    let a = FrameState::new(0.0, CameraMode::Sun).transforms().marker;
    let b = FrameState::new(1000.0, CameraMode::Moon).transforms().marker;
    assert_eq!(a, b);
    assert_close(origin_of(a), MARKER_POSITION);
}

#[test]
fn test_long_running_day_stays_precise() {
    // Ten simulated millennia: the Earth must still sit on its orbit.
    let day = 365.0 * 10_000.0 + 91.25;
    let state = FrameState::new(day, CameraMode::Earth);
    let r = state.camera_target().length();
    assert!((r - EARTH_ORBIT_RADIUS).abs() < 1e-6);
    assert!((state.camera_target() - DVec3::new(0.0, 0.0, -30.0)).length() < 1e-4);
}

#[test]
fn test_eye_and_up_are_fixed() {
    assert_eq!(CAMERA_EYE, DVec3::new(30.0, 20.0, 90.0));
    assert_eq!(CAMERA_UP, DVec3::Y);
}
