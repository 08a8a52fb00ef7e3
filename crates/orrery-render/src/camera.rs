//! Fixed-eye camera producing view and projection matrices.

use glam::{Mat4, Vec3};

use crate::pipeline::CameraUniform;

/// A right-handed camera looking from `eye` at `target`.
///
/// The projection uses wgpu's `[0, 1]` depth range with near mapped to 0.
/// The aspect ratio is fixed at construction and does not follow the window.
#[derive(Debug, Clone, PartialEq)]
pub struct LookAtCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl LookAtCamera {
    pub fn new(eye: Vec3, fov_y_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self {
            eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: fov_y_degrees.to_radians(),
            aspect_ratio,
            near,
            far,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.near, self.far)
    }

    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform::new(self.view_matrix(), self.projection_matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_camera() -> LookAtCamera {
        LookAtCamera::new(Vec3::new(30.0, 20.0, 90.0), 45.0, 16.0 / 9.0, 0.1, 1000.0)
    }

    #[test]
    fn test_view_moves_eye_to_origin() {
        let camera = demo_camera();
        let eye_in_view = camera.view_matrix().transform_point3(camera.eye);
        assert!(eye_in_view.length() < 1e-4);
    }

    #[test]
    fn test_target_lies_on_negative_z() {
        let mut camera = demo_camera();
        camera.target = Vec3::new(30.0, 0.0, 0.0);
        let t = camera.view_matrix().transform_point3(camera.target);
        assert!(t.x.abs() < 1e-4 && t.y.abs() < 1e-4, "{t}");
        assert!(t.z < 0.0);
        assert!((t.z.abs() - (camera.target - camera.eye).length()).abs() < 1e-3);
    }

    #[test]
    fn test_projection_depth_range() {
        let camera = demo_camera();
        let proj = camera.projection_matrix();
        let near = proj.project_point3(Vec3::new(0.0, 0.0, -camera.near));
        let far = proj.project_point3(Vec3::new(0.0, 0.0, -camera.far));
        assert!(near.z.abs() < 1e-5, "near depth {}", near.z);
        assert!((far.z - 1.0).abs() < 1e-5, "far depth {}", far.z);
    }

    #[test]
    fn test_fov_maps_edge_to_ndc_one() {
        let camera = demo_camera();
        let half = (camera.fov_y * 0.5).tan() * 10.0;
        let top = camera
            .projection_matrix()
            .project_point3(Vec3::new(0.0, half, -10.0));
        assert!((top.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_uniform_carries_both_matrices() {
        let camera = demo_camera();
        let uniform = camera.to_uniform();
        assert_eq!(uniform.view, camera.view_matrix().to_cols_array_2d());
        assert_eq!(
            uniform.projection,
            camera.projection_matrix().to_cols_array_2d()
        );
    }
}
