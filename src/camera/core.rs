use glam::{Mat4, Vec3};

use crate::options::CameraOptions;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and camera metadata.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera forward direction.
    pub forward: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
}

impl Camera {
    /// Camera at the configured start position, looking down -Z.
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        let eye = Vec3::from_array(options.initial_position);
        Self {
            eye,
            target: eye - Vec3::Z,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Point the camera at `point` without moving the eye.
    pub fn look_at(&mut self, point: Vec3) {
        self.target = point;
    }

    /// Unit vector from the eye toward the target.
    ///
    /// Falls back to -Z when the eye sits on the target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    /// Build the view matrix.
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_to_rh(self.eye, self.forward(), self.up)
    }

    /// Build the projection matrix.
    pub fn build_projection(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.0,
            forward: [0.0, 0.0, -1.0],
            fovy: 75.0,
        }
    }

    /// Build a uniform from the given camera's current state.
    pub fn from_camera(camera: &Camera) -> Self {
        let mut uniform = Self::new();
        uniform.update_view_proj(camera);
        uniform
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.eye.to_array();
        self.aspect = camera.aspect;
        self.forward = camera.forward().to_array();
        self.fovy = camera.fovy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = Camera::from_options(&CameraOptions::default(), 1.5);
        assert_eq!(camera.eye, Vec3::ZERO);
        assert_eq!(camera.forward(), Vec3::NEG_Z);
        assert_eq!(camera.fovy, 75.0);
    }

    #[test]
    fn forward_survives_degenerate_target() {
        let mut camera = Camera::from_options(&CameraOptions::default(), 1.0);
        camera.look_at(camera.eye);
        assert_eq!(camera.forward(), Vec3::NEG_Z);
        assert!(camera.build_matrix().is_finite());
    }

    #[test]
    fn uniform_tracks_camera() {
        let mut camera = Camera::from_options(&CameraOptions::default(), 2.0);
        camera.eye = Vec3::new(0.0, 0.0, 10.0);
        camera.look_at(Vec3::ZERO);
        let uniform = CameraUniform::from_camera(&camera);
        assert_eq!(uniform.position, [0.0, 0.0, 10.0]);
        assert_eq!(uniform.aspect, 2.0);
        assert_eq!(uniform.forward, [0.0, 0.0, -1.0]);
    }
}
