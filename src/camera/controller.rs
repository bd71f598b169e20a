use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::camera::core::Camera;
use crate::options::OrbitOptions;

/// Polar angles are kept this far away from the poles so the view basis
/// never degenerates.
const POLE_EPSILON: f32 = 1e-6;

/// Eye offset from the orbit target in spherical coordinates.
///
/// `phi` is the polar angle measured from +Y, `theta` the azimuth around
/// +Y measured from +Z toward +X.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Distance from the target.
    pub radius: f32,
    /// Polar angle in radians, `0` looks straight down.
    pub phi: f32,
    /// Azimuth angle in radians.
    pub theta: f32,
}

impl Spherical {
    /// Decompose an offset vector.
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    /// Recompose into an offset vector.
    pub fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

/// Orbit camera controller: rotates and zooms the camera around a target
/// point within the configured angle and distance limits.
///
/// The controller owns the [`Camera`]. Every mutation goes through
/// [`update`](Self::update), which re-derives the eye from the clamped
/// spherical offset, so the limits hold no matter how the camera was moved.
pub struct OrbitController {
    /// The camera being orbited.
    pub camera: Camera,
    /// When `false`, rotate and zoom requests are ignored.
    pub enabled: bool,
    target: Vec3,
    limits: OrbitOptions,
}

impl OrbitController {
    /// Wrap a camera with the given orbit policy. The initial target is the
    /// camera's current look-at point.
    ///
    /// Inverted or NaN ranges in `limits` are repaired first; see
    /// [`OrbitOptions::normalized`].
    pub fn new(camera: Camera, limits: &OrbitOptions) -> Self {
        let target = camera.target;
        Self {
            camera,
            enabled: true,
            target,
            limits: limits.normalized(),
        }
    }

    /// Point the camera orbits around.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Move the orbit target. Call [`update`](Self::update) to re-aim.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Active orbit policy.
    pub fn limits(&self) -> &OrbitOptions {
        &self.limits
    }

    /// Current eye offset from the target.
    pub fn spherical(&self) -> Spherical {
        Spherical::from_offset(self.camera.eye - self.target)
    }

    /// Current polar angle in radians.
    pub fn polar_angle(&self) -> f32 {
        self.spherical().phi
    }

    /// Current azimuth angle in radians.
    pub fn azimuth_angle(&self) -> f32 {
        self.spherical().theta
    }

    /// Current eye distance from the target.
    pub fn distance(&self) -> f32 {
        self.spherical().radius
    }

    /// Re-derive the eye from the clamped spherical offset and aim the
    /// camera at the target.
    pub fn update(&mut self) {
        self.apply(0.0, 0.0, 1.0);
    }

    /// Orbit by a pointer delta in pixels.
    ///
    /// A drag across the full viewport height turns the camera by one full
    /// revolution (times `rotate_speed`). Ignored while disabled.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        if !self.enabled || viewport_height <= 0.0 {
            return;
        }
        let scale = TAU / viewport_height * self.limits.rotate_speed;
        self.apply(-delta.x * scale, -delta.y * scale, 1.0);
    }

    /// Dolly toward (positive) or away from (negative) the target.
    ///
    /// Ignored while disabled or when zoom is turned off.
    pub fn zoom(&mut self, delta: f32) {
        if !self.enabled || !self.limits.enable_zoom {
            return;
        }
        let factor = self
            .limits
            .zoom_base
            .powf(delta * self.limits.zoom_speed);
        self.apply(0.0, 0.0, factor);
    }

    /// Update the viewport aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    fn apply(&mut self, delta_theta: f32, delta_phi: f32, scale: f32) {
        let mut spherical = self.spherical();

        spherical.theta = self.clamp_azimuth(spherical.theta + delta_theta);
        spherical.phi = (spherical.phi + delta_phi)
            .clamp(self.limits.min_polar, self.limits.max_polar)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);
        spherical.radius = (spherical.radius * scale)
            .clamp(self.limits.min_distance, self.limits.max_distance);

        self.camera.eye = self.target + spherical.to_offset();
        self.camera.look_at(self.target);
    }

    fn clamp_azimuth(&self, theta: f32) -> f32 {
        let (min, max) = (self.limits.min_azimuth, self.limits.max_azimuth);
        if !(min.is_finite() && max.is_finite()) {
            return theta;
        }
        // Wrap into (-PI, PI] so the range check is meaningful.
        let wrapped = (theta + PI).rem_euclid(TAU) - PI;
        wrapped.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::options::CameraOptions;

    const EPS: f32 = 1e-4;

    fn controller_at(eye: Vec3) -> OrbitController {
        let mut camera = Camera::from_options(&CameraOptions::default(), 1.0);
        camera.eye = eye;
        let mut orbit = OrbitController::new(camera, &OrbitOptions::default());
        orbit.set_target(Vec3::ZERO);
        orbit.update();
        orbit
    }

    #[test]
    fn spherical_round_trips_offsets() {
        let offset = Vec3::new(3.0, -2.0, 5.0);
        let back = Spherical::from_offset(offset).to_offset();
        assert!((back - offset).length() < EPS);
    }

    #[test]
    fn default_policy_locks_polar_angle() {
        let limits = OrbitOptions::default();
        assert_eq!(limits.min_polar, FRAC_PI_2);
        assert_eq!(limits.max_polar, FRAC_PI_2);
        assert!(limits.min_azimuth.is_infinite());
        assert!(limits.max_azimuth.is_infinite());
    }

    #[test]
    fn update_moves_eye_onto_locked_polar_angle() {
        let orbit = controller_at(Vec3::new(0.0, 6.0, 8.0));
        assert!((orbit.polar_angle() - FRAC_PI_2).abs() < EPS);
        // Radius is preserved while the eye drops to eye level.
        assert!((orbit.distance() - 10.0).abs() < EPS);
        assert!(orbit.camera.eye.y.abs() < EPS);
        assert_eq!(orbit.camera.target, Vec3::ZERO);
    }

    #[test]
    fn vertical_rotation_leaves_polar_angle_unchanged() {
        let mut orbit = controller_at(Vec3::new(0.0, 0.0, 10.0));
        let before = orbit.polar_angle();
        orbit.rotate(Vec2::new(0.0, 250.0), 600.0);
        assert!((orbit.polar_angle() - before).abs() < EPS);
        orbit.rotate(Vec2::new(0.0, -900.0), 600.0);
        assert!((orbit.polar_angle() - before).abs() < EPS);
    }

    #[test]
    fn horizontal_rotation_is_unbounded() {
        let mut orbit = controller_at(Vec3::new(0.0, 0.0, 10.0));
        // Half the viewport height is half a revolution.
        orbit.rotate(Vec2::new(300.0, 0.0), 600.0);
        assert!((orbit.camera.eye - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-3);
        orbit.rotate(Vec2::new(300.0, 0.0), 600.0);
        assert!((orbit.camera.eye - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-3);
    }

    #[test]
    fn finite_azimuth_limits_clamp() {
        let mut camera = Camera::from_options(&CameraOptions::default(), 1.0);
        camera.eye = Vec3::new(0.0, 0.0, 10.0);
        let limits = OrbitOptions {
            min_azimuth: -0.5,
            max_azimuth: 0.5,
            ..OrbitOptions::default()
        };
        let mut orbit = OrbitController::new(camera, &limits);
        orbit.set_target(Vec3::ZERO);
        orbit.rotate(Vec2::new(-100.0, 0.0), 600.0);
        assert!((orbit.azimuth_angle() - 0.5).abs() < EPS);
    }

    #[test]
    fn zoom_scales_distance() {
        let mut orbit = controller_at(Vec3::new(0.0, 0.0, 10.0));
        orbit.zoom(1.0);
        assert!((orbit.distance() - 9.5).abs() < EPS);
        orbit.zoom(-1.0);
        assert!((orbit.distance() - 10.0).abs() < EPS);
    }

    #[test]
    fn disabled_controller_ignores_input() {
        let mut orbit = controller_at(Vec3::new(0.0, 0.0, 10.0));
        orbit.enabled = false;
        let eye = orbit.camera.eye;
        orbit.rotate(Vec2::new(120.0, 40.0), 600.0);
        orbit.zoom(3.0);
        assert_eq!(orbit.camera.eye, eye);
    }

    #[test]
    fn zoom_can_be_turned_off() {
        let mut camera = Camera::from_options(&CameraOptions::default(), 1.0);
        camera.eye = Vec3::new(0.0, 0.0, 10.0);
        let limits = OrbitOptions {
            enable_zoom: false,
            ..OrbitOptions::default()
        };
        let mut orbit = OrbitController::new(camera, &limits);
        orbit.set_target(Vec3::ZERO);
        orbit.zoom(2.0);
        assert!((orbit.distance() - 10.0).abs() < EPS);
    }

    #[test]
    fn eye_on_target_does_not_produce_nan() {
        let orbit = controller_at(Vec3::ZERO);
        assert!(orbit.camera.eye.is_finite());
        assert!(orbit.camera.build_matrix().is_finite());
    }
}
