//! Initial camera placement for a freshly loaded model.
//!
//! The distance formula uses `tan(fov * 2)`, not the textbook
//! `tan(fov / 2)`. Changing it changes how large every model appears on
//! load.

use glam::Vec3;

use crate::camera::controller::OrbitController;
use crate::scene::Aabb;

/// Camera distance that frames an object of the given maximum extent.
///
/// `(max_extent / 2) * tan(radians(fovy) * 2)`, made positive, then scaled
/// by `padding`.
pub fn framing_distance(max_extent: f32, fovy_degrees: f32, padding: f32) -> f32 {
    let fov = fovy_degrees.to_radians();
    (max_extent / 2.0 * (fov * 2.0).tan()).abs() * padding
}

/// Outcome of [`frame_bounds`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framing {
    /// Center of the framed box; also the new orbit target.
    pub center: Vec3,
    /// Distance written to the camera's z coordinate.
    pub distance: f32,
}

/// Place the camera so `bounds` fits in view.
///
/// Sets the eye's z coordinate to [`framing_distance`], aims the camera at
/// the box center, moves the orbit target there and lets the controller
/// re-apply its limits. Returns `None` (leaving the camera untouched) for an
/// empty box.
pub fn frame_bounds(
    orbit: &mut OrbitController,
    bounds: &Aabb,
    padding: f32,
) -> Option<Framing> {
    if bounds.is_empty() {
        return None;
    }

    let center = bounds.center();
    let distance =
        framing_distance(bounds.max_extent(), orbit.camera.fovy, padding);

    orbit.camera.eye.z = distance;
    orbit.camera.look_at(center);
    orbit.set_target(center);
    orbit.update();

    log::debug!(
        "framed bounds {:?}..{:?}: center {center}, distance {distance:.3}",
        bounds.min,
        bounds.max
    );

    Some(Framing { center, distance })
}
