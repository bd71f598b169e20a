//! Authoritative scene state: camera, orbit controller, drag handler and
//! the (optional) loaded model.
//!
//! Input mutates [`SceneState`] through [`SceneState::handle_input`];
//! rendering only reads it through [`SceneState::frame_uniforms`].

mod bounds;
pub(crate) mod model;

pub use bounds::Aabb;
use glam::{Mat4, Vec2};
pub use model::{MeshData, Model, TextureImage};

use crate::camera::{frame_bounds, Camera, CameraUniform, Framing, OrbitController};
use crate::input::{DragHandler, InputEvent, MouseButton};
use crate::options::Options;

/// Per-frame model transform, laid out for a uniform buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    /// Model-to-world matrix.
    pub model: [[f32; 4]; 4],
}

impl ModelUniform {
    /// Uniform for a model-to-world transform.
    pub fn from_transform(transform: Mat4) -> Self {
        Self {
            model: transform.to_cols_array_2d(),
        }
    }
}

/// Everything the renderer uploads for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameUniforms {
    /// View-projection and eye data.
    pub camera: CameraUniform,
    /// Model transform (identity until a model is loaded).
    pub model: ModelUniform,
}

/// The viewer's mutable world.
pub struct SceneState {
    orbit: OrbitController,
    drag: DragHandler,
    model: Option<Model>,
    viewport: (u32, u32),
    last_cursor: Option<Vec2>,
    orbit_rotating: bool,
    drag_button: MouseButton,
    rotate_button: MouseButton,
    framing_padding: f32,
}

impl SceneState {
    /// Empty scene with the camera at its configured start position.
    pub fn new(options: &Options, viewport: (u32, u32)) -> Self {
        let aspect = if viewport.1 > 0 {
            viewport.0 as f32 / viewport.1 as f32
        } else {
            1.0
        };
        let camera = Camera::from_options(&options.camera, aspect);
        Self {
            orbit: OrbitController::new(camera, &options.orbit),
            drag: DragHandler::new(options.drag.movement_scale),
            model: None,
            viewport,
            last_cursor: None,
            orbit_rotating: false,
            drag_button: options.drag.button,
            rotate_button: options.orbit.rotate_button,
            framing_padding: options.camera.framing_padding,
        }
    }

    /// The loaded model, if any.
    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    /// Current camera.
    pub fn camera(&self) -> &Camera {
        &self.orbit.camera
    }

    /// The orbit controller.
    pub fn orbit(&self) -> &OrbitController {
        &self.orbit
    }

    /// The drag handler.
    pub fn drag(&self) -> &DragHandler {
        &self.drag
    }

    /// Install the loaded model and frame the camera on it.
    ///
    /// Returns the framing applied, or `None` when the model has no
    /// vertices (the camera then stays where it was).
    pub fn attach_model(&mut self, model: Model) -> Option<Framing> {
        let bounds = model.world_bounds();
        self.model = Some(model);
        let framing = frame_bounds(&mut self.orbit, &bounds, self.framing_padding);
        if framing.is_none() {
            log::warn!("loaded model has no vertices; camera not framed");
        }
        framing
    }

    /// Apply one input event. Returns `true` when the camera or the model
    /// moved.
    ///
    /// The drag button drives the drag handler; the rotate button orbits
    /// the camera while held, unless a drag is in progress.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::CursorMoved { x, y } => {
                let position = Vec2::new(x, y);
                let previous = self.last_cursor.replace(position);
                if self.drag.is_dragging() {
                    return self.drag.pointer_moved(y, self.model.as_mut());
                }
                match previous {
                    Some(previous) if self.orbit_rotating => {
                        let before = self.orbit.camera.eye;
                        self.orbit
                            .rotate(position - previous, self.viewport.1 as f32);
                        self.orbit.camera.eye != before
                    }
                    _ => false,
                }
            }
            InputEvent::MouseButton { button, pressed } => {
                if button == self.drag_button {
                    if pressed {
                        let y = self.last_cursor.map_or(0.0, |c| c.y);
                        self.drag.press(y, &mut self.orbit);
                    } else {
                        self.drag.release(&mut self.orbit);
                    }
                } else if button == self.rotate_button {
                    self.orbit_rotating = pressed;
                }
                false
            }
            InputEvent::Scroll { delta } => {
                let before = self.orbit.distance();
                self.orbit.zoom(delta);
                self.orbit.distance() != before
            }
            InputEvent::PointerCancel => {
                self.drag.cancel(&mut self.orbit);
                self.orbit_rotating = false;
                self.last_cursor = None;
                false
            }
        }
    }

    /// Track a new viewport size. Zero dimensions are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = (width, height);
        self.orbit.resize(width, height);
    }

    /// Uniform values for the current state.
    pub fn frame_uniforms(&self) -> FrameUniforms {
        let transform = self
            .model
            .as_ref()
            .map_or(Mat4::IDENTITY, Model::transform);
        FrameUniforms {
            camera: CameraUniform::from_camera(&self.orbit.camera),
            model: ModelUniform::from_transform(transform),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use glam::Vec3;

    use super::model::test_support::quad_model;
    use super::*;
    use crate::camera::framing_distance;
    use crate::input::DragState;

    const EPS: f32 = 1e-4;

    fn scene() -> SceneState {
        SceneState::new(&Options::default(), (800, 600))
    }

    fn button(button: MouseButton, pressed: bool) -> InputEvent {
        InputEvent::MouseButton { button, pressed }
    }

    fn cursor(x: f32, y: f32) -> InputEvent {
        InputEvent::CursorMoved { x, y }
    }

    #[test]
    fn attaching_a_model_frames_the_camera() {
        let mut scene = scene();
        // 4 wide, 2 tall, centered on the eye's horizontal plane
        let framing = scene
            .attach_model(quad_model([-2.0, -1.0], [2.0, 1.0]))
            .unwrap();

        let expected = framing_distance(4.0, 75.0, 1.5);
        assert!((framing.distance - expected).abs() < EPS);
        assert!((scene.camera().eye.z - expected).abs() < EPS);
        assert_eq!(scene.orbit().target(), Vec3::ZERO);
        assert!((scene.orbit().polar_angle() - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn empty_model_leaves_camera_in_place() {
        let mut scene = scene();
        let before = scene.camera().clone();
        let framing =
            scene.attach_model(Model::new(Vec::new(), TextureImage::white()));
        assert!(framing.is_none());
        assert_eq!(*scene.camera(), before);
        assert!(scene.model().is_some());
    }

    #[test]
    fn vertical_rotation_keeps_eye_level() {
        let mut scene = scene();
        let _ = scene.attach_model(quad_model([-1.0, -1.0], [1.0, 1.0]));
        let _ = scene.handle_input(cursor(400.0, 300.0));
        let _ = scene.handle_input(button(MouseButton::Right, true));
        let _ = scene.handle_input(cursor(400.0, 100.0));
        let _ = scene.handle_input(cursor(400.0, 500.0));

        assert!((scene.orbit().polar_angle() - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn horizontal_rotation_orbits_the_target() {
        let mut scene = scene();
        let _ = scene.attach_model(quad_model([-1.0, -1.0], [1.0, 1.0]));
        let distance = scene.orbit().distance();
        let _ = scene.handle_input(cursor(400.0, 300.0));
        let _ = scene.handle_input(button(MouseButton::Right, true));
        assert!(scene.handle_input(cursor(500.0, 300.0)));

        assert!(scene.orbit().azimuth_angle().abs() > EPS);
        assert!((scene.orbit().distance() - distance).abs() < EPS);

        // released: further motion does nothing
        let _ = scene.handle_input(button(MouseButton::Right, false));
        assert!(!scene.handle_input(cursor(700.0, 300.0)));
    }

    #[test]
    fn drag_lowers_the_model() {
        let mut scene = scene();
        let _ = scene.attach_model(quad_model([-1.0, -1.0], [1.0, 1.0]));

        let _ = scene.handle_input(cursor(10.0, 100.0));
        let _ = scene.handle_input(button(MouseButton::Left, true));
        assert!(scene.handle_input(cursor(10.0, 130.0)));
        let _ = scene.handle_input(button(MouseButton::Left, false));

        let y = scene.model().unwrap().position.y;
        assert!((y - -3.0).abs() < EPS);
    }

    #[test]
    fn drag_does_not_orbit() {
        let mut scene = scene();
        let _ = scene.attach_model(quad_model([-1.0, -1.0], [1.0, 1.0]));
        let eye = scene.camera().eye;

        let _ = scene.handle_input(cursor(10.0, 100.0));
        let _ = scene.handle_input(button(MouseButton::Right, true));
        let _ = scene.handle_input(button(MouseButton::Left, true));
        let _ = scene.handle_input(cursor(200.0, 130.0));
        let _ = scene.handle_input(InputEvent::Scroll { delta: 3.0 });

        assert_eq!(scene.camera().eye, eye);
    }

    #[test]
    fn drag_before_load_is_harmless() {
        let mut scene = scene();
        let _ = scene.handle_input(cursor(10.0, 100.0));
        let _ = scene.handle_input(button(MouseButton::Left, true));
        assert!(!scene.handle_input(cursor(10.0, 130.0)));
        let _ = scene.handle_input(button(MouseButton::Left, false));
        assert!(scene.model().is_none());
        assert_eq!(scene.drag().state(), DragState::Idle);
    }

    #[test]
    fn orbit_suspended_during_drag() {
        let mut scene = scene();
        let _ = scene.attach_model(quad_model([-1.0, -1.0], [1.0, 1.0]));

        let _ = scene.handle_input(cursor(0.0, 0.0));
        let _ = scene.handle_input(button(MouseButton::Left, true));
        assert!(!scene.orbit().enabled);
        let _ = scene.handle_input(cursor(0.0, 40.0));
        assert!(!scene.orbit().enabled);
        let _ = scene.handle_input(button(MouseButton::Left, false));
        assert!(scene.orbit().enabled);

        let _ = scene.handle_input(button(MouseButton::Left, true));
        let _ = scene.handle_input(InputEvent::PointerCancel);
        assert!(scene.orbit().enabled);
        assert_eq!(scene.drag().state(), DragState::Idle);
    }

    #[test]
    fn scroll_zooms_in() {
        let mut scene = scene();
        let _ = scene.attach_model(quad_model([-1.0, -1.0], [1.0, 1.0]));
        let before = scene.orbit().distance();
        assert!(scene.handle_input(InputEvent::Scroll { delta: 1.0 }));
        assert!((scene.orbit().distance() - before * 0.95).abs() < EPS);
    }

    #[test]
    fn frame_uniforms_are_idempotent() {
        let mut scene = scene();
        let _ = scene.attach_model(quad_model([-1.0, -1.0], [1.0, 1.0]));
        let _ = scene.handle_input(cursor(0.0, 0.0));
        let _ = scene.handle_input(button(MouseButton::Left, true));
        let _ = scene.handle_input(cursor(0.0, 25.0));

        let camera = scene.camera().clone();
        let first = scene.frame_uniforms();
        let second = scene.frame_uniforms();
        assert_eq!(first, second);
        assert_eq!(*scene.camera(), camera);
        assert!((first.model.model[3][1] - -2.5).abs() < EPS);
    }

    #[test]
    fn frame_uniforms_without_model_use_identity() {
        let uniforms = scene().frame_uniforms();
        assert_eq!(uniforms.model.model, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn resize_updates_aspect_and_ignores_zero() {
        let mut scene = scene();
        scene.resize(1000, 500);
        assert!((scene.camera().aspect - 2.0).abs() < EPS);
        scene.resize(0, 500);
        assert!((scene.camera().aspect - 2.0).abs() < EPS);
    }
}
