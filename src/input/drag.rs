//! Vertical drag-to-move for the loaded model.
//!
//! While a drag is active the orbit controller is disabled so the same
//! pointer motion never both orbits the camera and moves the model.

use crate::camera::OrbitController;
use crate::scene::Model;

/// Drag gesture state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    /// No drag in progress.
    Idle,
    /// A drag is in progress.
    Dragging {
        /// Pointer y at the previous event, in physical pixels.
        previous_y: f32,
    },
}

/// Turns vertical pointer motion into vertical model translation.
#[derive(Debug, Clone)]
pub struct DragHandler {
    state: DragState,
    movement_scale: f32,
}

impl DragHandler {
    /// Idle handler moving the model `movement_scale` world units per
    /// pixel.
    pub fn new(movement_scale: f32) -> Self {
        Self {
            state: DragState::Idle,
            movement_scale,
        }
    }

    /// Current state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Start a drag at pointer height `y` and suspend orbiting.
    ///
    /// A press while already dragging restarts from the new height.
    pub fn press(&mut self, y: f32, orbit: &mut OrbitController) {
        self.state = DragState::Dragging { previous_y: y };
        orbit.enabled = false;
    }

    /// Pointer moved to height `y`.
    ///
    /// While dragging, the model (if loaded) moves by the inverted, scaled
    /// delta: pointer down means model down on screen. Returns `true` when
    /// the model moved.
    pub fn pointer_moved(&mut self, y: f32, model: Option<&mut Model>) -> bool {
        let DragState::Dragging { previous_y } = self.state else {
            return false;
        };

        let delta_y = y - previous_y;
        self.state = DragState::Dragging { previous_y: y };

        match model {
            Some(model) if delta_y != 0.0 => {
                model.position.y -= delta_y * self.movement_scale;
                true
            }
            _ => false,
        }
    }

    /// End the drag and resume orbiting.
    pub fn release(&mut self, orbit: &mut OrbitController) {
        self.state = DragState::Idle;
        orbit.enabled = true;
    }

    /// End the drag without a release (pointer left the surface, focus
    /// lost). Orbiting resumes only if this handler had suspended it.
    pub fn cancel(&mut self, orbit: &mut OrbitController) {
        if self.is_dragging() {
            log::debug!("drag cancelled");
            self.release(orbit);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::camera::Camera;
    use crate::options::{CameraOptions, OrbitOptions};
    use crate::scene::model::test_support::quad_model;

    fn orbit() -> OrbitController {
        let camera = Camera::from_options(&CameraOptions::default(), 1.0);
        OrbitController::new(camera, &OrbitOptions::default())
    }

    #[test]
    fn drag_moves_model_down_by_scaled_delta() {
        let mut orbit = orbit();
        let mut model = quad_model([-1.0, -1.0], [1.0, 1.0]);
        let mut drag = DragHandler::new(0.1);

        drag.press(100.0, &mut orbit);
        assert!(drag.pointer_moved(130.0, Some(&mut model)));
        drag.release(&mut orbit);

        assert!((model.position.y - -3.0).abs() < 1e-5);
        assert_eq!(model.position.x, 0.0);
        assert_eq!(model.position.z, 0.0);
    }

    #[test]
    fn deltas_accumulate_across_moves() {
        let mut orbit = orbit();
        let mut model = quad_model([-1.0, -1.0], [1.0, 1.0]);
        model.position = Vec3::new(0.0, 2.0, 0.0);
        let mut drag = DragHandler::new(0.1);

        drag.press(50.0, &mut orbit);
        let _ = drag.pointer_moved(40.0, Some(&mut model));
        let _ = drag.pointer_moved(20.0, Some(&mut model));
        let _ = drag.pointer_moved(35.0, Some(&mut model));

        // Net pointer motion is -15 px, so the model rises 1.5.
        assert!((model.position.y - 3.5).abs() < 1e-5);
        assert_eq!(drag.state(), DragState::Dragging { previous_y: 35.0 });
    }

    #[test]
    fn orbit_is_suspended_only_while_dragging() {
        let mut orbit = orbit();
        let mut drag = DragHandler::new(0.1);
        assert!(orbit.enabled);

        drag.press(0.0, &mut orbit);
        assert!(!orbit.enabled);
        let _ = drag.pointer_moved(10.0, None);
        assert!(!orbit.enabled);

        drag.release(&mut orbit);
        assert!(orbit.enabled);
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn moves_while_idle_are_ignored() {
        let mut model = quad_model([-1.0, -1.0], [1.0, 1.0]);
        let mut drag = DragHandler::new(0.1);
        assert!(!drag.pointer_moved(500.0, Some(&mut model)));
        assert_eq!(model.position, Vec3::ZERO);
    }

    #[test]
    fn drag_without_model_tracks_pointer() {
        let mut orbit = orbit();
        let mut drag = DragHandler::new(0.1);
        drag.press(100.0, &mut orbit);
        assert!(!drag.pointer_moved(130.0, None));
        assert_eq!(drag.state(), DragState::Dragging { previous_y: 130.0 });
    }

    #[test]
    fn cancel_returns_to_idle_and_resumes_orbit() {
        let mut orbit = orbit();
        let mut drag = DragHandler::new(0.1);
        drag.press(10.0, &mut orbit);
        drag.cancel(&mut orbit);
        assert_eq!(drag.state(), DragState::Idle);
        assert!(orbit.enabled);
    }

    #[test]
    fn cancel_while_idle_leaves_orbit_alone() {
        let mut orbit = orbit();
        orbit.enabled = false;
        let mut drag = DragHandler::new(0.1);
        drag.cancel(&mut orbit);
        assert!(!orbit.enabled);
    }
}
