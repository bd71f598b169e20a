use serde::{Deserialize, Serialize};

use crate::input::MouseButton;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Drag-to-move parameters.
pub struct DragOptions {
    /// World units the model moves per pixel of vertical pointer motion.
    pub movement_scale: f32,
    /// Button that starts a drag.
    pub button: MouseButton,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            movement_scale: 0.1,
            button: MouseButton::Left,
        }
    }
}
