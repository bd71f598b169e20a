use serde::{Deserialize, Serialize};

/// Platform-agnostic input events.
///
/// The viewer translates window events into these and feeds them to
/// [`SceneState::handle_input`](crate::scene::SceneState::handle_input).
///
/// # Example
///
/// ```
/// # use orbitview::input::{InputEvent, MouseButton};
/// let press = InputEvent::MouseButton {
///     button: MouseButton::Left,
///     pressed: true,
/// };
/// assert_ne!(press, InputEvent::PointerCancel);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute surface position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels, growing downward.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel (positive = zoom in).
    Scroll {
        /// Scroll amount (positive = zoom in, negative = zoom out).
        delta: f32,
    },
    /// The pointer left the surface or the window lost focus; any gesture
    /// in progress ends without a release.
    PointerCancel,
}

/// Platform-agnostic mouse button identifier.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [drag]
/// button = "left"
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

#[cfg(feature = "viewer")]
impl MouseButton {
    /// Map a winit button. Back, forward and extra buttons have no
    /// counterpart and are dropped.
    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(Self::Left),
            winit::event::MouseButton::Right => Some(Self::Right),
            winit::event::MouseButton::Middle => Some(Self::Middle),
            _ => None,
        }
    }
}
