//! Input handling: platform-agnostic event types and the drag state
//! machine.

/// Vertical drag-to-move state machine.
pub mod drag;
/// Platform-agnostic input events.
pub mod event;

pub use drag::{DragHandler, DragState};
pub use event::{InputEvent, MouseButton};
