//! Shared utilities for the rendering engine.

/// Frame counting and FPS smoothing.
pub mod frame_timing;
