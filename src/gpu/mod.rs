//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, texture uploads, and the
//! bind group layout helpers shared by the model renderer.

/// Shared wgpu boilerplate helpers for layouts and uniform buffers.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth attachment and sampled texture helpers.
pub mod texture;
