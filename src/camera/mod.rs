//! Camera system for 3D scene viewing.
//!
//! Provides a perspective camera, an orbit controller with angle and
//! distance limits, and the initial framing of a loaded model.

/// Orbit controller managing rotation, zoom, and angle limits.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
/// Initial camera placement from a bounding box.
pub mod framing;

pub use controller::{OrbitController, Spherical};
pub use core::{Camera, CameraUniform};
pub use framing::{frame_bounds, framing_distance, Framing};
