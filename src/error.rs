//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the orbitview crate.
#[derive(Debug)]
pub enum OrbitViewError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Failed to fetch or parse the glTF scene.
    AssetLoad(String),
    /// Failed to decode the override texture.
    TextureDecode(image::ImageError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn the background loader thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for OrbitViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::AssetLoad(msg) => write!(f, "asset load error: {msg}"),
            Self::TextureDecode(e) => {
                write!(f, "texture decode error: {e}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for OrbitViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::TextureDecode(e) => Some(e),
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for OrbitViewError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for OrbitViewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<image::ImageError> for OrbitViewError {
    fn from(e: image::ImageError) -> Self {
        Self::TextureDecode(e)
    }
}

impl From<gltf::Error> for OrbitViewError {
    fn from(e: gltf::Error) -> Self {
        Self::AssetLoad(e.to_string())
    }
}
