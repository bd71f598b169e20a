//! Rendering for the loaded model: GPU mesh storage and the textured mesh
//! pipeline.

pub mod mesh;
pub mod model_renderer;
pub(crate) mod pipeline_util;

pub use mesh::{GpuMesh, MaterialUniform, Vertex};
pub use model_renderer::{LightingUniform, ModelRenderer};
