//! Asynchronous model loading.
//!
//! A model is a glTF scene plus one override image applied to every mesh.
//! Bytes come from an [`AssetSource`]: the filesystem on native builds,
//! `fetch` in the browser. A texture that cannot be read or decoded is
//! replaced with plain white; a scene that cannot be read fails the load.

mod gltf_scene;
mod source;
mod texture;

#[cfg(feature = "web")]
mod fetch;

#[cfg(feature = "web")]
pub use fetch::FetchSource;
pub use gltf_scene::load_meshes;
pub use source::{
    decode_data_uri, read_referenced, resolve_relative, AssetSource, FsSource,
    MemorySource,
};
pub use texture::{decode_texture, fit_within, mip_chain};

use crate::error::OrbitViewError;
use crate::options::AssetOptions;
use crate::scene::{Model, TextureImage};

/// Load the scene and override texture named in `assets`.
pub async fn load_model<S: AssetSource>(
    source: &S,
    assets: &AssetOptions,
) -> Result<Model, OrbitViewError> {
    log::info!("loading {} with texture {}", assets.scene, assets.texture);
    let meshes = load_meshes(source, &assets.scene).await?;
    let texture =
        load_texture(source, &assets.texture, assets.flip_texture_y).await;
    let model = Model::new(meshes, texture);
    log::info!(
        "loaded {}: {} meshes, {} triangles",
        assets.scene,
        model.meshes().len(),
        model.triangle_count()
    );
    Ok(model)
}

async fn load_texture<S: AssetSource>(
    source: &S,
    uri: &str,
    flip_y: bool,
) -> TextureImage {
    let decoded = match source.read(uri).await {
        Ok(bytes) => decode_texture(&bytes, flip_y),
        Err(e) => Err(e),
    };
    match decoded {
        Ok(texture) => {
            log::debug!("{uri}: {}x{} texture", texture.width, texture.height);
            texture
        }
        Err(e) => {
            log::warn!("{uri}: {e}; using a white texture");
            TextureImage::white()
        }
    }
}
