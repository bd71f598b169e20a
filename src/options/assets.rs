use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Which files to load at startup.
pub struct AssetOptions {
    /// glTF scene (`.gltf` or `.glb`), relative to the asset root.
    pub scene: String,
    /// Image applied to every mesh, relative to the asset root.
    pub texture: String,
    /// Sample the texture upside down, matching images loaded outside the
    /// glTF pipeline.
    pub flip_texture_y: bool,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            scene: "wellblender/scene.gltf".into(),
            texture: "perfil2.png".into(),
            flip_texture_y: true,
        }
    }
}
