use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Scene lighting. The scene is lit by a single ambient light.
pub struct LightingOptions {
    /// Linear RGB color of the ambient light.
    pub ambient_color: [f32; 3],
    /// Ambient light intensity. Diffuse response is `albedo * color *
    /// intensity / PI`.
    pub ambient_intensity: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 2.0,
        }
    }
}
