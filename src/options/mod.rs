//! Centralized viewer options with TOML preset support.
//!
//! All tweakable settings (camera, orbit limits, drag, lighting, display,
//! startup assets) are consolidated here. Every section uses
//! `#[serde(default)]`, so a preset only needs the fields it changes.

mod assets;
mod camera;
mod display;
mod drag;
mod lighting;
mod orbit;

use std::path::Path;

pub use assets::AssetOptions;
pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use drag::DragOptions;
pub use lighting::LightingOptions;
pub use orbit::OrbitOptions;
use serde::{Deserialize, Serialize};

use crate::error::OrbitViewError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection and framing parameters.
    pub camera: CameraOptions,
    /// Orbit limits and sensitivities.
    pub orbit: OrbitOptions,
    /// Drag-to-move parameters.
    pub drag: DragOptions,
    /// Ambient lighting.
    pub lighting: LightingOptions,
    /// Window and background settings.
    pub display: DisplayOptions,
    /// Startup assets.
    pub assets: AssetOptions,
}

impl Options {
    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, OrbitViewError> {
        toml::from_str(content)
            .map_err(|e| OrbitViewError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, OrbitViewError> {
        let content = std::fs::read_to_string(path).map_err(OrbitViewError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), OrbitViewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrbitViewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(OrbitViewError::Io)?;
        }
        std::fs::write(path, content).map_err(OrbitViewError::Io)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::input::MouseButton;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[drag]
movement_scale = 0.25

[assets]
scene = "models/helmet.glb"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.drag.movement_scale, 0.25);
        assert_eq!(opts.drag.button, MouseButton::Left);
        assert_eq!(opts.assets.scene, "models/helmet.glb");
        assert_eq!(opts.assets.texture, "perfil2.png");
        // Everything else should be default
        assert_eq!(opts.camera.fovy, 75.0);
        assert_eq!(opts.orbit.min_polar, FRAC_PI_2);
    }

    #[test]
    fn infinite_azimuth_bounds_parse() {
        let toml_str = r"
[orbit]
min_azimuth = -inf
max_azimuth = inf
rotate_button = 'middle'
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.orbit.min_azimuth, f32::NEG_INFINITY);
        assert_eq!(opts.orbit.max_azimuth, f32::INFINITY);
        assert_eq!(opts.orbit.rotate_button, MouseButton::Middle);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[camera]\nfovy = \"wide\"").unwrap_err();
        assert!(matches!(err, OrbitViewError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!(
            "orbitview-options-{}",
            std::process::id()
        ));
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.lighting.ambient_intensity = 1.25;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        let _ = std::fs::remove_dir_all(&dir);
        assert_eq!(loaded, opts);
    }
}
