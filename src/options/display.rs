use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Window and background settings.
pub struct DisplayOptions {
    /// Clear color behind the model (linear RGB).
    pub background_color: [f32; 3],
    /// Native window title.
    pub title: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            background_color: [0.0, 0.0, 0.0],
            title: "orbitview".into(),
        }
    }
}
