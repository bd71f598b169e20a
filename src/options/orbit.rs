use std::f32::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::input::MouseButton;

/// Orbit limits and sensitivities.
///
/// Angles are in radians. Infinite azimuth bounds (TOML `inf` / `-inf`)
/// leave horizontal rotation unbounded; the default polar range pins the
/// camera to an eye-level view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrbitOptions {
    /// Smallest polar angle (0 = looking straight down).
    pub min_polar: f32,
    /// Largest polar angle (PI = looking straight up).
    pub max_polar: f32,
    /// Smallest azimuth angle.
    pub min_azimuth: f32,
    /// Largest azimuth angle.
    pub max_azimuth: f32,
    /// Closest allowed eye distance from the target.
    pub min_distance: f32,
    /// Farthest allowed eye distance from the target.
    pub max_distance: f32,
    /// Whether the scroll wheel dollies the camera.
    pub enable_zoom: bool,
    /// Rotation sensitivity multiplier.
    pub rotate_speed: f32,
    /// Zoom sensitivity multiplier.
    pub zoom_speed: f32,
    /// Distance factor per unit of zoom (below 1 moves closer).
    pub zoom_base: f32,
    /// Button that orbits the camera while held.
    pub rotate_button: MouseButton,
}

impl Default for OrbitOptions {
    fn default() -> Self {
        Self {
            min_polar: FRAC_PI_2,
            max_polar: FRAC_PI_2,
            min_azimuth: f32::NEG_INFINITY,
            max_azimuth: f32::INFINITY,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            enable_zoom: true,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            zoom_base: 0.95,
            rotate_button: MouseButton::Right,
        }
    }
}

impl OrbitOptions {
    /// Copy with every range ordered and free of NaN, so clamping against
    /// it can never fail.
    ///
    /// NaN bounds fall back to the defaults; inverted ranges are swapped.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let defaults = Self::default();
        let pick = |value: f32, fallback: f32| {
            if value.is_nan() {
                fallback
            } else {
                value
            }
        };
        let ordered = |lo: f32, hi: f32| if lo <= hi { (lo, hi) } else { (hi, lo) };

        let (min_polar, max_polar) = ordered(
            pick(self.min_polar, defaults.min_polar),
            pick(self.max_polar, defaults.max_polar),
        );
        let (min_azimuth, max_azimuth) = ordered(
            pick(self.min_azimuth, defaults.min_azimuth),
            pick(self.max_azimuth, defaults.max_azimuth),
        );
        let (min_distance, max_distance) = ordered(
            pick(self.min_distance, defaults.min_distance).max(0.0),
            pick(self.max_distance, defaults.max_distance).max(0.0),
        );

        Self {
            min_polar,
            max_polar,
            min_azimuth,
            max_azimuth,
            min_distance,
            max_distance,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_defaults_are_unchanged() {
        let opts = OrbitOptions::default();
        assert_eq!(opts.normalized(), opts);
    }

    #[test]
    fn normalized_repairs_bad_ranges() {
        let opts = OrbitOptions {
            min_polar: 2.0,
            max_polar: 1.0,
            min_azimuth: f32::NAN,
            max_distance: -5.0,
            ..OrbitOptions::default()
        }
        .normalized();
        assert_eq!((opts.min_polar, opts.max_polar), (1.0, 2.0));
        assert_eq!(opts.min_azimuth, f32::NEG_INFINITY);
        assert_eq!((opts.min_distance, opts.max_distance), (0.0, 0.0));
    }
}
