//! Mandala configuration
//!
//! One immutable value describes everything a render pass needs. The host app
//! owns the current config and hands copies to the renderer; nothing in the
//! engine mutates it.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complexity is a global density dial, clamped to this range
pub const COMPLEXITY_RANGE: (f32, f32) = (1.0, 3.0);

/// Full description of one mandala render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MandalaConfig {
    /// Petal count before per-layer complexity scaling
    pub petals: u32,
    /// Number of concentric layers
    pub layers: u32,
    /// Base hue in degrees on the color wheel
    pub base_hue: f32,
    /// Density dial in [1, 3]
    pub complexity: f32,
    /// Whole-pass rotation in degrees
    pub rotation: f32,
    /// Output surface width in pixels
    pub width: u32,
    /// Output surface height in pixels
    pub height: u32,
    /// Overlay: hex-packed circle lattice
    #[serde(default)]
    pub flower_of_life: bool,
    /// Overlay: logarithmic spiral polyline
    #[serde(default)]
    pub golden_spiral: bool,
    /// Overlay: recursive circle outlines
    #[serde(default)]
    pub fractal_mode: bool,
    /// Uniform radius multiplier, driven by the breathing oscillator
    #[serde(default = "default_pulse", skip_serializing_if = "is_default_pulse")]
    pub pulse_scale: f32,
}

fn default_pulse() -> f32 {
    1.0
}

fn is_default_pulse(v: &f32) -> bool {
    *v == 1.0
}

impl Default for MandalaConfig {
    fn default() -> Self {
        Self {
            petals: 8,
            layers: 5,
            base_hue: 180.0,
            complexity: 1.5,
            rotation: 0.0,
            width: 800,
            height: 800,
            flower_of_life: false,
            golden_spiral: false,
            fractal_mode: false,
            pulse_scale: 1.0,
        }
    }
}

impl MandalaConfig {
    /// True when there is anything to draw. Zero layers or petals means the
    /// pass is a no-op rather than a division by zero.
    pub fn is_drawable(&self) -> bool {
        self.petals >= 1 && self.layers >= 1 && self.width >= 1 && self.height >= 1
    }

    /// Copy with out-of-range numeric fields pulled back into their domains.
    /// Non-finite values fall back to defaults.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let finite = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
        Self {
            base_hue: finite(self.base_hue, defaults.base_hue).rem_euclid(360.0),
            complexity: finite(self.complexity, defaults.complexity)
                .clamp(COMPLEXITY_RANGE.0, COMPLEXITY_RANGE.1),
            rotation: finite(self.rotation, defaults.rotation),
            pulse_scale: finite(self.pulse_scale, 1.0).max(0.0),
            ..self.clone()
        }
    }

    /// Save as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&json).map_err(|e| e.to_string())
    }
}
