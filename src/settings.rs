//! Front-end settings and preferences
//!
//! Persisted separately from the high score. Nothing here changes gameplay:
//! settings only shape effects, the HUD, and which input adapter feeds the
//! simulation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Which device drives the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputScheme {
    /// Touch/mouse: ship steps toward the pointer, taps fire
    #[default]
    Pointer,
    /// Keyboard: left/right, fire, fire-mode cycle
    Keys,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Explosion particles
    pub particles: bool,
    /// Score/wave/combo line
    pub show_hud: bool,
    /// Active input adapter
    pub input: InputScheme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            show_hud: true,
            input: InputScheme::Pointer,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match persistence::load_json(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::info!("Using default settings ({}): {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Save settings; failures are logged only
    pub fn save(&self, path: &Path) {
        match persistence::save_json(path, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(err) => log::warn!("Could not save settings: {}", err),
        }
    }
}
