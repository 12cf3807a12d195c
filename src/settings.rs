//! Game settings and preferences
//!
//! Read from LocalStorage, separately from progress. The page owns the
//! stored value; the game only loads it.

use serde::Deserialize;

use crate::persistence::storage;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
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

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 60,
            QualityPreset::Medium => 250,
            QualityPreset::High => 1000,
        }
    }

    /// Circle tessellation for saws and round player shapes
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 12,
            QualityPreset::Medium => 24,
            QualityPreset::High => 48,
        }
    }

    /// Whether to draw the glow halo around the player
    pub fn glow_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (jump dust, explosions, victory)
    pub particles: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            master_volume: 0.8,
            music_volume: 0.7,
            mute_on_blur: true,
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

    /// Volume handed to the music track
    pub fn effective_music_volume(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }

    /// Parse saved JSON, falling back to defaults on any error
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Discarding unreadable settings: {}", e);
            Self::default()
        })
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "dash_runner_settings";

    pub fn load() -> Self {
        match storage::read(Self::STORAGE_KEY) {
            Some(json) => {
                let settings = Self::from_json(&json);
                log::info!("Loaded settings ({} quality)", settings.quality.as_str());
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particles_toggle_zeroes_cap() {
        let mut settings = Settings::from_preset(QualityPreset::High);
        assert_eq!(settings.max_particles(), 1000);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_preset_names_round_trip_through_json() {
        for preset in [QualityPreset::Low, QualityPreset::Medium, QualityPreset::High] {
            let json = format!(r#"{{"quality": "{}"}}"#, preset.as_str());
            assert_eq!(Settings::from_json(&json).quality, preset);
        }
    }

    #[test]
    fn test_unknown_preset_discards_settings() {
        assert_eq!(Settings::from_json(r#"{"quality": "Ultra"}"#), Settings::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"quality": "Low"}"#);
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(settings.particles);
        assert_eq!(Settings::from_json("{oops"), Settings::default());
    }
}
