//! Coins, high score, unlocks and cosmetic selection
//!
//! Persisted to LocalStorage. The simulation only reads the unlock ceiling
//! and the selected cosmetics, and writes through run settlement.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::cosmetics::{self, BACKGROUNDS, PLAYER_COLORS};
use super::storage;
use crate::consts::{MAX_LEVEL, MIN_LEVEL};
use crate::sim::{Rgba, ShapeKind};

/// Everything the player has earned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub coins: u32,
    pub high_score: u32,
    /// Highest level that may be started
    pub unlocked_levels: u8,
    /// Indices into `PLAYER_COLORS`
    pub unlocked_colors: Vec<usize>,
    #[serde(deserialize_with = "known_shapes")]
    pub unlocked_shapes: Vec<ShapeKind>,
    /// Indices into `BACKGROUNDS`
    pub unlocked_backgrounds: Vec<usize>,
    pub selected_color: usize,
    #[serde(deserialize_with = "known_shape")]
    pub selected_shape: ShapeKind,
    pub selected_background: usize,
}

/// A shape name this build does not know becomes the default shape
fn known_shape<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ShapeKind, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value.clone()).unwrap_or_else(|_| {
        log::warn!("Unknown selected shape {}, using default", value);
        ShapeKind::default()
    }))
}

/// Unknown shape names are dropped from the unlock list
fn known_shapes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<ShapeKind>, D::Error> {
    let values = Vec::<Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            coins: 0,
            high_score: 0,
            unlocked_levels: MIN_LEVEL,
            unlocked_colors: vec![0],
            unlocked_shapes: vec![ShapeKind::Square],
            unlocked_backgrounds: vec![0],
            selected_color: 0,
            selected_shape: ShapeKind::Square,
            selected_background: 0,
        }
    }
}

impl Progress {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "dash_runner_progress";

    /// Parse saved JSON, falling back to a fresh profile on any error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Progress>(json) {
            Ok(mut progress) => {
                progress.sanitize();
                progress
            }
            Err(e) => {
                log::warn!("Discarding unreadable progress: {}", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    /// Clamp out-of-range values left by older or edited saves
    pub fn sanitize(&mut self) {
        self.unlocked_levels = self.unlocked_levels.clamp(MIN_LEVEL, MAX_LEVEL);

        self.unlocked_colors.retain(|&i| i < PLAYER_COLORS.len());
        if !self.unlocked_colors.contains(&0) {
            self.unlocked_colors.insert(0, 0);
        }
        if !self.unlocked_colors.contains(&self.selected_color) {
            self.selected_color = 0;
        }

        if !self.unlocked_shapes.contains(&ShapeKind::Square) {
            self.unlocked_shapes.insert(0, ShapeKind::Square);
        }
        if !self.unlocked_shapes.contains(&self.selected_shape) {
            self.selected_shape = ShapeKind::Square;
        }

        self.unlocked_backgrounds.retain(|&i| i < BACKGROUNDS.len());
        if !self.unlocked_backgrounds.contains(&0) {
            self.unlocked_backgrounds.insert(0, 0);
        }
        if !self.unlocked_backgrounds.contains(&self.selected_background) {
            self.selected_background = 0;
        }
    }

    pub fn player_color(&self) -> Rgba {
        cosmetics::player_color(self.selected_color)
    }

    pub fn background(&self) -> &'static cosmetics::Background {
        cosmetics::background(self.selected_background)
    }

    /// Load saved progress, or a fresh profile when there is none
    pub fn load() -> Self {
        match storage::read(Self::STORAGE_KEY) {
            Some(json) => {
                let progress = Self::from_json(&json);
                log::info!(
                    "Loaded progress: {} coins, level {} unlocked",
                    progress.coins,
                    progress.unlocked_levels
                );
                progress
            }
            None => {
                log::info!("No saved progress, starting fresh");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        let Some(json) = self.to_json() else { return };
        if storage::write(Self::STORAGE_KEY, &json) {
            log::info!("Progress saved ({} coins)", self.coins);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_safe() {
        let progress = Progress::default();
        assert_eq!(progress.unlocked_levels, 1);
        assert_eq!(progress.selected_shape, ShapeKind::Square);
        assert_eq!(progress.player_color(), PLAYER_COLORS[0]);
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        assert_eq!(Progress::from_json("not json"), Progress::default());
        assert_eq!(Progress::from_json(""), Progress::default());
    }

    #[test]
    fn test_unknown_shape_keeps_rest_of_save() {
        let unknown = r#"{
            "coins": 5,
            "unlocked_levels": 3,
            "unlocked_shapes": ["Square", "Dodecahedron", "Star"],
            "selected_shape": "Dodecahedron"
        }"#;
        let progress = Progress::from_json(unknown);
        assert_eq!(progress.coins, 5);
        assert_eq!(progress.unlocked_levels, 3);
        assert_eq!(progress.unlocked_shapes, vec![ShapeKind::Square, ShapeKind::Star]);
        assert_eq!(progress.selected_shape, ShapeKind::Square);

        let odd_type = Progress::from_json(r#"{"coins": 9, "selected_shape": 4}"#);
        assert_eq!(odd_type.coins, 9);
        assert_eq!(odd_type.selected_shape, ShapeKind::Square);
    }

    #[test]
    fn test_missing_fields_default() {
        let progress = Progress::from_json(r#"{"coins": 120}"#);
        assert_eq!(progress.coins, 120);
        assert_eq!(progress.unlocked_levels, 1);
        assert_eq!(progress.unlocked_colors, vec![0]);
    }

    #[test]
    fn test_out_of_range_values_sanitized() {
        let json = r#"{
            "unlocked_levels": 42,
            "unlocked_colors": [3, 99],
            "selected_color": 99,
            "unlocked_shapes": ["Star"],
            "selected_shape": "Hexagon",
            "selected_background": 7
        }"#;
        let progress = Progress::from_json(json);
        assert_eq!(progress.unlocked_levels, MAX_LEVEL);
        assert_eq!(progress.unlocked_colors, vec![0, 3]);
        assert_eq!(progress.selected_color, 0);
        assert_eq!(progress.unlocked_shapes, vec![ShapeKind::Square, ShapeKind::Star]);
        assert_eq!(progress.selected_shape, ShapeKind::Square);
        assert_eq!(progress.selected_background, 0);

        let zero = Progress::from_json(r#"{"unlocked_levels": 0}"#);
        assert_eq!(zero.unlocked_levels, MIN_LEVEL);
    }

    #[test]
    fn test_load_without_storage_starts_fresh() {
        assert_eq!(Progress::load(), Progress::default());
        // Dropped natively, must not panic
        Progress::default().save();
    }

    #[test]
    fn test_save_round_trip_keeps_selection() {
        let progress = Progress {
            coins: 300,
            high_score: 41,
            unlocked_levels: 4,
            unlocked_colors: vec![0, 2],
            selected_color: 2,
            ..Progress::default()
        };
        let json = progress.to_json().unwrap();
        assert_eq!(Progress::from_json(&json), progress);
    }
}
