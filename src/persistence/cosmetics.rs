//! Cosmetic catalog: player colors and background themes
//!
//! Progress stores indices into these tables.

use crate::sim::Rgba;

pub const PLAYER_COLORS: [Rgba; 8] = [
    [0.0, 0.9, 1.0, 1.0],  // Cyan
    [1.0, 0.2, 0.6, 1.0],  // Magenta
    [0.3, 1.0, 0.3, 1.0],  // Lime
    [1.0, 0.85, 0.1, 1.0], // Gold
    [1.0, 0.45, 0.1, 1.0], // Orange
    [0.6, 0.3, 1.0, 1.0],  // Violet
    [1.0, 1.0, 1.0, 1.0],  // White
    [1.0, 0.15, 0.15, 1.0], // Red
];

/// Colors for one background theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Background {
    pub name: &'static str,
    pub sky_top: Rgba,
    pub sky_bottom: Rgba,
    /// Parallax stripes
    pub stripe: Rgba,
    pub floor: Rgba,
    pub floor_line: Rgba,
}

pub const BACKGROUNDS: [Background; 4] = [
    Background {
        name: "Midnight",
        sky_top: [0.02, 0.02, 0.08, 1.0],
        sky_bottom: [0.08, 0.04, 0.2, 1.0],
        stripe: [0.2, 0.1, 0.4, 0.35],
        floor: [0.05, 0.03, 0.12, 1.0],
        floor_line: [0.0, 0.9, 1.0, 1.0],
    },
    Background {
        name: "Sunset",
        sky_top: [0.25, 0.05, 0.2, 1.0],
        sky_bottom: [0.9, 0.4, 0.2, 1.0],
        stripe: [1.0, 0.6, 0.3, 0.25],
        floor: [0.15, 0.05, 0.1, 1.0],
        floor_line: [1.0, 0.8, 0.3, 1.0],
    },
    Background {
        name: "Matrix",
        sky_top: [0.0, 0.05, 0.0, 1.0],
        sky_bottom: [0.0, 0.15, 0.05, 1.0],
        stripe: [0.1, 0.8, 0.2, 0.2],
        floor: [0.0, 0.08, 0.02, 1.0],
        floor_line: [0.2, 1.0, 0.3, 1.0],
    },
    Background {
        name: "Ocean",
        sky_top: [0.0, 0.1, 0.25, 1.0],
        sky_bottom: [0.0, 0.35, 0.55, 1.0],
        stripe: [0.4, 0.8, 1.0, 0.2],
        floor: [0.0, 0.08, 0.18, 1.0],
        floor_line: [0.4, 0.9, 1.0, 1.0],
    },
];

/// Palette color, falling back to the first entry
pub fn player_color(index: usize) -> Rgba {
    PLAYER_COLORS.get(index).copied().unwrap_or(PLAYER_COLORS[0])
}

/// Background theme, falling back to the first entry
pub fn background(index: usize) -> &'static Background {
    BACKGROUNDS.get(index).unwrap_or(&BACKGROUNDS[0])
}
