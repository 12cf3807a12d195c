//! Level profiles
//!
//! Each level fixes the course length, scroll speed and how aggressively the
//! spawner places obstacles. The table is immutable at runtime.

use crate::consts::{MAX_LEVEL, MIN_LEVEL};

/// Difficulty parameters for one level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelProfile {
    pub id: u8,
    pub name: &'static str,
    /// Distance at which the finish line appears
    pub length: f32,
    /// Horizontal scroll speed (pixels per frame)
    pub speed: f32,
    /// Probability of spawning on an eligible frame
    pub spawn_rate: f32,
    /// Minimum horizontal gap between consecutive obstacles
    pub min_gap: f32,
    /// Gates obstacle variety (1-10)
    pub difficulty: u8,
}

pub const LEVELS: [LevelProfile; MAX_LEVEL as usize] = [
    LevelProfile { id: 1, name: "First Steps", length: 8000.0, speed: 7.0, spawn_rate: 0.02, min_gap: 400.0, difficulty: 1 },
    LevelProfile { id: 2, name: "Warm Up", length: 9000.0, speed: 7.5, spawn_rate: 0.025, min_gap: 400.0, difficulty: 2 },
    LevelProfile { id: 3, name: "Spike Alley", length: 10000.0, speed: 8.0, spawn_rate: 0.03, min_gap: 400.0, difficulty: 3 },
    LevelProfile { id: 4, name: "Rhythm", length: 11000.0, speed: 8.5, spawn_rate: 0.03, min_gap: 400.0, difficulty: 4 },
    LevelProfile { id: 5, name: "Saw Mill", length: 12000.0, speed: 9.0, spawn_rate: 0.035, min_gap: 420.0, difficulty: 5 },
    LevelProfile { id: 6, name: "Night Run", length: 13000.0, speed: 9.5, spawn_rate: 0.035, min_gap: 420.0, difficulty: 6 },
    LevelProfile { id: 7, name: "Triple Threat", length: 14000.0, speed: 10.0, spawn_rate: 0.04, min_gap: 430.0, difficulty: 7 },
    LevelProfile { id: 8, name: "Overdrive", length: 15000.0, speed: 10.5, spawn_rate: 0.04, min_gap: 440.0, difficulty: 8 },
    LevelProfile { id: 9, name: "Gauntlet", length: 16000.0, speed: 11.0, spawn_rate: 0.045, min_gap: 450.0, difficulty: 9 },
    LevelProfile { id: 10, name: "Final Dash", length: 18000.0, speed: 12.0, spawn_rate: 0.05, min_gap: 480.0, difficulty: 10 },
];

/// Look up a level by its 1-based id
pub fn level(id: u8) -> Option<&'static LevelProfile> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&id) {
        return None;
    }
    LEVELS.get((id - MIN_LEVEL) as usize)
}

/// The level after `id`, if any
pub fn next_level(id: u8) -> Option<&'static LevelProfile> {
    id.checked_add(1).and_then(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{JUMP_IMPULSE, GRAVITY, PLAYER_SIZE};

    #[test]
    fn test_table_ids_are_sequential() {
        for (i, profile) in LEVELS.iter().enumerate() {
            assert_eq!(profile.id as usize, i + 1);
            assert!((1..=10).contains(&profile.difficulty));
        }
    }

    #[test]
    fn test_level_one_profile() {
        let first = level(1).unwrap();
        assert_eq!(first.length, 8000.0);
        assert_eq!(first.speed, 7.0);
    }

    #[test]
    fn test_lookup_bounds() {
        assert!(level(0).is_none());
        assert!(level(11).is_none());
        assert_eq!(next_level(9).map(|l| l.id), Some(10));
        assert!(next_level(10).is_none());
        assert!(next_level(u8::MAX).is_none());
    }

    #[test]
    fn test_gaps_are_jumpable() {
        // Airtime in frames for a full jump, and the ground covered meanwhile
        let airtime = 2.0 * -JUMP_IMPULSE / GRAVITY;
        for profile in &LEVELS {
            let jump_span = airtime * profile.speed + PLAYER_SIZE;
            assert!(
                profile.min_gap > jump_span,
                "level {} gap {} too tight for jump span {}",
                profile.id,
                profile.min_gap,
                jump_span
            );
        }
    }
}
