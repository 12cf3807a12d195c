//! Key and pointer mapping
//!
//! Inputs are edge-triggered: one press yields at most one `Command`, and
//! key auto-repeat is dropped here before it reaches the simulation.

use crate::consts::MAX_LEVEL;
use crate::sim::{Command, GamePhase};

/// Map a `KeyboardEvent.key` value to a command for the current phase
pub fn command_for_key(key: &str, repeat: bool, phase: GamePhase) -> Option<Command> {
    if repeat {
        return None;
    }

    match key {
        " " | "ArrowUp" | "w" | "W" => action(phase),
        "Enter" => match phase {
            GamePhase::Playing => None,
            _ => action(phase),
        },
        "r" | "R" if phase == GamePhase::GameOver => Some(Command::Restart),
        "c" | "C" if phase == GamePhase::Start => Some(Command::OpenCustomize),
        "Escape" => match phase {
            GamePhase::LevelSelect | GamePhase::Customize => Some(Command::Back),
            GamePhase::GameOver | GamePhase::Win => Some(Command::OpenLevelSelect),
            _ => None,
        },
        _ if phase == GamePhase::LevelSelect => level_digit(key).map(Command::StartLevel),
        _ => None,
    }
}

/// A tap or click on the canvas
pub fn command_for_pointer(phase: GamePhase) -> Option<Command> {
    action(phase)
}

/// The single "primary action" of each phase
fn action(phase: GamePhase) -> Option<Command> {
    match phase {
        GamePhase::Playing => Some(Command::Jump),
        GamePhase::GameOver => Some(Command::Restart),
        GamePhase::Win => Some(Command::Continue),
        GamePhase::Start => Some(Command::OpenLevelSelect),
        GamePhase::LevelSelect | GamePhase::Customize => None,
    }
}

/// "1".."9" select that level, "0" selects level 10
fn level_digit(key: &str) -> Option<u8> {
    let digit = key.parse::<u8>().ok().filter(|_| key.len() == 1)?;
    let level = if digit == 0 { 10 } else { digit };
    (level <= MAX_LEVEL).then_some(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_keys_while_playing() {
        for key in [" ", "ArrowUp", "w", "W"] {
            assert_eq!(command_for_key(key, false, GamePhase::Playing), Some(Command::Jump));
        }
        assert_eq!(command_for_key("Enter", false, GamePhase::Playing), None);
    }

    #[test]
    fn test_auto_repeat_ignored() {
        assert_eq!(command_for_key(" ", true, GamePhase::Playing), None);
        assert_eq!(command_for_key("r", true, GamePhase::GameOver), None);
    }

    #[test]
    fn test_primary_action_per_phase() {
        assert_eq!(command_for_key(" ", false, GamePhase::GameOver), Some(Command::Restart));
        assert_eq!(command_for_key("Enter", false, GamePhase::Win), Some(Command::Continue));
        assert_eq!(command_for_pointer(GamePhase::Start), Some(Command::OpenLevelSelect));
        assert_eq!(command_for_pointer(GamePhase::LevelSelect), None);
    }

    #[test]
    fn test_phase_specific_keys() {
        assert_eq!(command_for_key("r", false, GamePhase::GameOver), Some(Command::Restart));
        assert_eq!(command_for_key("r", false, GamePhase::Playing), None);
        assert_eq!(command_for_key("c", false, GamePhase::Start), Some(Command::OpenCustomize));
        assert_eq!(command_for_key("Escape", false, GamePhase::Customize), Some(Command::Back));
        assert_eq!(
            command_for_key("Escape", false, GamePhase::Win),
            Some(Command::OpenLevelSelect)
        );
        assert_eq!(command_for_key("Escape", false, GamePhase::Playing), None);
    }

    #[test]
    fn test_level_digits() {
        let pick = |key| command_for_key(key, false, GamePhase::LevelSelect);
        assert_eq!(pick("1"), Some(Command::StartLevel(1)));
        assert_eq!(pick("9"), Some(Command::StartLevel(9)));
        assert_eq!(pick("0"), Some(Command::StartLevel(10)));
        assert_eq!(pick("+1"), None);
        assert_eq!(pick("x"), None);
        // Digits do nothing outside level select
        assert_eq!(command_for_key("3", false, GamePhase::Start), None);
    }
}
