//! Phase transitions
//!
//! Discrete commands from the presentation layer and contacts reported by
//! the collision pass both end up here.

use std::fmt;

use super::entity::CubeFragment;
use super::level::{self, LevelProfile};
use super::state::{GameEvent, GamePhase, GameState, Session, Settlement};
use crate::consts::*;

/// Discrete, edge-triggered player intents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Jump,
    StartLevel(u8),
    Restart,
    Continue,
    OpenLevelSelect,
    OpenCustomize,
    Back,
}

/// Why a level could not be started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartLevelError {
    /// Not a level in the table
    OutOfRange(u8),
    /// Beyond the player's unlock ceiling
    Locked { level: u8, unlocked: u8 },
    /// Levels are only started from the level select screen
    WrongPhase(GamePhase),
}

impl fmt::Display for StartLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartLevelError::OutOfRange(id) => {
                write!(f, "level {} is outside {}..={}", id, MIN_LEVEL, MAX_LEVEL)
            }
            StartLevelError::Locked { level, unlocked } => {
                write!(f, "level {} is locked (unlocked up to {})", level, unlocked)
            }
            StartLevelError::WrongPhase(phase) => {
                write!(f, "cannot start a level from {}", phase.as_str())
            }
        }
    }
}

impl std::error::Error for StartLevelError {}

const DEATH_SPARK_COLOR: [f32; 4] = [1.0, 0.45, 0.2, 1.0];
const VICTORY_SPARK_COLOR: [f32; 4] = [1.0, 0.85, 0.2, 1.0];
const DUST_COLOR: [f32; 4] = [0.85, 0.85, 0.95, 0.8];

impl GameState {
    /// Dispatch one command against the current phase
    pub fn apply(&mut self, command: Command, now: f64) {
        match (self.phase, command) {
            (GamePhase::Playing, Command::Jump) => self.jump(),

            (GamePhase::Start, Command::OpenLevelSelect) => self.set_phase(GamePhase::LevelSelect),
            (GamePhase::Start, Command::OpenCustomize) => self.set_phase(GamePhase::Customize),
            (GamePhase::Customize | GamePhase::LevelSelect, Command::Back) => {
                self.set_phase(GamePhase::Start)
            }

            (GamePhase::LevelSelect, Command::StartLevel(id)) => {
                if let Err(e) = self.start_level(id, now) {
                    log::warn!("Start rejected: {}", e);
                }
            }

            (GamePhase::GameOver, Command::Restart | Command::Jump) => {
                self.restart(now);
            }
            (GamePhase::Win, Command::Continue | Command::Jump) => self.continue_run(now),
            (GamePhase::GameOver | GamePhase::Win, Command::OpenLevelSelect) => {
                self.set_phase(GamePhase::LevelSelect)
            }

            (phase, command) => {
                log::debug!("Ignored {:?} during {}", command, phase.as_str());
            }
        }
    }

    /// Validate and begin a level from the level select screen
    pub fn start_level(&mut self, id: u8, now: f64) -> Result<(), StartLevelError> {
        if self.phase != GamePhase::LevelSelect {
            return Err(StartLevelError::WrongPhase(self.phase));
        }
        let profile = level::level(id).ok_or(StartLevelError::OutOfRange(id))?;
        let unlocked = self.progress.unlocked_levels;
        if id > unlocked {
            return Err(StartLevelError::Locked {
                level: id,
                unlocked,
            });
        }
        self.begin_run(*profile, now);
        Ok(())
    }

    /// Fresh session for `profile`, straight into play
    fn begin_run(&mut self, profile: LevelProfile, now: f64) {
        let color = self.progress.player_color();
        let shape = self.progress.selected_shape;
        self.current_level = profile.id;
        self.session = Some(Session::new(profile, color, shape, now));
        log::info!(
            "Level {} \"{}\" started (length {}, speed {})",
            profile.id,
            profile.name,
            profile.length,
            profile.speed
        );
        self.set_phase(GamePhase::Playing);
        self.emit(GameEvent::MusicStart);
        self.emit_hud();
    }

    /// Jump if grounded, kicking up dust at the player's feet
    pub fn jump(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.player.jump() {
            return;
        }
        let foot = session.player.foot();
        session.burst(foot, JUMP_BURST, DUST_COLOR, 2.0, &mut self.rng);
        self.emit(GameEvent::MusicStart);
    }

    /// Player hit an obstacle. Only acts while playing, so repeated calls
    /// neither settle twice nor explode twice.
    pub fn game_over(&mut self, now: f64) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        session.clock.slow_motion = SLOW_MOTION_FACTOR;
        session.player.exploded = true;
        session.fragments = CubeFragment::explode(&session.player, &mut self.rng);
        let center = session.player.center();
        session.burst(center, DEATH_BURST, DEATH_SPARK_COLOR, 6.0, &mut self.rng);
        session.restart_at = Some(now + RESTART_DELAY_SECS);

        self.set_phase(GamePhase::GameOver);
        self.emit(GameEvent::MusicStop);
        self.settle(false);
    }

    /// Player crossed the finish line
    pub fn win(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let center = session.player.center();
        session.burst(center, VICTORY_BURST, VICTORY_SPARK_COLOR, 8.0, &mut self.rng);

        self.set_phase(GamePhase::Win);
        self.emit(GameEvent::MusicStop);

        let completed = self.current_level;
        if completed == self.progress.unlocked_levels && completed < MAX_LEVEL {
            self.progress.unlocked_levels += 1;
            log::info!("Level {} unlocked", self.progress.unlocked_levels);
            self.emit(GameEvent::Unlocked {
                level: self.progress.unlocked_levels,
            });
        }
        self.settle(true);
    }

    /// Replay the same level once the post-death delay has passed.
    /// Returns whether the restart happened.
    pub fn restart(&mut self, now: f64) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        if !session.restart_allowed(now) {
            log::debug!("Restart ignored, still in death delay");
            return false;
        }
        let profile = session.level;
        self.begin_run(profile, now);
        true
    }

    /// Move on after a win: next level, or back to level select after the last
    pub fn continue_run(&mut self, now: f64) {
        if self.phase != GamePhase::Win {
            return;
        }
        match level::next_level(self.current_level) {
            Some(next) => self.begin_run(*next, now),
            None => self.set_phase(GamePhase::LevelSelect),
        }
    }

    /// Fold the run's score into coins and high score
    fn settle(&mut self, completed: bool) {
        let score = self.session.as_ref().map_or(0, |s| s.clock.score);
        let coins_earned = coins_for(score, self.current_level, completed);
        let new_high_score = score > self.progress.high_score;

        self.progress.coins = self.progress.coins.saturating_add(coins_earned);
        if new_high_score {
            self.progress.high_score = score;
        }

        let settlement = Settlement {
            level: self.current_level,
            score,
            coins_earned,
            new_high_score,
            completed,
        };
        log::info!(
            "Settled level {}: score {}, +{} coins (total {}){}",
            settlement.level,
            score,
            coins_earned,
            self.progress.coins,
            if new_high_score { ", new high score" } else { "" }
        );
        self.emit(GameEvent::Commit(settlement));
        self.emit_hud();
    }
}

/// One coin per second survived, plus a completion bonus
pub fn coins_for(score: u32, level: u8, completed: bool) -> u32 {
    let bonus = if completed { level as u32 * 10 } else { 0 };
    score + bonus
}
