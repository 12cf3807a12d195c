//! Per-frame simulation step
//!
//! The host calls `tick` exactly once per rendered frame with the commands
//! queued since the previous frame and its current timestamp in seconds.

use super::collision::{self, Contact};
use super::phase::Command;
use super::spawner::{self, SpawnOutcome};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Commands queued for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub commands: Vec<Command>,
}

impl FrameInput {
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &FrameInput, now: f64) {
    for &command in &input.commands {
        state.apply(command, now);
    }

    match state.phase {
        GamePhase::Playing => step_playing(state, now),
        GamePhase::GameOver => step_game_over(state, now),
        GamePhase::Win => step_win(state),
        GamePhase::Start | GamePhase::LevelSelect | GamePhase::Customize => {}
    }
}

fn step_playing(state: &mut GameState, now: f64) {
    let (contact, score_changed) = {
        let Some(session) = state.session.as_mut() else {
            return;
        };
        let dt = session.clock.slow_motion;
        let scroll = session.level.speed * dt;

        let score = session.clock.elapsed_secs(now);
        let score_changed = score != session.clock.score;
        session.clock.score = score;

        session.player.update(dt);
        session.clock.advance(scroll);
        match spawner::run(session, &mut state.rng) {
            SpawnOutcome::Nothing => {}
            SpawnOutcome::FinishLine => {
                log::debug!("Finish line placed (distance {:.0})", session.clock.distance);
            }
            SpawnOutcome::Obstacle(kind) => {
                log::debug!("Spawned {} at distance {:.0}", kind.name(), session.clock.distance);
            }
        }
        session.update_course(dt);
        session.update_effects(dt);
        session.clock.advance_floor(scroll);

        let contact = collision::detect(
            &session.player,
            &session.obstacles,
            session.finish_line.as_ref(),
        );
        (contact, score_changed)
    };

    if score_changed {
        state.emit_hud();
    }

    match contact {
        Contact::None => {}
        Contact::Finish => state.win(),
        Contact::Obstacle(_) => state.game_over(now),
    }
}

/// Death animation: the course drifts on in slow motion, nothing spawns
fn step_game_over(state: &mut GameState, now: f64) {
    let Some(session) = state.session.as_mut() else {
        return;
    };
    if session.restart_allowed(now) {
        session.clock.slow_motion = 1.0;
    }
    let dt = session.clock.slow_motion;

    if !session.player.exploded {
        session.player.update(dt);
    }
    session.update_course(dt);
    session.update_effects(dt);
}

/// Victory: only the celebration keeps moving
fn step_win(state: &mut GameState) {
    let Some(session) = state.session.as_mut() else {
        return;
    };
    session.update_effects(1.0);
}

/// Simple demo driver: jump when the next hazard is close enough to clear
pub fn autopilot(state: &GameState) -> Option<Command> {
    if state.phase != GamePhase::Playing {
        return None;
    }
    let session = state.session.as_ref()?;
    let player = &session.player;
    if !player.grounded {
        return None;
    }
    let front = player.pos.x + player.size;
    let window = session.level.speed * 8.0;
    session
        .obstacles
        .iter()
        .any(|o| {
            let ahead = o.pos.x - front;
            (0.0..=window).contains(&ahead)
        })
        .then_some(Command::Jump)
}
