//! Procedural obstacle placement
//!
//! Runs once per frame while playing. The policy is intentionally simple:
//! a warm-up stretch, a minimum gap, a per-frame coin toss at the level's
//! spawn rate and a difficulty-gated kind roll.

use rand::Rng;

use super::entity::{FinishLine, Obstacle, ObstacleKind};
use super::level::LevelProfile;
use super::state::Session;
use crate::consts::{FINISH_LINE_OFFSET, PLAYFIELD_WIDTH, SPAWN_OFFSET, SPAWN_WARMUP_DISTANCE};

/// What the spawner did this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnOutcome {
    Nothing,
    FinishLine,
    Obstacle(ObstacleKind),
}

/// Pick an obstacle kind from two independent draws in [0, 1)
///
/// `roll` escalates through the difficulty-gated kinds; `coin` upgrades a
/// remaining block to a spike half of the time.
pub fn select_kind(difficulty: u8, roll: f32, coin: f32) -> ObstacleKind {
    let mut kind = ObstacleKind::Block;
    if difficulty >= 3 && roll > 0.7 {
        kind = ObstacleKind::Spike;
    }
    if difficulty >= 5 && roll > 0.85 {
        kind = ObstacleKind::Saw { rotation: 0.0 };
    }
    if difficulty >= 7 && roll > 0.9 {
        kind = ObstacleKind::TripleSpike;
    }
    if kind == ObstacleKind::Block && coin < 0.5 {
        kind = ObstacleKind::Spike;
    }
    kind
}

/// Whether the newest obstacle has scrolled far enough from the right edge
pub fn gap_allows_spawn(obstacles: &[Obstacle], level: &LevelProfile) -> bool {
    obstacles
        .last()
        .is_none_or(|last| PLAYFIELD_WIDTH - last.pos.x > level.min_gap)
}

/// Run the spawn policy for one frame
///
/// The finish line appears once, in a frame of its own; obstacles keep
/// coming after it until the player crosses.
pub fn run<R: Rng + ?Sized>(session: &mut Session, rng: &mut R) -> SpawnOutcome {
    let distance = session.clock.distance;
    let level = session.level;

    if session.finish_line.is_none() && distance > level.length {
        session.finish_line = Some(FinishLine::new(PLAYFIELD_WIDTH + FINISH_LINE_OFFSET));
        return SpawnOutcome::FinishLine;
    }
    if distance < SPAWN_WARMUP_DISTANCE {
        return SpawnOutcome::Nothing;
    }
    if !gap_allows_spawn(&session.obstacles, &level) {
        return SpawnOutcome::Nothing;
    }
    if rng.random::<f32>() >= level.spawn_rate {
        return SpawnOutcome::Nothing;
    }

    let roll = rng.random::<f32>();
    let coin = rng.random::<f32>();
    let kind = select_kind(level.difficulty, roll, coin);
    session
        .obstacles
        .push(Obstacle::new(kind, PLAYFIELD_WIDTH + SPAWN_OFFSET));
    SpawnOutcome::Obstacle(kind)
}
