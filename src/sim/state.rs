//! Game state and core simulation types
//!
//! A `Session` owns everything that belongs to a single run and is thrown
//! away when the player leaves it. `GameState` wraps the session together
//! with the phase, the player's progress and the seeded RNG.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{CubeFragment, FinishLine, Obstacle, Particle, Player, Rgba, ShapeKind};
use super::level::LevelProfile;
use crate::consts::{FLOOR_TILE, PARALLAX_FACTOR};
use crate::persistence::Progress;

/// Current phase of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen
    Start,
    LevelSelect,
    /// Active run
    Playing,
    /// Player exploded; death animation plays out
    GameOver,
    /// Finish line reached
    Win,
    /// Shop / cosmetics screen (simulation suspended)
    Customize,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Start => "start",
            GamePhase::LevelSelect => "level_select",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "game_over",
            GamePhase::Win => "win",
            GamePhase::Customize => "customize",
        }
    }
}

/// Notifications for the host (presentation, audio, persistence)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    /// HUD values changed
    Hud { score: u32, level: u8, coins: u32 },
    MusicStart,
    MusicStop,
    /// Progress was updated and should be saved
    Commit(Settlement),
    /// A new level became available
    Unlocked { level: u8 },
}

/// Outcome of a finished run folded into progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub level: u8,
    pub score: u32,
    pub coins_earned: u32,
    pub new_high_score: bool,
    pub completed: bool,
}

/// Time and distance bookkeeping for a run
#[derive(Debug, Clone)]
pub struct SimClock {
    /// Total scroll since level start; never decreases
    pub distance: f32,
    /// Whole seconds survived
    pub score: u32,
    /// Multiplier on every per-frame delta
    pub slow_motion: f32,
    /// Host timestamp (seconds) of level start
    pub started_at: f64,
    /// Background parallax scroll
    pub background_offset: f32,
    /// Floor pattern scroll, wraps at one tile
    pub floor_offset: f32,
}

impl SimClock {
    pub fn new(now: f64) -> Self {
        Self {
            distance: 0.0,
            score: 0,
            slow_motion: 1.0,
            started_at: now,
            background_offset: 0.0,
            floor_offset: 0.0,
        }
    }

    /// Advance distance and background by `delta` scroll
    pub fn advance(&mut self, delta: f32) {
        self.distance += delta;
        self.background_offset += delta * PARALLAX_FACTOR;
    }

    pub fn advance_floor(&mut self, delta: f32) {
        self.floor_offset = (self.floor_offset + delta) % FLOOR_TILE;
    }

    /// Whole seconds since level start
    pub fn elapsed_secs(&self, now: f64) -> u32 {
        (now - self.started_at).max(0.0).floor() as u32
    }
}

/// Everything owned by a single run
#[derive(Debug, Clone)]
pub struct Session {
    pub level: LevelProfile,
    pub player: Player,
    /// Oldest first; the last entry is the most recent spawn
    pub obstacles: Vec<Obstacle>,
    pub finish_line: Option<FinishLine>,
    pub particles: Vec<Particle>,
    pub fragments: Vec<CubeFragment>,
    pub clock: SimClock,
    /// After death, the earliest host time a restart is accepted
    pub restart_at: Option<f64>,
}

impl Session {
    pub fn new(level: LevelProfile, color: Rgba, shape: ShapeKind, now: f64) -> Self {
        Self {
            level,
            player: Player::new(color, shape),
            obstacles: Vec::new(),
            finish_line: None,
            particles: Vec::new(),
            fragments: Vec::new(),
            clock: SimClock::new(now),
            restart_at: None,
        }
    }

    /// Emit `count` sparks at `origin`
    pub fn burst<R: Rng + ?Sized>(
        &mut self,
        origin: Vec2,
        count: usize,
        color: Rgba,
        force: f32,
        rng: &mut R,
    ) {
        self.particles
            .extend((0..count).map(|_| Particle::spark(origin, color, force, &mut *rng)));
    }

    /// Scroll obstacles and the finish line, dropping what left the screen
    pub fn update_course(&mut self, dt_scale: f32) {
        let speed = self.level.speed;
        for obstacle in &mut self.obstacles {
            obstacle.update(speed, dt_scale);
        }
        self.obstacles.retain(|o| !o.deleted);

        if let Some(finish) = &mut self.finish_line {
            finish.update(speed, dt_scale);
        }
    }

    /// Age particles and fragments, dropping the spent ones
    pub fn update_effects(&mut self, dt_scale: f32) {
        for particle in &mut self.particles {
            particle.update(dt_scale);
        }
        self.particles.retain(Particle::is_alive);

        for fragment in &mut self.fragments {
            fragment.update(dt_scale);
        }
        self.fragments.retain(CubeFragment::is_alive);
    }

    pub fn restart_allowed(&self, now: f64) -> bool {
        self.restart_at.is_some_and(|at| now >= at)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    /// Present while a run is playing or its aftermath is on screen
    pub session: Option<Session>,
    /// Level chosen most recently
    pub current_level: u8,
    pub progress: Progress,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, progress: Progress) -> Self {
        Self {
            phase: GamePhase::Start,
            session: None,
            current_level: progress.unlocked_levels,
            progress,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn emit_hud(&mut self) {
        let score = self.session.as_ref().map_or(0, |s| s.clock.score);
        self.emit(GameEvent::Hud {
            score,
            level: self.current_level,
            coins: self.progress.coins,
        });
    }

    /// Move to `to`, announcing the change. Sessions do not survive leaving
    /// the run screens.
    pub(crate) fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        if matches!(
            to,
            GamePhase::Start | GamePhase::LevelSelect | GamePhase::Customize
        ) {
            self.session = None;
        }
        log::info!("Phase {} -> {}", from.as_str(), to.as_str());
        self.emit(GameEvent::PhaseChanged { from, to });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::level::level;

    fn session() -> Session {
        Session::new(*level(1).unwrap(), [1.0; 4], ShapeKind::Square, 10.0)
    }

    #[test]
    fn test_new_session_is_clean() {
        let s = session();
        assert!(s.obstacles.is_empty());
        assert!(s.particles.is_empty());
        assert!(s.fragments.is_empty());
        assert!(s.finish_line.is_none());
        assert_eq!(s.clock.distance, 0.0);
        assert_eq!(s.clock.slow_motion, 1.0);
        assert!(s.player.grounded);
    }

    #[test]
    fn test_clock_elapsed_whole_seconds() {
        let clock = SimClock::new(10.0);
        assert_eq!(clock.elapsed_secs(10.9), 0);
        assert_eq!(clock.elapsed_secs(12.5), 2);
        // Host clock going backwards never underflows
        assert_eq!(clock.elapsed_secs(5.0), 0);
    }

    #[test]
    fn test_floor_offset_wraps() {
        let mut clock = SimClock::new(0.0);
        for _ in 0..100 {
            clock.advance_floor(7.0);
            assert!(clock.floor_offset < FLOOR_TILE);
        }
    }

    #[test]
    fn test_bursts_are_never_trimmed() {
        let mut s = session();
        let mut rng = Pcg32::seed_from_u64(1);
        s.burst(Vec2::ZERO, 10, [1.0; 4], 3.0, &mut rng);
        s.burst(Vec2::ZERO, 10, [1.0; 4], 3.0, &mut rng);
        assert_eq!(s.particles.len(), 20);
    }

    #[test]
    fn test_effects_pruned_once_spent() {
        let mut s = session();
        let mut rng = Pcg32::seed_from_u64(1);
        s.burst(Vec2::ZERO, 5, [1.0; 4], 3.0, &mut rng);
        s.fragments = CubeFragment::explode(&s.player, &mut rng);
        for _ in 0..49 {
            s.update_effects(1.0);
        }
        assert_eq!(s.particles.len(), 5);
        for _ in 0..3 {
            s.update_effects(1.0);
        }
        assert!(s.particles.is_empty());
        assert_eq!(s.fragments.len(), 9);
        for _ in 0..60 {
            s.update_effects(1.0);
        }
        assert!(s.fragments.is_empty());
    }

    #[test]
    fn test_restart_deadline() {
        let mut s = session();
        assert!(!s.restart_allowed(100.0));
        s.restart_at = Some(20.0 + RESTART_DELAY_SECS);
        assert!(!s.restart_allowed(21.0));
        assert!(s.restart_allowed(21.5));
    }

    #[test]
    fn test_phase_exit_drops_session() {
        let mut state = GameState::new(1, Progress::default());
        state.session = Some(session());
        state.set_phase(GamePhase::Playing);
        assert!(state.session.is_some());
        state.set_phase(GamePhase::LevelSelect);
        assert!(state.session.is_none());
        let events = state.drain_events();
        assert_eq!(events.len(), 2);
        assert!(state.drain_events().is_empty());
    }
}
