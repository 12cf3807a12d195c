//! Entities that live inside a run
//!
//! Each entity owns its per-frame update. Drawing lives in
//! `renderer::scene` so the simulation stays free of rendering types.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::snap_to_quarter;

/// Linear RGBA color
pub type Rgba = [f32; 4];

/// Cosmetic outline of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Square,
    Circle,
    Triangle,
    Diamond,
    Hexagon,
    Star,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Square,
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Diamond,
        ShapeKind::Hexagon,
        ShapeKind::Star,
    ];
}

/// The player-controlled shape
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner; x never changes during a run
    pub pos: Vec2,
    pub vel_y: f32,
    pub size: f32,
    pub grounded: bool,
    /// Visual spin in degrees (collision ignores it)
    pub rotation: f32,
    pub color: Rgba,
    pub shape: ShapeKind,
    /// Set when the player has been blown into fragments
    pub exploded: bool,
}

impl Player {
    pub fn new(color: Rgba, shape: ShapeKind) -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, GROUND_Y - PLAYER_SIZE),
            vel_y: 0.0,
            size: PLAYER_SIZE,
            grounded: true,
            rotation: 0.0,
            color,
            shape,
            exploded: false,
        }
    }

    /// Y the player rests at when standing on the ground
    #[inline]
    pub fn rest_y(&self) -> f32 {
        GROUND_Y - self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Bottom-center, where jump dust is kicked up
    #[inline]
    pub fn foot(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size / 2.0, self.pos.y + self.size)
    }

    /// Start a jump if standing on the ground. Returns whether it happened.
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.vel_y = JUMP_IMPULSE;
        self.grounded = false;
        true
    }

    pub fn update(&mut self, dt_scale: f32) {
        self.vel_y += GRAVITY * dt_scale;
        self.pos.y += self.vel_y * dt_scale;

        let rest = self.rest_y();
        if self.pos.y >= rest {
            self.pos.y = rest;
            self.vel_y = 0.0;
            self.grounded = true;
            self.rotation = snap_to_quarter(self.rotation);
        } else {
            self.grounded = false;
            self.rotation += ROTATION_RATE * dt_scale;
        }
    }
}

/// Obstacle variants with their per-kind state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleKind {
    Block,
    Spike,
    TripleSpike,
    /// Spinning blade; rotation in degrees
    Saw { rotation: f32 },
}

impl ObstacleKind {
    /// Footprint, fixed per kind
    pub fn size(&self) -> Vec2 {
        match self {
            ObstacleKind::Block => Vec2::splat(BLOCK_SIZE),
            ObstacleKind::Spike => Vec2::new(SPIKE_WIDTH, SPIKE_HEIGHT),
            ObstacleKind::TripleSpike => Vec2::new(SPIKE_WIDTH * 3.0, SPIKE_HEIGHT),
            ObstacleKind::Saw { .. } => Vec2::splat(SAW_RADIUS * 2.0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ObstacleKind::Block => "block",
            ObstacleKind::Spike => "spike",
            ObstacleKind::TripleSpike => "triple_spike",
            ObstacleKind::Saw { .. } => "saw",
        }
    }
}

/// A hazard scrolling toward the player
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Fully scrolled off the left edge
    pub deleted: bool,
}

impl Obstacle {
    /// Place an obstacle at `x`, standing on the ground
    /// (saws are centered on the ground line instead)
    pub fn new(kind: ObstacleKind, x: f32) -> Self {
        let size = kind.size();
        let y = match kind {
            ObstacleKind::Saw { .. } => GROUND_Y - size.y / 2.0,
            _ => GROUND_Y - size.y,
        };
        Self {
            kind,
            pos: Vec2::new(x, y),
            deleted: false,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.kind.size()
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size() / 2.0
    }

    pub fn update(&mut self, speed: f32, dt_scale: f32) {
        self.pos.x -= speed * dt_scale;
        if let ObstacleKind::Saw { rotation } = &mut self.kind {
            *rotation = (*rotation + SAW_SPIN_RATE * dt_scale) % 360.0;
        }
        if self.pos.x + self.size().x < 0.0 {
            self.deleted = true;
        }
    }
}

/// Goal post spanning the full playfield height
#[derive(Debug, Clone)]
pub struct FinishLine {
    pub x: f32,
    pub width: f32,
}

impl FinishLine {
    pub fn new(x: f32) -> Self {
        Self {
            x,
            width: FINISH_LINE_WIDTH,
        }
    }

    pub fn update(&mut self, speed: f32, dt_scale: f32) {
        self.x -= speed * dt_scale;
    }
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Rgba,
    /// 0-1, decreases over time
    pub life: f32,
}

impl Particle {
    /// Random spark around `origin`, velocity scaled by `force`
    pub fn spark<R: Rng + ?Sized>(origin: Vec2, color: Rgba, force: f32, rng: &mut R) -> Self {
        Self {
            pos: origin,
            vel: Vec2::new(
                rng.random_range(-1.0..1.0) * force,
                rng.random_range(-1.0..0.25) * force,
            ),
            size: rng.random_range(2.0..6.0),
            color,
            life: 1.0,
        }
    }

    pub fn update(&mut self, dt_scale: f32) {
        self.pos += self.vel * dt_scale;
        self.vel.y += 0.15 * dt_scale;
        self.life -= PARTICLE_DECAY * dt_scale;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// One ninth of the player after an explosion
#[derive(Debug, Clone)]
pub struct CubeFragment {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Rgba,
    /// Degrees
    pub rotation: f32,
    pub spin: f32,
    /// Accumulated downward pull
    pub gravity: f32,
    pub life: f32,
}

impl CubeFragment {
    /// Break the player into a 3x3 grid of fragments flying outward
    pub fn explode<R: Rng + ?Sized>(player: &Player, rng: &mut R) -> Vec<CubeFragment> {
        let size = player.size / 3.0;
        let mut fragments = Vec::with_capacity(9);
        for row in 0..3 {
            for col in 0..3 {
                let offset = Vec2::new(col as f32 * size, row as f32 * size);
                let outward = Vec2::new(col as f32 - 1.0, row as f32 - 1.0);
                fragments.push(CubeFragment {
                    pos: player.pos + offset,
                    vel: Vec2::new(
                        outward.x * 3.0 + rng.random_range(-2.0..2.0),
                        outward.y * 2.0 - rng.random_range(3.0..8.0),
                    ),
                    size,
                    color: player.color,
                    rotation: player.rotation,
                    spin: rng.random_range(-10.0..10.0),
                    gravity: 0.0,
                    life: 1.0,
                });
            }
        }
        fragments
    }

    pub fn update(&mut self, dt_scale: f32) {
        self.gravity += FRAGMENT_GRAVITY * dt_scale;
        self.pos.x += self.vel.x * dt_scale;
        self.pos.y += (self.vel.y + self.gravity) * dt_scale;
        self.rotation += self.spin * dt_scale;
        self.life -= FRAGMENT_DECAY * dt_scale;

        // Skid along the floor instead of falling through it
        if self.pos.y + self.size > GROUND_Y {
            self.pos.y = GROUND_Y - self.size;
            self.vel.x *= 0.9;
            self.spin *= 0.8;
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const WHITE: Rgba = [1.0; 4];

    #[test]
    fn test_jump_from_ground() {
        let mut player = Player::new(WHITE, ShapeKind::Square);
        assert!(player.grounded);
        assert!(player.jump());
        assert_eq!(player.vel_y, JUMP_IMPULSE);
        assert!(!player.grounded);
        // Second press mid-air does nothing
        player.update(1.0);
        let vel = player.vel_y;
        assert!(!player.jump());
        assert_eq!(player.vel_y, vel);
    }

    #[test]
    fn test_landing_snaps_rotation() {
        let mut player = Player::new(WHITE, ShapeKind::Square);
        player.jump();
        let mut frames = 0;
        loop {
            player.update(1.0);
            frames += 1;
            if player.grounded || frames > 200 {
                break;
            }
        }
        assert!(player.grounded);
        assert_eq!(player.pos.y, player.rest_y());
        assert_eq!(player.rotation % 90.0, 0.0);
    }

    #[test]
    fn test_airborne_spin_scales_with_slow_motion() {
        let mut normal = Player::new(WHITE, ShapeKind::Square);
        let mut slow = normal.clone();
        normal.jump();
        slow.jump();
        normal.update(1.0);
        slow.update(SLOW_MOTION_FACTOR);
        assert!((normal.rotation - ROTATION_RATE).abs() < 1e-5);
        assert!((slow.rotation - ROTATION_RATE * SLOW_MOTION_FACTOR).abs() < 1e-5);
    }

    #[test]
    fn test_obstacle_geometry_per_kind() {
        let block = Obstacle::new(ObstacleKind::Block, 100.0);
        assert_eq!(block.pos.y + block.size().y, GROUND_Y);

        let triple = Obstacle::new(ObstacleKind::TripleSpike, 100.0);
        assert_eq!(triple.size().x, SPIKE_WIDTH * 3.0);

        let saw = Obstacle::new(ObstacleKind::Saw { rotation: 0.0 }, 100.0);
        assert_eq!(saw.center().y, GROUND_Y);
    }

    #[test]
    fn test_obstacle_marked_once_offscreen() {
        let mut obstacle = Obstacle::new(ObstacleKind::Spike, 10.0);
        obstacle.update(7.0, 1.0);
        assert!(!obstacle.deleted);
        for _ in 0..10 {
            obstacle.update(7.0, 1.0);
        }
        assert!(obstacle.deleted);
    }

    #[test]
    fn test_saw_spins() {
        let mut saw = Obstacle::new(ObstacleKind::Saw { rotation: 0.0 }, 500.0);
        saw.update(7.0, 1.0);
        assert_eq!(saw.kind, ObstacleKind::Saw { rotation: SAW_SPIN_RATE });
    }

    #[test]
    fn test_explosion_is_three_by_three() {
        let mut rng = Pcg32::seed_from_u64(7);
        let player = Player::new(WHITE, ShapeKind::Square);
        let fragments = CubeFragment::explode(&player, &mut rng);
        assert_eq!(fragments.len(), 9);
        for fragment in &fragments {
            assert_eq!(fragment.size, player.size / 3.0);
            assert!(fragment.pos.x >= player.pos.x);
            assert!(fragment.pos.x < player.pos.x + player.size);
        }
    }

    #[test]
    fn test_particle_life_strictly_decreases() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particle = Particle::spark(Vec2::ZERO, WHITE, 3.0, &mut rng);
        let mut last = particle.life;
        let mut updates = 0;
        while particle.is_alive() {
            particle.update(1.0);
            assert!(particle.life < last);
            last = particle.life;
            updates += 1;
        }
        // 50 steps of 0.02, give or take float rounding
        assert!((50..=51).contains(&updates));
    }

    #[test]
    fn test_fragment_life_strictly_decreases() {
        let mut rng = Pcg32::seed_from_u64(2);
        let player = Player::new(WHITE, ShapeKind::Square);
        let mut fragment = CubeFragment::explode(&player, &mut rng).remove(4);
        let mut last = fragment.life;
        while fragment.is_alive() {
            fragment.update(SLOW_MOTION_FACTOR);
            assert!(fragment.life < last);
            assert!(fragment.pos.y + fragment.size <= GROUND_Y);
            last = fragment.life;
        }
    }

    proptest! {
        #[test]
        fn prop_ground_clamp(
            y in -400.0f32..600.0,
            vel_y in -40.0f32..40.0,
            dt in prop_oneof![Just(1.0f32), Just(SLOW_MOTION_FACTOR)],
        ) {
            let mut player = Player::new(WHITE, ShapeKind::Square);
            player.pos.y = y;
            player.vel_y = vel_y;
            player.grounded = false;
            player.update(dt);
            prop_assert!(player.pos.y + player.size <= GROUND_Y);
            prop_assert_eq!(player.grounded, player.pos.y == player.rest_y());
        }
    }
}
