//! Dash Runner - A side-scrolling endless runner arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (physics, spawning, collisions, phases)
//! - `renderer`: Shape tessellation and WebGPU pipeline
//! - `platform`: Browser input mapping
//! - `persistence`: Player progress (coins, unlocks, cosmetics)
//! - `audio`: Music track collaborator

pub mod audio;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use persistence::Progress;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
///
/// Motion values are per simulation frame and get multiplied by the
/// slow-motion factor.
pub mod consts {
    /// Playfield dimensions (pixels, y grows downward)
    pub const PLAYFIELD_WIDTH: f32 = 1200.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
    /// Height of the floor strip below the ground line
    pub const FLOOR_HEIGHT: f32 = 100.0;
    /// Y coordinate the player and obstacles stand on
    pub const GROUND_Y: f32 = PLAYFIELD_HEIGHT - FLOOR_HEIGHT;
    /// Floor pattern repeat width
    pub const FLOOR_TILE: f32 = 60.0;
    /// Background scrolls slower than the floor
    pub const PARALLAX_FACTOR: f32 = 0.2;

    /// Player defaults
    pub const PLAYER_X: f32 = 200.0;
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const GRAVITY: f32 = 0.9;
    pub const JUMP_IMPULSE: f32 = -15.0;
    /// Degrees of spin per frame while airborne
    pub const ROTATION_RATE: f32 = 5.0;

    /// Obstacle geometry
    pub const BLOCK_SIZE: f32 = 40.0;
    pub const SPIKE_WIDTH: f32 = 40.0;
    pub const SPIKE_HEIGHT: f32 = 40.0;
    pub const SAW_RADIUS: f32 = 30.0;
    /// Degrees per frame
    pub const SAW_SPIN_RATE: f32 = 10.0;

    /// Spawning
    pub const SPAWN_WARMUP_DISTANCE: f32 = 600.0;
    pub const SPAWN_OFFSET: f32 = 50.0;
    pub const FINISH_LINE_OFFSET: f32 = 500.0;
    pub const FINISH_LINE_WIDTH: f32 = 20.0;

    /// Collision forgiveness
    pub const PLAYER_HITBOX_MARGIN: f32 = 6.0;
    pub const OBSTACLE_HITBOX_MARGIN: f32 = 6.0;
    pub const SAW_TOLERANCE: f32 = 5.0;

    /// Effects
    pub const PARTICLE_DECAY: f32 = 0.02;
    pub const FRAGMENT_DECAY: f32 = 0.01;
    pub const FRAGMENT_GRAVITY: f32 = 0.3;
    pub const JUMP_BURST: usize = 5;
    pub const DEATH_BURST: usize = 30;
    pub const VICTORY_BURST: usize = 40;

    /// Phase timing
    pub const SLOW_MOTION_FACTOR: f32 = 0.1;
    pub const RESTART_DELAY_SECS: f64 = 1.5;

    /// Level table bounds
    pub const MIN_LEVEL: u8 = 1;
    pub const MAX_LEVEL: u8 = 10;

    // Hitboxes must keep a positive extent.
    const _: () = assert!(PLAYER_HITBOX_MARGIN * 2.0 < PLAYER_SIZE);
    const _: () = assert!(OBSTACLE_HITBOX_MARGIN * 2.0 < BLOCK_SIZE);
    const _: () = assert!(OBSTACLE_HITBOX_MARGIN * 2.0 < SPIKE_HEIGHT);
    const _: () = assert!(SAW_TOLERANCE < SAW_RADIUS);
    const _: () = assert!(SAW_TOLERANCE * 2.0 < PLAYER_SIZE);
}

/// Snap an angle in degrees to the nearest multiple of 90
#[inline]
pub fn snap_to_quarter(degrees: f32) -> f32 {
    (degrees / 90.0).round() * 90.0
}
