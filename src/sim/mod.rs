//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - One step per rendered frame, deltas scaled by the slow-motion factor
//! - Randomness only through the injected/seeded RNG
//! - Host time passed in, never read from a global clock
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod level;
pub mod phase;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Contact};
pub use entity::{CubeFragment, FinishLine, Obstacle, ObstacleKind, Particle, Player, Rgba, ShapeKind};
pub use level::{LEVELS, LevelProfile};
pub use phase::{Command, StartLevelError};
pub use state::{GameEvent, GamePhase, GameState, Session, Settlement, SimClock};
pub use tick::{FrameInput, autopilot, tick};
