//! Player progress persistence
//!
//! - JSON in LocalStorage on the web, in-memory natively
//! - Every field defaults, so old or damaged saves still load
//! - Values are sanitized after loading

pub mod cosmetics;
pub mod progress;
pub mod storage;

pub use cosmetics::{BACKGROUNDS, Background, PLAYER_COLORS};
pub use progress::Progress;
