//! Platform abstraction layer
//!
//! Browser specifics stay in `main.rs`; this module holds the pure mapping
//! from raw key and pointer events to simulation commands.

pub mod input;

pub use input::{command_for_key, command_for_pointer};
