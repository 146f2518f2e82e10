//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Moves are
//! discrete, so there is no repeat handling: one key press is one action.

pub mod map;

pub use tui_tiles_types as types;

pub use map::{handle_event, handle_key_event, should_quit};
