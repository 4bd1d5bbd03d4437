//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. It is
//! independent of the renderer and of the game core; the game loop decides
//! what to do with each action.

pub mod map;

pub use tui_reveal_types as types;

pub use map::{handle_key_event, should_quit};
