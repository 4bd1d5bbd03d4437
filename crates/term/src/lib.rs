//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It renders a
//! [`core::GameSnapshot`] into a simple framebuffer which is then flushed to
//! the terminal backend, instead of going through a widget toolkit.
//!
//! Goals:
//! - Keep `core` free of terminal concerns
//! - Draw from snapshots only, so the same frame can be produced anywhere
//! - Control the aspect ratio (2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_reveal_core as core;
pub use tui_reveal_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AdapterStatusView, GameView, Viewport};
pub use renderer::{encode_rows_into, TerminalRenderer};
