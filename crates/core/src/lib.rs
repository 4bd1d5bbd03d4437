//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the board model, hit resolution and the snapshot
//! hand-off used by the network view. It has **no dependencies** on
//! terminals, networking or I/O, and it never logs: every failure is returned
//! to the caller as a [`CoreError`].
//!
//! - **Deterministic**: the same seed and catalog always produce the same board
//! - **Single writer**: only [`GameState`] mutates the board
//! - **Shareable**: observers read immutable [`GameSnapshot`]s through a [`SnapshotGate`]
//!
//! # Module Structure
//!
//! - [`board`]: grid of cells with one-time reveal rewards
//! - [`generator`]: seeded board generation from a tile catalog
//! - [`game_state`]: cursor, score and the `Playing`/`GameOver` state machine
//! - [`gate`]: latest-snapshot slot shared between the game loop and readers
//! - [`render`]: plain-text rendering of a board, cursor and score
//! - [`rng`]: small LCG used by the generator
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tui_reveal_core::{GameState, SnapshotGate};
//! use tui_reveal_types::{GameAction, TileCatalog, TileType};
//!
//! let catalog = Arc::new(TileCatalog::new(vec![TileType::new('*', "#ffff00", 1)]));
//! let mut game = GameState::generate(3, 3, catalog, 7).unwrap();
//!
//! game.apply_action(GameAction::MoveRight).unwrap();
//! game.apply_action(GameAction::Hit).unwrap();
//!
//! let gate = SnapshotGate::new();
//! gate.publish(game.snapshot());
//! assert_eq!(gate.read().unwrap().score, game.score());
//! ```

pub mod board;
pub mod error;
pub mod game_state;
pub mod gate;
pub mod generator;
pub mod render;
pub mod rng;
pub mod snapshot;

pub use tui_reveal_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell};
pub use error::CoreError;
pub use game_state::{ActionOutcome, GameState};
pub use gate::SnapshotGate;
pub use generator::generate;
pub use render::{cell_glyph, render, render_snapshot};
pub use rng::SimpleRng;
pub use snapshot::GameSnapshot;
