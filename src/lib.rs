//! tui-reveal - terminal reveal-and-score grid game
//!
//! A board of hidden tiles is generated from a seed and a configurable tile
//! catalog. The player moves a cursor and hits cells; each tile pays its
//! points the first time it is revealed, and the game ends once every tile is
//! uncovered. A read-only network view lets others watch the game.
//!
//! # Architecture
//!
//! The workspace is split into focused crates, re-exported here:
//!
//! - [`types`]: shared value types (tiles, cursor, actions)
//! - [`core`]: board, generator, game state machine, snapshot gate, text renderer
//! - [`config`]: TOML configuration with environment overrides
//! - [`input`]: crossterm key events to game actions
//! - [`term`]: framebuffer game view and terminal renderer
//! - [`adapter`]: TCP/JSON network view over published snapshots
//!
//! The game loop is the single writer of the game state. After every change
//! it publishes an immutable snapshot through a [`core::SnapshotGate`], which
//! is the only state shared with the network view.

pub use tui_reveal_adapter as adapter;
pub use tui_reveal_config as config;
pub use tui_reveal_core as core;
pub use tui_reveal_input as input;
pub use tui_reveal_term as term;
pub use tui_reveal_types as types;
