//! Snapshot module - immutable copies of the game state for observers

use crate::board::Board;
use crate::types::Cursor;

/// Point-in-time copy of everything an observer may see.
///
/// This is a value, not a view: it holds its own copy of the cells and has no
/// link back to the live [`GameState`](crate::GameState).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Revision of the state this copy was taken from
    pub revision: u64,
    pub board: Board,
    pub cursor: Cursor,
    pub score: u32,
    pub game_over: bool,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over
    }

    /// Number of tiles revealed so far
    pub fn revealed(&self) -> usize {
        self.board.revealed_tile_count()
    }

    /// Number of tiles still hidden
    pub fn remaining(&self) -> usize {
        self.board.remaining()
    }
}
