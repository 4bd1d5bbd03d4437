//! Plain-text rendering of a board.
//!
//! Each cell takes three columns: ` g ` for a revealed glyph (space when the
//! cell is empty), ` . ` while hidden, and `[g]` under the cursor. A score line
//! follows the grid. Used by the network view; the terminal front end draws
//! its own styled framebuffer.

use std::fmt::Write;

use crate::board::{Board, Cell};
use crate::snapshot::GameSnapshot;
use crate::types::{Cursor, EMPTY_GLYPH, HIDDEN_GLYPH};

/// Glyph shown for a cell in its current state
pub fn cell_glyph(board: &Board, cell: &Cell) -> char {
    if !cell.is_revealed() {
        return HIDDEN_GLYPH;
    }
    cell.tile()
        .and_then(|id| board.catalog().get(id))
        .map(|t| t.glyph)
        .unwrap_or(EMPTY_GLYPH)
}

/// Render the board with the cursor marked, followed by the score line.
pub fn render(board: &Board, cursor: Cursor, score: u32) -> String {
    let width = board.width() as usize;
    let mut out = String::with_capacity((width * 3 + 1) * board.height() as usize + 16);

    for (y, row) in board.rows().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            let glyph = cell_glyph(board, cell);
            if x == cursor.x as usize && y == cursor.y as usize {
                out.push('[');
                out.push(glyph);
                out.push(']');
            } else {
                out.push(' ');
                out.push(glyph);
                out.push(' ');
            }
        }
        out.push('\n');
    }

    let _ = write!(out, "Points: {}", score);
    out
}

/// Render a published snapshot; terminal games get a trailing marker line.
pub fn render_snapshot(snap: &GameSnapshot) -> String {
    let mut out = render(&snap.board, snap.cursor, snap.score);
    if snap.game_over {
        out.push_str("\nGAME OVER");
    }
    out
}
