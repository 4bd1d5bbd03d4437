//! Error taxonomy for the game core.
//!
//! All failures are local validation failures reported to the caller. None of
//! them leaves the board or the published snapshot in a broken state.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The board can not be generated with these dimensions
    #[error("invalid board dimension {width}x{height}: both must be positive")]
    InvalidDimension { width: u16, height: u16 },

    /// A hit targeted a coordinate outside the board
    #[error("coordinate ({x}, {y}) is outside the board")]
    OutOfBounds { x: i32, y: i32 },

    /// The game reached its terminal state and accepts no further actions
    #[error("game is already over")]
    GameAlreadyOver,
}
