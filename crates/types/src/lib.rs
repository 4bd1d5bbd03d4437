//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, network view).
//!
//! # Tile Catalog
//!
//! Tiles are pure data: a display glyph, a display color and a point value.
//! A tile's identity is its position in the [`TileCatalog`] ([`TileId`]); the
//! catalog is built once from configuration and never changes afterwards.
//!
//! # Default Game
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIDTH` | 20 | Board columns |
//! | `DEFAULT_HEIGHT` | 20 | Board rows |
//! | `DEFAULT_TILE_POINTS` | 1 | Award for a tile without an explicit value |
//! | `HIDDEN_GLYPH` | `.` | Placeholder for unrevealed cells |
//!
//! # Examples
//!
//! ```
//! use tui_reveal_types::{Cursor, GameAction, TileCatalog, TileId, TileType};
//!
//! let catalog = TileCatalog::new(vec![
//!     TileType::new('*', "#ffff00", 1),
//!     TileType::new('X', "#88ff00", 2),
//! ]);
//! assert_eq!(catalog.len(), 2);
//! assert_eq!(catalog.get(TileId(1)).map(|t| t.glyph), Some('X'));
//!
//! assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
//! assert_eq!(Cursor::default(), Cursor::new(0, 0));
//! ```

/// Default board width in cells
pub const DEFAULT_WIDTH: u16 = 20;

/// Default board height in cells
pub const DEFAULT_HEIGHT: u16 = 20;

/// Points awarded by a tile type that does not configure its own value
pub const DEFAULT_TILE_POINTS: u32 = 1;

/// Glyph shown for cells that have not been hit yet
pub const HIDDEN_GLYPH: char = '.';

/// Glyph shown for revealed cells without a tile
pub const EMPTY_GLYPH: char = ' ';

/// Index of a tile type inside the [`TileCatalog`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u16);

impl TileId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A catalog entry: how a tile looks and what it is worth.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileType {
    /// Single display character
    pub glyph: char,
    /// Display color specifier, usually `#rrggbb`
    pub color: String,
    /// Points awarded on first hit
    pub points: u32,
}

impl TileType {
    pub fn new(glyph: char, color: impl Into<String>, points: u32) -> Self {
        Self {
            glyph,
            color: color.into(),
            points,
        }
    }
}

/// Ordered, immutable list of tile types.
///
/// Lookups are by [`TileId`]; an id outside the catalog yields `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TileCatalog {
    tiles: Vec<TileType>,
}

impl TileCatalog {
    pub fn new(tiles: Vec<TileType>) -> Self {
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, id: TileId) -> Option<&TileType> {
        self.tiles.get(id.index())
    }

    /// Point value of a tile, 0 for ids outside the catalog.
    pub fn points(&self, id: TileId) -> u32 {
        self.get(id).map(|t| t.points).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TileId, &TileType)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, t)| (TileId(i as u16), t))
    }

    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }
}

/// Cursor position on the board, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor {
    pub x: u16,
    pub y: u16,
}

impl Cursor {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Commands delivered by the terminal front end.
///
/// This is a closed set; raw key handling lives in the input crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move the cursor one row up
    MoveUp,
    /// Move the cursor one row down
    MoveDown,
    /// Move the cursor one column left
    MoveLeft,
    /// Move the cursor one column right
    MoveRight,
    /// Reveal the cell under the cursor
    Hit,
    /// Leave the game
    Quit,
}

impl GameAction {
    /// Parse action from string (case-insensitive camelCase names)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_reveal_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("hit"), Some(GameAction::Hit));
    /// assert_eq!(GameAction::from_str("MOVEUP"), Some(GameAction::MoveUp));
    /// assert_eq!(GameAction::from_str("rotate"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveup" => Some(GameAction::MoveUp),
            "movedown" => Some(GameAction::MoveDown),
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "hit" => Some(GameAction::Hit),
            "quit" => Some(GameAction::Quit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveUp => "moveUp",
            GameAction::MoveDown => "moveDown",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::Hit => "hit",
            GameAction::Quit => "quit",
        }
    }

    /// Cursor delta for movement actions.
    pub fn delta(&self) -> Option<(i32, i32)> {
        match self {
            GameAction::MoveUp => Some((0, -1)),
            GameAction::MoveDown => Some((0, 1)),
            GameAction::MoveLeft => Some((-1, 0)),
            GameAction::MoveRight => Some((1, 0)),
            GameAction::Hit | GameAction::Quit => None,
        }
    }
}

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Playing,
    /// Terminal: every non-empty cell has been revealed
    GameOver,
}
