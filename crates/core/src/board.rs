//! Board module - manages the game grid
//!
//! The board is a `width x height` grid where each cell either references a
//! tile type from the catalog or is empty, and remembers whether it has been
//! revealed and how many points it paid out.
//! Uses a flat vector in row-major order (y * width + x).
//! Coordinates: (x, y) where x ranges 0..width (left to right), y ranges 0..height (top to bottom)

use std::sync::Arc;

use crate::error::CoreError;
use crate::types::{TileCatalog, TileId, TileType};

/// One grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    tile: Option<TileId>,
    revealed: bool,
    awarded: u32,
}

impl Cell {
    pub fn new(tile: Option<TileId>) -> Self {
        Self {
            tile,
            revealed: false,
            awarded: 0,
        }
    }

    pub fn tile(&self) -> Option<TileId> {
        self.tile
    }

    pub fn is_empty(&self) -> bool {
        self.tile.is_none()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Points paid out when this cell was revealed
    pub fn awarded(&self) -> u32 {
        self.awarded
    }
}

/// The game board using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    catalog: Arc<TileCatalog>,
}

impl Board {
    /// Create a board with every cell empty and unrevealed
    pub fn empty(width: u16, height: u16, catalog: Arc<TileCatalog>) -> Result<Self, CoreError> {
        Self::check_dimensions(width, height)?;
        let len = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); len],
            catalog,
        })
    }

    /// Create a board from a row-major tile layout.
    ///
    /// Fails with `InvalidDimension` if a dimension is zero or the layout does
    /// not hold exactly `width * height` entries.
    pub fn from_tiles(
        width: u16,
        height: u16,
        catalog: Arc<TileCatalog>,
        tiles: Vec<Option<TileId>>,
    ) -> Result<Self, CoreError> {
        Self::check_dimensions(width, height)?;
        if tiles.len() != (width as usize) * (height as usize) {
            return Err(CoreError::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: tiles.into_iter().map(Cell::new).collect(),
            catalog,
        })
    }

    fn check_dimensions(width: u16, height: u16) -> Result<(), CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimension { width, height });
        }
        Ok(())
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn catalog(&self) -> &Arc<TileCatalog> {
        &self.catalog
    }

    /// Check if (x, y) lies on the board
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|idx| &self.cells[idx])
    }

    /// Tile type of the cell at (x, y), None when out of bounds or empty
    pub fn tile_type(&self, x: i32, y: i32) -> Option<&TileType> {
        self.get(x, y)
            .and_then(|c| c.tile)
            .and_then(|id| self.catalog.get(id))
    }

    /// Reveal the cell at (x, y) and return the points it pays out.
    ///
    /// A cell pays out at most once: revealing it again returns 0.
    pub fn reveal(&mut self, x: i32, y: i32) -> Result<u32, CoreError> {
        let idx = self.index(x, y).ok_or(CoreError::OutOfBounds { x, y })?;
        let points = match self.cells[idx].tile {
            Some(id) => self.catalog.points(id),
            None => 0,
        };

        let cell = &mut self.cells[idx];
        if cell.revealed {
            return Ok(0);
        }
        cell.revealed = true;
        cell.awarded = points;
        Ok(points)
    }

    /// Get a reference to the internal cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    /// Number of cells holding a tile
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Number of revealed cells holding a tile
    pub fn revealed_tile_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| !c.is_empty() && c.revealed)
            .count()
    }

    /// Tiles still waiting to be hit
    pub fn remaining(&self) -> usize {
        self.tile_count() - self.revealed_tile_count()
    }

    /// True when every non-empty cell has been revealed
    pub fn all_tiles_revealed(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty() || c.revealed)
    }
}
