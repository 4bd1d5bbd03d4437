//! Board generation from a tile catalog and a seed.
//!
//! Assignment policy: one draw per cell in row-major order from [`SimpleRng`].
//! With `n` catalog entries each draw picks uniformly from `n + 1` outcomes;
//! outcome `i < n` places tile `i`, outcome `n` leaves the cell empty. The same
//! seed and catalog always produce the same layout.

use std::sync::Arc;

use crate::board::Board;
use crate::error::CoreError;
use crate::rng::SimpleRng;
use crate::types::{TileCatalog, TileId};

/// Build a fresh, fully unrevealed board.
pub fn generate(
    width: u16,
    height: u16,
    catalog: Arc<TileCatalog>,
    seed: u32,
) -> Result<Board, CoreError> {
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidDimension { width, height });
    }

    let mut rng = SimpleRng::new(seed);
    let outcomes = catalog.len() as u32 + 1;
    let empty = catalog.len() as u32;
    let len = (width as usize) * (height as usize);

    let tiles = (0..len)
        .map(|_| {
            let r = rng.next_range(outcomes);
            (r != empty).then_some(TileId(r as u16))
        })
        .collect();

    Board::from_tiles(width, height, catalog, tiles)
}
