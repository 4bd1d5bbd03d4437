//! Board tests - reveal rules, bounds and generation through the public API

use std::sync::Arc;

use tui_reveal::core::{generate, Board, CoreError};
use tui_reveal::types::{TileCatalog, TileId, TileType};

fn catalog() -> Arc<TileCatalog> {
    Arc::new(TileCatalog::new(vec![
        TileType::new('*', "#ffff00", 1),
        TileType::new('X', "#88ff00", 2),
        TileType::new('O', "#0088ff", 3),
    ]))
}

fn small_board() -> Board {
    // * X
    // _ O
    Board::from_tiles(
        2,
        2,
        catalog(),
        vec![Some(TileId(0)), Some(TileId(1)), None, Some(TileId(2))],
    )
    .unwrap()
}

#[test]
fn test_board_starts_fully_hidden() {
    let board = small_board();
    assert_eq!(board.width(), 2);
    assert_eq!(board.height(), 2);
    assert!(board.cells().iter().all(|c| !c.is_revealed()));
    assert_eq!(board.tile_count(), 3);
    assert_eq!(board.remaining(), 3);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = small_board();
    assert!(board.get(-1, 0).is_none());
    assert!(board.get(0, -1).is_none());
    assert!(board.get(2, 0).is_none());
    assert!(board.get(0, 2).is_none());
    assert!(board.get(1, 1).is_some());
}

#[test]
fn test_reveal_pays_once() {
    let mut board = small_board();
    assert_eq!(board.reveal(1, 1).unwrap(), 3);
    assert_eq!(board.reveal(1, 1).unwrap(), 0);
    assert_eq!(board.get(1, 1).unwrap().awarded(), 3);
    assert_eq!(board.revealed_tile_count(), 1);
}

#[test]
fn test_reveal_empty_cell_pays_nothing() {
    let mut board = small_board();
    assert_eq!(board.reveal(0, 1).unwrap(), 0);
    assert!(board.get(0, 1).unwrap().is_revealed());
    // Empty cells never count towards the tiles left to find.
    assert_eq!(board.remaining(), 3);
}

#[test]
fn test_reveal_out_of_bounds_is_an_error() {
    let mut board = small_board();
    assert_eq!(
        board.reveal(5, -2),
        Err(CoreError::OutOfBounds { x: 5, y: -2 })
    );
    assert!(board.cells().iter().all(|c| !c.is_revealed()));
}

#[test]
fn test_all_tiles_revealed_ignores_empty_cells() {
    let mut board = small_board();
    board.reveal(0, 0).unwrap();
    board.reveal(1, 0).unwrap();
    assert!(!board.all_tiles_revealed());
    board.reveal(1, 1).unwrap();
    assert!(board.all_tiles_revealed());
    assert!(!board.get(0, 1).unwrap().is_revealed());
}

#[test]
fn test_layout_length_must_match_dimensions() {
    let err = Board::from_tiles(3, 2, catalog(), vec![None; 5]).unwrap_err();
    assert_eq!(err, CoreError::InvalidDimension { width: 3, height: 2 });
}

#[test]
fn test_generation_is_deterministic() {
    let a = generate(20, 20, catalog(), 1234).unwrap();
    let b = generate(20, 20, catalog(), 1234).unwrap();
    assert_eq!(a, b);

    let c = generate(20, 20, catalog(), 1235).unwrap();
    assert_ne!(a.cells(), c.cells());
}

#[test]
fn test_generated_tiles_reference_the_catalog() {
    let board = generate(16, 9, catalog(), 7).unwrap();
    for cell in board.cells() {
        if let Some(id) = cell.tile() {
            assert!(board.catalog().get(id).is_some());
        }
        assert!(!cell.is_revealed());
    }
}

#[test]
fn test_zero_dimension_is_rejected() {
    assert!(matches!(
        generate(0, 4, catalog(), 1),
        Err(CoreError::InvalidDimension { .. })
    ));
    assert!(matches!(
        generate(4, 0, catalog(), 1),
        Err(CoreError::InvalidDimension { .. })
    ));
}
