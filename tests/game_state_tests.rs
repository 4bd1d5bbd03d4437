//! Game state tests - scenarios from a fixed seed and the state machine rules

use std::sync::Arc;

use tui_reveal::core::{ActionOutcome, CoreError, GameState};
use tui_reveal::types::{Cursor, GameAction, Phase, TileCatalog, TileType};

fn catalog() -> Arc<TileCatalog> {
    Arc::new(TileCatalog::new(vec![
        TileType::new('*', "#ffff00", 1),
        TileType::new('X', "#88ff00", 2),
        TileType::new('O', "#0088ff", 3),
    ]))
}

/// Seed 42 on a 3x3 board lays out:
///
/// ```text
/// X * O
/// * X *
/// X * _
/// ```
fn seed_42() -> GameState {
    GameState::generate(3, 3, catalog(), 42).unwrap()
}

#[test]
fn test_new_game_starts_at_origin() {
    let game = seed_42();
    assert_eq!(game.cursor(), Cursor::new(0, 0));
    assert_eq!(game.score(), 0);
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.board().tile_count(), 8);
}

#[test]
fn test_hit_center_scores_once() {
    let mut game = seed_42();
    assert_eq!(game.hit(1, 1).unwrap(), 2);
    assert_eq!(game.score(), 2);

    let revision = game.revision();
    assert_eq!(game.hit(1, 1).unwrap(), 0);
    assert_eq!(game.score(), 2);
    assert_eq!(game.revision(), revision);
}

#[test]
fn test_hit_out_of_bounds_changes_nothing() {
    let mut game = seed_42();
    let before = game.snapshot();
    assert_eq!(game.hit(3, 0), Err(CoreError::OutOfBounds { x: 3, y: 0 }));
    assert_eq!(game.hit(0, -1), Err(CoreError::OutOfBounds { x: 0, y: -1 }));
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_clearing_the_board_ends_the_game() {
    let mut game = seed_42();
    let mut total = 0;
    for y in 0..3 {
        for x in 0..3 {
            total += game.hit(x, y).unwrap();
        }
    }
    assert_eq!(total, 13);
    assert_eq!(game.score(), 13);
    assert!(game.check_terminal());
    assert_eq!(game.phase(), Phase::GameOver);
}

#[test]
fn test_check_terminal_is_false_while_tiles_remain() {
    let mut game = seed_42();
    game.hit(0, 0).unwrap();
    assert!(!game.check_terminal());
    assert!(!game.game_over());
}

#[test]
fn test_game_over_rejects_further_input() {
    let mut game = seed_42();
    for y in 0..3 {
        for x in 0..3 {
            game.hit(x, y).unwrap();
        }
    }
    game.check_terminal();
    let before = game.snapshot();

    assert_eq!(game.hit(0, 0), Err(CoreError::GameAlreadyOver));
    assert_eq!(game.move_cursor(1, 0), Err(CoreError::GameAlreadyOver));
    assert_eq!(
        game.apply_action(GameAction::MoveDown),
        Err(CoreError::GameAlreadyOver)
    );
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_empty_catalog_is_immediately_terminal() {
    let mut game =
        GameState::generate(4, 3, Arc::new(TileCatalog::default()), 9).unwrap();
    assert_eq!(game.board().tile_count(), 0);
    assert!(game.check_terminal());
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.hit(0, 0), Err(CoreError::GameAlreadyOver));
}

#[test]
fn test_empty_catalog_cells_award_nothing() {
    let mut game =
        GameState::generate(4, 3, Arc::new(TileCatalog::default()), 9).unwrap();
    for y in 0..3 {
        for x in 0..4 {
            assert_eq!(game.hit(x, y).unwrap(), 0);
        }
    }
    assert_eq!(game.score(), 0);
    assert!(game.check_terminal());
}

#[test]
fn test_empty_catalog_ends_on_first_hit_action() {
    let mut game =
        GameState::generate(2, 2, Arc::new(TileCatalog::default()), 1).unwrap();
    assert_eq!(
        game.apply_action(GameAction::Hit).unwrap(),
        ActionOutcome::Hit {
            points: 0,
            game_over: true
        }
    );
}

#[test]
fn test_cursor_stays_inside_board() {
    let mut game = GameState::generate(5, 4, catalog(), 3).unwrap();
    let moves = [
        GameAction::MoveLeft,
        GameAction::MoveUp,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::MoveDown,
    ];
    for step in 0..200 {
        let action = moves[(step * 7 + step / 3) % moves.len()];
        if let ActionOutcome::Moved(c) = game.apply_action(action).unwrap() {
            assert!(c.x < 5 && c.y < 4, "cursor left the board: {:?}", c);
        }
    }
}

#[test]
fn test_cursor_clamps_each_axis() {
    let mut game = GameState::generate(3, 3, catalog(), 42).unwrap();
    assert_eq!(game.move_cursor(-5, 1).unwrap(), Cursor::new(0, 1));
    assert_eq!(game.move_cursor(10, 10).unwrap(), Cursor::new(2, 2));
    assert_eq!(game.move_cursor(i32::MIN, i32::MAX).unwrap(), Cursor::new(0, 2));
}

#[test]
fn test_hit_action_uses_cursor() {
    let mut game = seed_42();
    game.apply_action(GameAction::MoveRight).unwrap();
    game.apply_action(GameAction::MoveRight).unwrap();
    assert_eq!(
        game.apply_action(GameAction::Hit).unwrap(),
        ActionOutcome::Hit {
            points: 3,
            game_over: false
        }
    );
}

#[test]
fn test_revision_tracks_observable_changes() {
    let mut game = seed_42();
    let r0 = game.revision();

    // Blocked move: nothing observable changed.
    game.apply_action(GameAction::MoveLeft).unwrap();
    assert_eq!(game.revision(), r0);

    game.apply_action(GameAction::MoveDown).unwrap();
    assert!(game.revision() > r0);

    let r1 = game.revision();
    game.apply_action(GameAction::Hit).unwrap();
    assert!(game.revision() > r1);
}

#[test]
fn test_snapshot_is_detached_from_game() {
    let mut game = seed_42();
    let snap = game.snapshot();
    game.hit(0, 0).unwrap();

    assert_eq!(snap.score, 0);
    assert!(!snap.board.get(0, 0).unwrap().is_revealed());
    assert_ne!(snap.revision, game.revision());

    let mut reused = snap.clone();
    game.snapshot_into(&mut reused);
    assert_eq!(reused, game.snapshot());
}
