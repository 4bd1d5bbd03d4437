//! Game state module - the interaction state machine
//!
//! `GameState` is the single writer of cursor, score and reveal state. It owns
//! the board exclusively; other threads only ever see [`GameSnapshot`] values.
//!
//! States: `Playing` (initial) and `GameOver` (terminal). Once the game is over
//! every mutating operation fails with [`CoreError::GameAlreadyOver`] and
//! leaves the state untouched.

use std::sync::Arc;

use crate::board::Board;
use crate::error::CoreError;
use crate::generator::generate;
use crate::snapshot::GameSnapshot;
use crate::types::{Cursor, GameAction, Phase, TileCatalog};

/// Result of applying one [`GameAction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Cursor position after a move (possibly unchanged at a boundary)
    Moved(Cursor),
    /// Points awarded by a hit and whether it ended the game
    Hit { points: u32, game_over: bool },
    /// The player asked to leave; nothing was mutated
    Quit,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    cursor: Cursor,
    score: u32,
    phase: Phase,
    seed: u32,
    /// Monotonic counter, bumped on every observable change.
    revision: u64,
}

impl GameState {
    /// Wrap an existing board; cursor at (0, 0), score 0.
    pub fn new(board: Board, seed: u32) -> Self {
        Self {
            board,
            cursor: Cursor::default(),
            score: 0,
            phase: Phase::Playing,
            seed,
            revision: 0,
        }
    }

    /// Generate a board and start a game on it
    pub fn generate(
        width: u16,
        height: u16,
        catalog: Arc<TileCatalog>,
        seed: u32,
    ) -> Result<Self, CoreError> {
        Ok(Self::new(generate(width, height, catalog, seed)?, seed))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn ensure_playing(&self) -> Result<(), CoreError> {
        match self.phase {
            Phase::Playing => Ok(()),
            Phase::GameOver => Err(CoreError::GameAlreadyOver),
        }
    }

    /// Move the cursor, clamping each axis to the board.
    ///
    /// Pushing against an edge is not an error; that axis just stays put.
    pub fn move_cursor(&mut self, dx: i32, dy: i32) -> Result<Cursor, CoreError> {
        self.ensure_playing()?;

        let max_x = self.board.width() as i32 - 1;
        let max_y = self.board.height() as i32 - 1;
        let next = Cursor::new(
            (self.cursor.x as i32).saturating_add(dx).clamp(0, max_x) as u16,
            (self.cursor.y as i32).saturating_add(dy).clamp(0, max_y) as u16,
        );

        if next != self.cursor {
            self.cursor = next;
            self.revision += 1;
        }
        Ok(self.cursor)
    }

    /// Reveal the cell at (x, y) and return the points awarded.
    ///
    /// Out-of-range coordinates fail with `OutOfBounds`; an already revealed
    /// cell returns 0 without changing anything.
    pub fn hit(&mut self, x: i32, y: i32) -> Result<u32, CoreError> {
        self.ensure_playing()?;

        let already = self
            .board
            .get(x, y)
            .ok_or(CoreError::OutOfBounds { x, y })?
            .is_revealed();
        if already {
            return Ok(0);
        }

        let points = self.board.reveal(x, y)?;
        self.score = self.score.saturating_add(points);
        self.revision += 1;
        Ok(points)
    }

    /// Hit the cell under the cursor
    pub fn hit_cursor(&mut self) -> Result<u32, CoreError> {
        self.hit(self.cursor.x as i32, self.cursor.y as i32)
    }

    /// Enter `GameOver` once every non-empty cell is revealed.
    ///
    /// Returns whether the game is over after the check.
    pub fn check_terminal(&mut self) -> bool {
        if self.phase == Phase::Playing && self.board.all_tiles_revealed() {
            self.phase = Phase::GameOver;
            self.revision += 1;
        }
        self.game_over()
    }

    /// Apply one command from the front end
    pub fn apply_action(&mut self, action: GameAction) -> Result<ActionOutcome, CoreError> {
        match action {
            GameAction::Quit => Ok(ActionOutcome::Quit),
            GameAction::Hit => {
                let points = self.hit_cursor()?;
                let game_over = self.check_terminal();
                Ok(ActionOutcome::Hit { points, game_over })
            }
            GameAction::MoveUp
            | GameAction::MoveDown
            | GameAction::MoveLeft
            | GameAction::MoveRight => {
                let (dx, dy) = action.delta().unwrap_or((0, 0));
                self.move_cursor(dx, dy).map(ActionOutcome::Moved)
            }
        }
    }

    /// Copy the observable state into an immutable snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            revision: self.revision,
            board: self.board.clone(),
            cursor: self.cursor,
            score: self.score,
            game_over: self.game_over(),
            seed: self.seed,
        }
    }

    /// Refill an existing snapshot, reusing its cell allocation
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.revision = self.revision;
        out.board.clone_from(&self.board);
        out.cursor = self.cursor;
        out.score = self.score;
        out.game_over = self.game_over();
        out.seed = self.seed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TileId, TileType};

    fn catalog() -> Arc<TileCatalog> {
        Arc::new(TileCatalog::new(vec![
            TileType::new('*', "#ffff00", 1),
            TileType::new('X', "#88ff00", 2),
        ]))
    }

    fn two_tile_game() -> GameState {
        let board = Board::from_tiles(
            2,
            2,
            catalog(),
            vec![Some(TileId(0)), None, None, Some(TileId(1))],
        )
        .unwrap();
        GameState::new(board, 0)
    }

    #[test]
    fn test_initial_state() {
        let gs = two_tile_game();
        assert_eq!(gs.cursor(), Cursor::new(0, 0));
        assert_eq!(gs.score(), 0);
        assert_eq!(gs.phase(), Phase::Playing);
        assert_eq!(gs.revision(), 0);
    }

    #[test]
    fn test_move_clamps_each_axis() {
        let mut gs = two_tile_game();
        assert_eq!(gs.move_cursor(-1, 0), Ok(Cursor::new(0, 0)));
        assert_eq!(gs.move_cursor(5, 1), Ok(Cursor::new(1, 1)));
        assert_eq!(gs.move_cursor(1, 1), Ok(Cursor::new(1, 1)));
        assert_eq!(gs.move_cursor(i32::MIN, 0), Ok(Cursor::new(0, 1)));
    }

    #[test]
    fn test_revision_only_moves_on_change() {
        let mut gs = two_tile_game();
        gs.move_cursor(-1, -1).unwrap();
        assert_eq!(gs.revision(), 0);
        gs.move_cursor(1, 0).unwrap();
        assert_eq!(gs.revision(), 1);
        gs.hit(1, 0).unwrap();
        assert_eq!(gs.revision(), 2);
        gs.hit(1, 0).unwrap();
        assert_eq!(gs.revision(), 2);
    }

    #[test]
    fn test_hit_out_of_bounds_leaves_state() {
        let mut gs = two_tile_game();
        assert_eq!(gs.hit(2, 0), Err(CoreError::OutOfBounds { x: 2, y: 0 }));
        assert_eq!(gs.hit(0, -1), Err(CoreError::OutOfBounds { x: 0, y: -1 }));
        assert_eq!(gs.score(), 0);
        assert!(gs.board().cells().iter().all(|c| !c.is_revealed()));
    }

    #[test]
    fn test_game_over_rejects_actions() {
        let mut gs = two_tile_game();
        gs.hit(0, 0).unwrap();
        assert!(!gs.check_terminal());
        gs.hit(1, 1).unwrap();
        assert!(gs.check_terminal());

        assert_eq!(gs.move_cursor(1, 0), Err(CoreError::GameAlreadyOver));
        assert_eq!(gs.hit(1, 0), Err(CoreError::GameAlreadyOver));
        assert_eq!(gs.cursor(), Cursor::new(0, 0));
        assert_eq!(gs.score(), 3);
    }

    #[test]
    fn test_apply_hit_checks_terminal() {
        let mut gs = two_tile_game();
        assert_eq!(
            gs.apply_action(GameAction::Hit),
            Ok(ActionOutcome::Hit {
                points: 1,
                game_over: false
            })
        );
        gs.apply_action(GameAction::MoveRight).unwrap();
        gs.apply_action(GameAction::MoveDown).unwrap();
        assert_eq!(
            gs.apply_action(GameAction::Hit),
            Ok(ActionOutcome::Hit {
                points: 2,
                game_over: true
            })
        );
        assert_eq!(
            gs.apply_action(GameAction::MoveUp),
            Err(CoreError::GameAlreadyOver)
        );
        assert_eq!(gs.apply_action(GameAction::Quit), Ok(ActionOutcome::Quit));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut gs = two_tile_game();
        let before = gs.snapshot();
        gs.hit(0, 0).unwrap();
        assert!(!before.board.get(0, 0).unwrap().is_revealed());
        assert_eq!(before.score, 0);

        let mut reused = before.clone();
        gs.snapshot_into(&mut reused);
        assert_eq!(reused, gs.snapshot());
    }
}
