//! Snapshot gate tests - concurrent readers never see a torn or stale state

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tui_reveal::core::{GameState, SnapshotGate};
use tui_reveal::types::{GameAction, TileCatalog, TileType};

fn game() -> GameState {
    let catalog = Arc::new(TileCatalog::new(vec![
        TileType::new('*', "#ffff00", 1),
        TileType::new('X', "#88ff00", 2),
    ]));
    GameState::generate(8, 8, catalog, 99).unwrap()
}

#[test]
fn readers_see_consistent_snapshots() {
    let gate = Arc::new(SnapshotGate::new());
    let done = Arc::new(AtomicBool::new(false));

    let mut readers = Vec::new();
    for _ in 0..4 {
        let gate = Arc::clone(&gate);
        let done = Arc::clone(&done);
        readers.push(thread::spawn(move || {
            let mut last_revision = 0;
            let mut seen = 0usize;
            while !done.load(Ordering::Acquire) {
                let Some(snap) = gate.read() else {
                    continue;
                };
                assert!(snap.revision >= last_revision, "revision went backwards");
                last_revision = snap.revision;

                // Score always equals what the revealed cells paid out.
                let awarded: u32 = snap.board.cells().iter().map(|c| c.awarded()).sum();
                assert_eq!(snap.score, awarded);
                assert!(snap.cursor.x < snap.board.width());
                assert!(snap.cursor.y < snap.board.height());
                seen += 1;
            }
            seen
        }));
    }

    let mut game = game();
    gate.publish(game.snapshot());
    let path = [
        GameAction::Hit,
        GameAction::MoveRight,
        GameAction::Hit,
        GameAction::MoveDown,
    ];
    for step in 0..2_000 {
        let action = path[step % path.len()];
        if game.apply_action(action).is_err() {
            break;
        }
        gate.publish(game.snapshot());
    }
    done.store(true, Ordering::Release);

    for r in readers {
        r.join().expect("reader panicked");
    }
    assert_eq!(gate.read().unwrap().revision, game.revision());
}

#[test]
fn stale_publish_does_not_overwrite() {
    let gate = SnapshotGate::new();
    let mut game = game();
    let old = game.snapshot();
    game.apply_action(GameAction::MoveRight).unwrap();

    assert!(gate.publish(game.snapshot()));
    assert!(!gate.publish(old));
    assert_eq!(gate.revision(), Some(game.revision()));
}

#[test]
fn snapshot_survives_game_mutation() {
    let gate = SnapshotGate::new();
    let mut game = game();
    gate.publish(game.snapshot());
    let held = gate.read().unwrap();

    game.apply_action(GameAction::Hit).unwrap();
    assert_eq!(held.score, 0);
    assert!(!held.board.get(0, 0).unwrap().is_revealed());
}
