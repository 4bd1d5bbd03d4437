//! Snapshot gate - hands the latest game snapshot from the game loop to readers.
//!
//! The game loop is the only writer. Readers on any thread get an
//! `Arc<GameSnapshot>`: an immutable value that stays valid however many
//! publishes happen afterwards. The lock only guards the pointer swap/clone,
//! never a copy of the board, so neither side waits on the other's work.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::snapshot::GameSnapshot;

#[derive(Debug, Default)]
pub struct SnapshotGate {
    slot: RwLock<Option<Arc<GameSnapshot>>>,
}

impl SnapshotGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `snapshot` the visible one.
    ///
    /// Returns false (and keeps the current snapshot) when `snapshot` is older
    /// than what readers can already see.
    pub fn publish(&self, snapshot: GameSnapshot) -> bool {
        self.publish_arc(Arc::new(snapshot))
    }

    pub fn publish_arc(&self, snapshot: Arc<GameSnapshot>) -> bool {
        let previous = {
            let mut slot = self.slot.write();
            if let Some(current) = slot.as_ref() {
                if current.revision > snapshot.revision {
                    return false;
                }
            }
            slot.replace(snapshot)
        };
        // The old snapshot may be the last reference to a large board.
        drop(previous);
        true
    }

    /// Latest published snapshot, `None` before the first publish.
    pub fn read(&self) -> Option<Arc<GameSnapshot>> {
        self.slot.read().clone()
    }

    /// Revision of the visible snapshot
    pub fn revision(&self) -> Option<u64> {
        self.slot.read().as_ref().map(|s| s.revision)
    }
}
