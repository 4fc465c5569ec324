//! Repository contracts for mutable runtime state.

use game_core::{PlayerId, PlayerRecord};

use super::Result;
use crate::types::WorldSnapshot;

/// Key-value store of player records.
///
/// `get` and `put` are atomic per key; the world worker performs every
/// mutation as a read-modify-write within a single command, so no lost
/// updates can occur. A transient failure must surface as an error rather
/// than a partial write.
pub trait PlayerRepository: Send + Sync {
    /// Load a record, `None` when the player never registered.
    fn get(&self, id: &PlayerId) -> Result<Option<PlayerRecord>>;

    /// Write a record, replacing any previous version.
    fn put(&self, record: &PlayerRecord) -> Result<()>;

    /// Cheap existence check.
    fn exists(&self, id: &PlayerId) -> bool;

    /// Every registered player id, for maintenance sweeps.
    fn list_ids(&self) -> Result<Vec<PlayerId>>;
}

/// Persistence of the orchestrator's registries.
///
/// Saved periodically and on shutdown so boss timers, parties, and active
/// battles survive a restart; see [`WorldSnapshot`] for merge semantics.
pub trait SnapshotRepository: Send + Sync {
    fn save(&self, snapshot: &WorldSnapshot) -> Result<()>;

    fn load(&self) -> Result<Option<WorldSnapshot>>;
}
