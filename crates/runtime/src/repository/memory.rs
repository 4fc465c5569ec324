//! In-memory repository implementations for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use game_core::{PlayerId, PlayerRecord};

use super::{PlayerRepository, RepositoryError, Result, SnapshotRepository};
use crate::types::WorldSnapshot;

/// In-memory implementation of [`PlayerRepository`].
///
/// `set_unavailable(true)` makes every access fail with a transient error,
/// which is how tests exercise the store-outage paths.
#[derive(Default)]
pub struct InMemoryPlayerRepo {
    records: RwLock<HashMap<PlayerId, PlayerRecord>>,
    unavailable: AtomicBool,
}

impl InMemoryPlayerRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the store going down (or coming back).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable(
                "in-memory store marked unavailable".into(),
            ));
        }
        Ok(())
    }
}

impl PlayerRepository for InMemoryPlayerRepo {
    fn get(&self, id: &PlayerId) -> Result<Option<PlayerRecord>> {
        self.check_available()?;
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.get(id).cloned())
    }

    fn put(&self, record: &PlayerRecord) -> Result<()> {
        self.check_available()?;
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.insert(record.id.clone(), record.clone());
        Ok(())
    }

    fn exists(&self, id: &PlayerId) -> bool {
        self.records
            .read()
            .map(|records| records.contains_key(id))
            .unwrap_or(false)
    }

    fn list_ids(&self) -> Result<Vec<PlayerId>> {
        self.check_available()?;
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut ids: Vec<PlayerId> = records.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

/// In-memory implementation of [`SnapshotRepository`].
#[derive(Default)]
pub struct InMemorySnapshotRepo {
    snapshot: RwLock<Option<WorldSnapshot>>,
}

impl InMemorySnapshotRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotRepository for InMemorySnapshotRepo {
    fn save(&self, snapshot: &WorldSnapshot) -> Result<()> {
        let mut slot = self
            .snapshot
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<WorldSnapshot>> {
        let slot = self
            .snapshot
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slot.clone())
    }
}
