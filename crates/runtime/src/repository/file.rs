//! Flat-file JSON repositories.
//!
//! One JSON file per player under `<root>/players/`, plus `<root>/world.json`
//! for the registry snapshot. Writes go to a sibling temp file first and are
//! renamed into place, so a crash mid-write never leaves a torn record.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::{PlayerId, PlayerRecord};
use tracing::warn;

use super::{PlayerRepository, RepositoryError, Result, SnapshotRepository};
use crate::types::WorldSnapshot;

fn io_err(path: &Path, source: std::io::Error) -> RepositoryError {
    RepositoryError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes).map_err(|e| io_err(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| io_err(path, e))
}

/// File names are derived from the opaque player id; anything outside
/// `[A-Za-z0-9._-]` is escaped so ids cannot traverse out of the directory.
fn file_stem(id: &PlayerId) -> String {
    id.as_str()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c.to_string()
            } else {
                format!("%{:02x}", c as u32)
            }
        })
        .collect()
}

/// Flat-file implementation of [`PlayerRepository`].
pub struct FilePlayerRepo {
    dir: PathBuf,
}

impl FilePlayerRepo {
    pub fn new(root: &Path) -> Result<Self> {
        let dir = root.join("players");
        fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
        Ok(Self { dir })
    }

    fn path_for(&self, id: &PlayerId) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(id)))
    }
}

impl PlayerRepository for FilePlayerRepo {
    fn get(&self, id: &PlayerId) -> Result<Option<PlayerRecord>> {
        let path = self.path_for(id);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_err(&path, e)),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn put(&self, record: &PlayerRecord) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(record)?;
        write_atomic(&self.path_for(&record.id), &bytes)
    }

    fn exists(&self, id: &PlayerId) -> bool {
        self.path_for(id).exists()
    }

    fn list_ids(&self) -> Result<Vec<PlayerId>> {
        let mut ids = Vec::new();
        let entries = fs::read_dir(&self.dir).map_err(|e| io_err(&self.dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| io_err(&self.dir, e))?;
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            // The record itself is authoritative for the id; the file name is
            // an escaped rendering of it.
            match fs::read_to_string(&path) {
                Ok(text) => match serde_json::from_str::<PlayerRecord>(&text) {
                    Ok(record) => ids.push(record.id),
                    Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable player record"),
                },
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable player file"),
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// Flat-file implementation of [`SnapshotRepository`].
pub struct FileSnapshotRepo {
    path: PathBuf,
}

impl FileSnapshotRepo {
    pub fn new(root: &Path) -> Result<Self> {
        fs::create_dir_all(root).map_err(|e| io_err(root, e))?;
        Ok(Self {
            path: root.join("world.json"),
        })
    }
}

impl SnapshotRepository for FileSnapshotRepo {
    fn save(&self, snapshot: &WorldSnapshot) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        write_atomic(&self.path, &bytes)
    }

    fn load(&self) -> Result<Option<WorldSnapshot>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_err(&self.path, e)),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_round_trip_and_listing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = FilePlayerRepo::new(dir.path()).expect("repo");

        let record = PlayerRecord::new(PlayerId::from("user#42"), "Qi Condensation", "Early");
        repo.put(&record).expect("put");

        assert!(repo.exists(&record.id));
        let loaded = repo.get(&record.id).expect("get").expect("present");
        assert_eq!(loaded, record);
        assert_eq!(repo.list_ids().expect("list"), vec![record.id]);
    }

    #[test]
    fn missing_player_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = FilePlayerRepo::new(dir.path()).expect("repo");
        assert!(repo.get(&PlayerId::from("nobody")).expect("get").is_none());
        assert!(!repo.exists(&PlayerId::from("nobody")));
    }

    #[test]
    fn snapshot_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = FileSnapshotRepo::new(dir.path()).expect("repo");

        assert!(repo.load().expect("load").is_none());
        let snapshot = WorldSnapshot::default();
        repo.save(&snapshot).expect("save");
        assert!(repo.load().expect("load").is_some());
    }
}
