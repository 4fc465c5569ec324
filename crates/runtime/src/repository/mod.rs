//! Persistence adapters for player records and world snapshots.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FilePlayerRepo, FileSnapshotRepo};
pub use memory::{InMemoryPlayerRepo, InMemorySnapshotRepo};
pub use traits::{PlayerRepository, SnapshotRepository};
