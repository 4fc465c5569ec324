//! Repository error types.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("i/o failure at {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization failed")]
    Serialization(#[from] serde_json::Error),

    #[error("store temporarily unavailable: {0}")]
    Unavailable(String),

    #[error("repository lock poisoned")]
    LockPoisoned,
}

impl RepositoryError {
    /// Transient failures leave in-memory state untouched and may be retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Io { .. })
    }
}
