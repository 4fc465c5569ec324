//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the rules, the repositories, and worker coordination
//! so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{BreakthroughError, PartyError, PlayerId};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("player '{0}' is already registered")]
    AlreadyRegistered(PlayerId),

    #[error("player '{0}' is not registered")]
    PlayerNotFound(PlayerId),

    #[error("unknown race '{0}'")]
    UnknownRace(String),

    #[error(transparent)]
    Party(#[from] PartyError),

    #[error(transparent)]
    Breakthrough(#[from] BreakthroughError),

    #[error("no world boss named '{0}'")]
    BossNotFound(String),

    #[error("'{0}' has not spawned yet")]
    BossNotSpawned(String),

    #[error("'{boss}' is already fighting party '{party}'")]
    BossAlreadyEngaged { boss: String, party: String },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("catalog has no realms or stages to start players in")]
    EmptyCatalog,

    #[error("world worker command channel closed")]
    CommandChannelClosed,

    #[error("world worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("world worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl RuntimeError {
    /// Rejections of a well-formed request against current state, as opposed
    /// to infrastructure failures. These are safe to render back to the
    /// requesting player verbatim.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            Self::Repository(_)
                | Self::CommandChannelClosed
                | Self::ReplyChannelClosed(_)
                | Self::WorkerJoin(_)
                | Self::EmptyCatalog
        )
    }
}
