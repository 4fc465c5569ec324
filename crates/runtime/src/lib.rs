//! Runtime orchestration for the cultivation world-boss game.
//!
//! This crate wires the pure rules in `game-core` and the static catalogs in
//! `game-content` into a running world: a single worker owns the mutable
//! registries (parties, boss spawn timers, active battles) and serializes
//! every mutation through a command channel, per-battle round loops run as
//! tracked background tasks, and periodic tickers drive spawn checks and
//! maintenance. Consumers embed [`Runtime`] and interact through
//! [`RuntimeHandle`]; the chat front-end subscribes to the topic
//! [`EventBus`] and renders the events however it likes.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus used for notifications
//! - [`oracle`] adapts catalog data into the rules' oracle traits
//! - [`repository`] provides player and world-snapshot persistence
//! - `workers` keeps the world worker, battle loops, and tickers internal
pub mod api;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod runtime;
pub mod types;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{BattleEvent, DefeatReason, Event, EventBus, PartyEvent, PlayerReward, Topic, WorldEvent};
pub use oracle::OracleManager;
pub use repository::{
    FilePlayerRepo, FileSnapshotRepo, InMemoryPlayerRepo, InMemorySnapshotRepo, PlayerRepository,
    RepositoryError, SnapshotRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use types::{BattleHandle, BattleState, BossState, BossStatus, WorldSnapshot};
