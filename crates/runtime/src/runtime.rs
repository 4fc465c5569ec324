//! High-level runtime orchestrator.
//!
//! The runtime owns the world worker and the periodic tickers, wires up the
//! command/event channels, and exposes a builder-based API for embedding the
//! game core into a chat front-end.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::warn;

use game_content::ContentBundle;

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::oracle::OracleManager;
use crate::repository::{
    InMemoryPlayerRepo, InMemorySnapshotRepo, PlayerRepository, SnapshotRepository,
};
use crate::types::WorldSnapshot;
use crate::workers::{Command, WorldWorker, maintenance_ticker, spawn_ticker};

/// Runtime configuration shared across the orchestrator and workers.
///
/// The defaults are the production pacing; tests shrink the durations to
/// drive battles in milliseconds.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Delay between battle rounds.
    pub round_delay: Duration,
    /// Wall-clock limit on a single battle; timeout counts as a defeat.
    pub battle_deadline: Duration,
    /// Period of the boss spawn check.
    pub spawn_check_interval: Duration,
    /// Period of the maintenance sweep (party cleanup, daily reset, snapshot).
    pub maintenance_interval: Duration,
    /// Parties idle longer than this are removed by maintenance.
    pub party_inactivity: Duration,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            round_delay: Duration::from_secs(5),
            battle_deadline: Duration::from_secs(600),
            spawn_check_interval: Duration::from_secs(300),
            maintenance_interval: Duration::from_secs(60),
            party_inactivity: Duration::from_secs(3_600),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that orchestrates the game world.
///
/// Design: the runtime owns the background tasks; [`RuntimeHandle`] provides
/// a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    command_tx: mpsc::Sender<Command>,
    worker_handle: JoinHandle<()>,
    ticker_handles: Vec<JoinHandle<()>>,
}

impl Runtime {
    /// Create a new runtime builder.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime.
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shut down gracefully: stop battles, save a final snapshot, and join
    /// the worker.
    pub async fn shutdown(self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self
            .command_tx
            .send(Command::Shutdown { reply: reply_tx })
            .await
            .is_ok()
        {
            let _ = reply_rx.await;
        }

        for ticker in self.ticker_handles {
            ticker.abort();
        }

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    content: Option<ContentBundle>,
    players: Option<Arc<dyn PlayerRepository>>,
    snapshots: Option<Arc<dyn SnapshotRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            content: None,
            players: None,
            snapshots: None,
        }
    }

    /// Override runtime configuration.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom catalog instead of the built-in world.
    pub fn content(mut self, content: ContentBundle) -> Self {
        self.content = Some(content);
        self
    }

    /// Set the player record store (defaults to in-memory).
    pub fn player_repo(mut self, repo: Arc<dyn PlayerRepository>) -> Self {
        self.players = Some(repo);
        self
    }

    /// Set the world snapshot store (defaults to in-memory).
    pub fn snapshot_repo(mut self, repo: Arc<dyn SnapshotRepository>) -> Self {
        self.snapshots = Some(repo);
        self
    }

    /// Build the runtime: restore any persisted world state, spawn the world
    /// worker, and start the tickers.
    pub async fn build(self) -> Result<Runtime> {
        let content = self.content.unwrap_or_else(game_content::builtin);
        let oracles = OracleManager::new(content);
        let players = self
            .players
            .unwrap_or_else(|| Arc::new(InMemoryPlayerRepo::new()));
        let snapshots = self
            .snapshots
            .unwrap_or_else(|| Arc::new(InMemorySnapshotRepo::new()));

        // Restore merges into fresh registries rather than replacing them;
        // an unreadable snapshot degrades to a cold start.
        let mut restored = WorldSnapshot::default();
        match snapshots.load() {
            Ok(Some(snapshot)) => {
                restored.parties.merge(snapshot.parties);
                restored.boss_timers.extend(snapshot.boss_timers);
                restored.battles.extend(snapshot.battles);
                restored.last_daily_reset = snapshot.last_daily_reset;
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "failed to load world snapshot, starting fresh"),
        }

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx.clone(), event_bus.clone());

        let worker = WorldWorker::new(
            players,
            snapshots,
            oracles,
            self.config.clone(),
            command_rx,
            command_tx.clone(),
            event_bus,
            restored,
        );
        let worker_handle = tokio::spawn(worker.run());

        let ticker_handles = vec![
            tokio::spawn(spawn_ticker(
                command_tx.clone(),
                self.config.spawn_check_interval,
            )),
            tokio::spawn(maintenance_ticker(
                command_tx.clone(),
                self.config.maintenance_interval,
            )),
        ];

        Ok(Runtime {
            handle,
            command_tx,
            worker_handle,
            ticker_handles,
        })
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
