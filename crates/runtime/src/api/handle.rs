//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! every player-facing operation plus event subscription. The chat front-end
//! holds one of these per shard and translates messages into calls.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{Party, PlayerId, PlayerRecord, Technique};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::types::{BattleHandle, BossStatus, WorldSnapshot};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime.
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> std::result::Result<T, RuntimeError> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Register a new player, optionally with a race from the catalog.
    pub async fn register_player(
        &self,
        id: impl Into<PlayerId>,
        race: Option<String>,
    ) -> Result<PlayerRecord> {
        let id = id.into();
        self.request(|reply| Command::RegisterPlayer { id, race, reply })
            .await?
    }

    /// Fetch a player's current record.
    pub async fn player(&self, id: impl Into<PlayerId>) -> Result<PlayerRecord> {
        let id = id.into();
        self.request(|reply| Command::GetPlayer { id, reply }).await?
    }

    /// Record a login, updating the consecutive-day streak. Returns the
    /// updated record; logging in twice the same day is a no-op.
    pub async fn record_login(&self, id: impl Into<PlayerId>) -> Result<PlayerRecord> {
        let id = id.into();
        self.request(|reply| Command::RecordLogin { id, reply })
            .await?
    }

    /// Attempt a breakthrough to the next stage or realm.
    pub async fn breakthrough(&self, id: impl Into<PlayerId>) -> Result<PlayerRecord> {
        let id = id.into();
        self.request(|reply| Command::Breakthrough { id, reply })
            .await?
    }

    /// Generate a technique scaled to the player's current cultivation.
    pub async fn learn_technique(&self, id: impl Into<PlayerId>) -> Result<Technique> {
        let id = id.into();
        self.request(|reply| Command::LearnTechnique { id, reply })
            .await?
    }

    /// Create a party led by `leader`.
    pub async fn create_party(
        &self,
        leader: impl Into<PlayerId>,
        name: impl Into<String>,
    ) -> Result<Party> {
        let leader = leader.into();
        let name = name.into();
        self.request(|reply| Command::CreateParty {
            leader,
            name,
            reply,
        })
        .await?
    }

    /// Invite a player to the inviter's party (leader only).
    pub async fn invite_to_party(
        &self,
        inviter: impl Into<PlayerId>,
        target: impl Into<PlayerId>,
    ) -> Result<()> {
        let inviter = inviter.into();
        let target = target.into();
        self.request(|reply| Command::InviteToParty {
            inviter,
            target,
            reply,
        })
        .await?
    }

    /// Join a party by name, consuming a pending invite.
    pub async fn join_party(
        &self,
        player: impl Into<PlayerId>,
        name: impl Into<String>,
    ) -> Result<Party> {
        let player = player.into();
        let name = name.into();
        self.request(|reply| Command::JoinParty {
            player,
            name,
            reply,
        })
        .await?
    }

    /// Leave the current party.
    pub async fn leave_party(&self, player: impl Into<PlayerId>) -> Result<()> {
        let player = player.into();
        self.request(|reply| Command::LeaveParty { player, reply })
            .await?
    }

    /// Disband the whole party (leader only).
    pub async fn disband_party(&self, leader: impl Into<PlayerId>) -> Result<()> {
        let leader = leader.into();
        self.request(|reply| Command::DisbandParty { leader, reply })
            .await?
    }

    /// The party the player currently belongs to, if any.
    pub async fn party_of(&self, player: impl Into<PlayerId>) -> Result<Option<Party>> {
        let player = player.into();
        self.request(|reply| Command::PartyInfo { player, reply })
            .await
    }

    /// Challenge a spawned world boss on behalf of the caller's party.
    ///
    /// The caller must lead a party, the boss must exist and be spawned, and
    /// no other party may already be fighting it. On success a background
    /// round loop starts; progress streams over [`Topic::Battle`].
    pub async fn challenge_boss(
        &self,
        player: impl Into<PlayerId>,
        boss_name: impl Into<String>,
    ) -> Result<BattleHandle> {
        let player = player.into();
        let boss_name = boss_name.into();
        self.request(|reply| Command::ChallengeBoss {
            player,
            boss_name,
            reply,
        })
        .await?
    }

    /// Status line for every boss in the catalog.
    pub async fn world_boss_status(&self) -> Result<Vec<BossStatus>> {
        self.request(|reply| Command::WorldBossStatus { reply })
            .await
    }

    /// Run the daily reset if a new calendar day has started. Returns whether
    /// a reset actually ran.
    pub async fn daily_reset(&self) -> Result<bool> {
        self.request(|reply| Command::DailyReset { reply }).await?
    }

    /// Snapshot the world registries as they are right now.
    pub async fn snapshot(&self) -> Result<WorldSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Subscribe to events from a specific topic.
    ///
    /// - [`Topic::Battle`] — battle lifecycle (rounds, victory, defeat)
    /// - [`Topic::Party`] — membership changes
    /// - [`Topic::World`] — spawns, resets, maintenance
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage.
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
