//! Background tasks: the world worker, per-battle round loops, and tickers.

mod battle;
mod upkeep;
mod world;

use tokio::sync::oneshot;

use game_core::{Party, PlayerId, PlayerRecord, Technique};

use crate::api::Result;
use crate::types::{BattleHandle, BossStatus, WorldSnapshot};

pub(crate) use battle::battle_loop;
pub(crate) use upkeep::{maintenance_ticker, spawn_ticker};
pub(crate) use world::WorldWorker;

/// Commands accepted by the world worker.
///
/// Every mutation of world state flows through here, so operations observe
/// each other's effects in a strict order.
pub(crate) enum Command {
    RegisterPlayer {
        id: PlayerId,
        race: Option<String>,
        reply: oneshot::Sender<Result<PlayerRecord>>,
    },
    GetPlayer {
        id: PlayerId,
        reply: oneshot::Sender<Result<PlayerRecord>>,
    },
    RecordLogin {
        id: PlayerId,
        reply: oneshot::Sender<Result<PlayerRecord>>,
    },
    Breakthrough {
        id: PlayerId,
        reply: oneshot::Sender<Result<PlayerRecord>>,
    },
    LearnTechnique {
        id: PlayerId,
        reply: oneshot::Sender<Result<Technique>>,
    },
    CreateParty {
        leader: PlayerId,
        name: String,
        reply: oneshot::Sender<Result<Party>>,
    },
    InviteToParty {
        inviter: PlayerId,
        target: PlayerId,
        reply: oneshot::Sender<Result<()>>,
    },
    JoinParty {
        player: PlayerId,
        name: String,
        reply: oneshot::Sender<Result<Party>>,
    },
    LeaveParty {
        player: PlayerId,
        reply: oneshot::Sender<Result<()>>,
    },
    DisbandParty {
        leader: PlayerId,
        reply: oneshot::Sender<Result<()>>,
    },
    PartyInfo {
        player: PlayerId,
        reply: oneshot::Sender<Option<Party>>,
    },
    ChallengeBoss {
        player: PlayerId,
        boss_name: String,
        reply: oneshot::Sender<Result<BattleHandle>>,
    },
    WorldBossStatus {
        reply: oneshot::Sender<Vec<BossStatus>>,
    },
    /// Sent by a battle loop to resolve one round.
    BattleRound {
        boss_key: String,
        reply: oneshot::Sender<RoundOutcome>,
    },
    /// Sent by a battle loop when its wall-clock deadline elapses.
    BattleTimeout {
        boss_key: String,
    },
    SpawnCheck,
    Maintenance,
    DailyReset {
        reply: oneshot::Sender<Result<bool>>,
    },
    Snapshot {
        reply: oneshot::Sender<WorldSnapshot>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// What the battle loop should do after a round resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RoundOutcome {
    /// Battle still live, keep looping.
    Continue,
    /// Battle ended this round (victory, wipe, or external removal); the
    /// worker already published the terminal event and dropped the record.
    Finished,
}
