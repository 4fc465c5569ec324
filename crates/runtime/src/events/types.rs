//! Typed notification payloads.

use game_core::{EquipmentItem, PlayerId};

/// Events emitted over the lifetime of a world-boss battle.
#[derive(Clone, Debug)]
pub enum BattleEvent {
    Started {
        boss_name: String,
        party_name: String,
        members: Vec<PlayerId>,
    },
    /// One resolved round. The counter-attack is `None` once nobody is left
    /// standing to be hit (or the boss died this round).
    RoundUpdate {
        boss_name: String,
        round: u32,
        boss_health: u64,
        max_health: u64,
        party_damage: u64,
        counter_target: Option<PlayerId>,
        counter_damage: Option<u32>,
    },
    /// Victory with the full reward/drop manifest.
    Victory {
        boss_name: String,
        rewards: Vec<PlayerReward>,
    },
    Defeat {
        boss_name: String,
        reason: DefeatReason,
    },
}

/// One survivor's entry in the victory manifest.
#[derive(Clone, Debug)]
pub struct PlayerReward {
    pub player: PlayerId,
    pub exp: u64,
    pub qi: u64,
    pub spirit_stones: u64,
    pub drop: Option<EquipmentItem>,
    /// Flat power granted for completing the boss's equipment set this
    /// victory, if it happened.
    pub full_set_bonus: Option<u64>,
    /// Achievement ids earned while applying this reward.
    pub achievements: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefeatReason {
    /// Every participant reached 0 health.
    PartyWiped,
    /// The wall-clock battle deadline elapsed.
    Timeout,
    /// The battle record was removed externally mid-loop.
    Cancelled,
}

/// Party membership changes.
#[derive(Clone, Debug)]
pub enum PartyEvent {
    Created {
        party_name: String,
        leader: PlayerId,
    },
    InviteSent {
        party_name: String,
        target: PlayerId,
    },
    MemberJoined {
        party_name: String,
        player: PlayerId,
    },
    MemberLeft {
        party_name: String,
        player: PlayerId,
    },
    LeadershipTransferred {
        party_name: String,
        new_leader: PlayerId,
    },
    Disbanded {
        party_name: String,
    },
}

/// World-level events outside any single battle or party.
#[derive(Clone, Debug)]
pub enum WorldEvent {
    BossSpawned { boss_name: String },
    DailyReset,
    PartiesCleaned { removed: Vec<String> },
}
