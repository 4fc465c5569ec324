//! Stateless combat resolution for world-boss encounters.
//!
//! Damage, counter-attacks, reward splits, and drop rolls are pure functions
//! over battle participants; the runtime owns the battle record and feeds it
//! through these.

mod damage;
mod rewards;

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

pub use damage::{attack_damage, counter_attack};
pub use rewards::{RewardShare, completes_boss_set, roll_drop, split_rewards};

/// One participant in a world-boss battle.
///
/// Membership is snapshotted at challenge time; later party changes do not
/// affect an in-progress battle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleMember {
    pub player: PlayerId,
    /// Combat health for this battle only, clamped at 0.
    pub health: u32,
    /// Accumulated damage, used for reward attribution.
    pub damage_dealt: u64,
}

impl BattleMember {
    pub fn new(player: PlayerId, health: u32) -> Self {
        Self {
            player,
            health,
            damage_dealt: 0,
        }
    }

    pub fn alive(&self) -> bool {
        self.health > 0
    }
}
