//! Shared runtime state types: battles, boss status, world snapshots.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use game_core::{BattleMember, PartyRegistry};

/// An active world-boss battle.
///
/// Created when a challenge is accepted; membership is a snapshot of the
/// challenging party at that moment. Exactly one battle may exist per boss
/// name — the registry key is the lowercased name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    /// Display name of the boss, as in the catalog.
    pub boss_name: String,
    /// Name of the challenging party at challenge time.
    pub party_name: String,
    /// Monotonically non-increasing until the battle ends.
    pub boss_health: u64,
    pub members: Vec<BattleMember>,
    pub round: u32,
    pub started_at: DateTime<Utc>,
}

impl BattleState {
    pub fn living_members(&self) -> usize {
        self.members.iter().filter(|m| m.alive()).count()
    }
}

/// Returned to the challenger when a battle starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleHandle {
    pub boss_name: String,
    pub party_name: String,
    pub members: usize,
}

/// Per-boss status line for the world-boss overview.
#[derive(Clone, Debug, PartialEq)]
pub struct BossStatus {
    pub name: String,
    pub flavor: String,
    pub level: u32,
    pub state: BossState,
}

/// Where a boss sits in its spawn/battle lifecycle.
#[derive(Clone, Debug, PartialEq)]
pub enum BossState {
    /// Waiting on the spawn timer.
    Dormant { secs_until_spawn: u64 },
    /// Spawned and open to challenges.
    Spawned { secs_until_despawn: u64 },
    /// Bound to a party; carries remaining health percentage.
    InBattle { percent_hp: f64 },
}

/// Persistent image of the orchestrator's mutable registries.
///
/// Saved periodically and on shutdown; on restore the contents are merged
/// into the live registries (overwriting matching keys), never swapped in
/// wholesale, so state mutated while the load was in flight survives.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub parties: PartyRegistry,
    /// Lowercased boss name → last spawn time.
    pub boss_timers: HashMap<String, DateTime<Utc>>,
    /// Lowercased boss name → in-flight battle.
    pub battles: HashMap<String, BattleState>,
    pub last_daily_reset: Option<NaiveDate>,
}
