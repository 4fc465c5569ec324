//! Canonical player record and owned equipment.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Rarity, Slot};

/// Opaque, platform-assigned player identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// An equipment item owned by exactly one player.
///
/// Immutable once created; stat bonuses and set membership are fixed at drop
/// time. Set bonuses on top of the per-item stats are computed from the whole
/// equipment list, see [`crate::progression::compute_set_bonus`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub name: String,
    pub slot: Slot,
    /// Stat name → flat bonus. Only the `power` entry feeds total power.
    pub stats: BTreeMap<String, u64>,
    pub rarity: Rarity,
    /// Set this piece belongs to, if any.
    #[serde(default)]
    pub set: Option<String>,
}

impl EquipmentItem {
    /// Flat power contributed by this single piece.
    pub fn power(&self) -> u64 {
        self.stats.get("power").copied().unwrap_or(0)
    }
}

/// Progress on a single daily quest.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestProgress {
    pub progress: u32,
    pub completed: bool,
    pub claimed: bool,
}

/// Canonical player record.
///
/// Created on registration, mutated by every combat/reward/progression
/// operation, never deleted. `realm`/`stage` must stay resolvable against the
/// cultivation table; progression math falls back to safe defaults when they
/// are not (see `progression::level_of`). `exp` never exceeds the cap after
/// an update — excess is clamped and breakthroughs consume it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub realm: String,
    pub stage: String,
    #[serde(default)]
    pub race: Option<String>,
    pub exp: u64,
    pub qi: u64,
    pub spirit_stones: u64,
    pub base_power: u64,
    /// Derived: base + equipment + set bonuses. Recomputed via
    /// [`crate::progression::total_power_of`] after every equipment change.
    pub total_power: u64,
    #[serde(default)]
    pub equipment: Vec<EquipmentItem>,
    #[serde(default)]
    pub achievements: BTreeSet<String>,
    #[serde(default)]
    pub daily_quests: BTreeMap<String, QuestProgress>,
    #[serde(default)]
    pub world_boss_kills: BTreeMap<String, u32>,
    #[serde(default)]
    pub login_streak: u32,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

impl PlayerRecord {
    /// Fresh record with starting realm/stage and default currencies.
    pub fn new(id: PlayerId, realm: impl Into<String>, stage: impl Into<String>) -> Self {
        Self {
            id,
            realm: realm.into(),
            stage: stage.into(),
            race: None,
            exp: 0,
            qi: 0,
            spirit_stones: 0,
            base_power: 100,
            total_power: 100,
            equipment: Vec::new(),
            achievements: BTreeSet::new(),
            daily_quests: BTreeMap::new(),
            world_boss_kills: BTreeMap::new(),
            login_streak: 0,
            last_login: None,
        }
    }

    /// Record a world-boss kill for achievement bookkeeping.
    pub fn record_boss_kill(&mut self, boss_name: &str) {
        *self
            .world_boss_kills
            .entry(boss_name.to_string())
            .or_insert(0) += 1;
    }

    /// Total kills across all bosses.
    pub fn total_boss_kills(&self) -> u32 {
        self.world_boss_kills.values().sum()
    }
}
