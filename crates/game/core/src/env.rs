//! Traits describing read-only catalog data.
//!
//! Oracles expose the cultivation ladder, boss catalog, equipment set
//! bonuses, achievements, and technique tables. [`WorldEnv`] bundles them so
//! the rules can access everything they need without hard coupling to
//! concrete implementations. Catalog data is injected at construction and
//! never mutated by this crate — the only mutable boss field
//! (`last_spawn_time`) lives in the runtime's registries.

use serde::{Deserialize, Serialize};

use crate::player::EquipmentItem;
use crate::types::Element;

// ============================================================================
// Catalog Definitions
// ============================================================================

/// One realm of the cultivation ladder, with its ordered stages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RealmDef {
    pub name: String,
    /// Multiplier applied to the experience cap within this realm.
    pub exp_multiplier: f64,
    /// Ordered stage names, fine-grained progression inside the realm.
    pub stages: Vec<String>,
}

/// A playable race with its experience scaling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RaceDef {
    pub name: String,
    pub exp_multiplier: f64,
}

/// Inclusive damage range rolled for boss counter-attacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRange {
    pub min: u32,
    pub max: u32,
}

/// Base reward amounts split by damage contribution on victory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardBase {
    pub exp: u64,
    pub qi: u64,
    pub spirit_stones: u64,
}

/// Static world-boss catalog entry.
///
/// `min_players`/`max_players` are informational only; the challenge path
/// deliberately does not enforce them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BossDef {
    pub name: String,
    pub flavor: String,
    pub level: u32,
    pub max_health: u64,
    pub damage: DamageRange,
    pub rewards: RewardBase,
    pub element: Element,
    #[serde(default)]
    pub weakness: Option<Element>,
    pub min_players: usize,
    pub max_players: usize,
    /// Seconds between spawns.
    pub spawn_interval_secs: u64,
    /// Items a victorious survivor can roll.
    #[serde(default)]
    pub drop_table: Vec<EquipmentItem>,
    /// Flat power granted when a player completes every set piece this boss
    /// can drop.
    pub full_set_bonus: u64,
}

/// Piece-count thresholds for an equipment set.
///
/// Only the highest threshold met is awarded; there are no partial bonuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetBonusDef {
    pub two_piece: u64,
    pub three_piece: u64,
}

/// Data-driven achievement predicate.
///
/// Conditions are plain data so the catalog stays declarative and the
/// evaluation logic lives in one place
/// ([`crate::progression::check_achievements`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AchievementCondition {
    /// Player's realm index reached at least this value.
    RealmIndexAtLeast(usize),
    /// Total world-boss kills across all bosses.
    BossKillsAtLeast(u32),
    /// Kills of one specific boss.
    BossKillsOf { boss: String, count: u32 },
    /// Total power threshold.
    TotalPowerAtLeast(u64),
    /// Consecutive-day login streak.
    LoginStreakAtLeast(u32),
    /// Owned equipment count.
    EquipmentAtLeast(usize),
    /// Spirit stone balance.
    SpiritStonesAtLeast(u64),
}

/// Rewards applied atomically with the achievement grant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementReward {
    pub spirit_stones: u64,
    pub exp: u64,
    pub qi: u64,
    pub base_power: u64,
}

/// Static achievement catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AchievementDef {
    pub id: String,
    pub name: String,
    pub condition: AchievementCondition,
    pub reward: AchievementReward,
}

/// One technique type with its power roll range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TechniqueTypeDef {
    pub name: String,
    /// Uniform bonus roll added on top of the realm/stage scaling.
    pub bonus_min: f64,
    pub bonus_max: f64,
}

/// Sect × type × element combinatorics for technique generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TechniqueTables {
    pub sects: Vec<String>,
    pub types: Vec<TechniqueTypeDef>,
    pub elements: Vec<Element>,
}

// ============================================================================
// Oracle Traits
// ============================================================================

/// Ordered realm/stage ladder and race scaling.
pub trait CultivationOracle: Send + Sync {
    /// Realms in progression order.
    fn realms(&self) -> &[RealmDef];

    /// Races available at registration.
    fn races(&self) -> &[RaceDef];

    /// Index of a realm by name, if it exists.
    fn realm_index(&self, realm: &str) -> Option<usize> {
        self.realms().iter().position(|r| r.name == realm)
    }

    /// Index of a stage within a realm, if both resolve.
    fn stage_index(&self, realm: &str, stage: &str) -> Option<usize> {
        let realm = self.realms().iter().find(|r| r.name == realm)?;
        realm.stages.iter().position(|s| s == stage)
    }

    /// Experience multiplier for a race, 1.0 when unknown or absent.
    fn race_multiplier(&self, race: Option<&str>) -> f64 {
        race.and_then(|name| {
            self.races()
                .iter()
                .find(|r| r.name == name)
                .map(|r| r.exp_multiplier)
        })
        .unwrap_or(1.0)
    }
}

/// Static world-boss catalog.
pub trait BossOracle: Send + Sync {
    fn bosses(&self) -> &[BossDef];

    /// Case-insensitive lookup by name.
    fn boss_by_name(&self, name: &str) -> Option<&BossDef> {
        self.bosses()
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name))
    }
}

/// Equipment set bonus tables.
pub trait SetBonusOracle: Send + Sync {
    fn set_bonus(&self, set: &str) -> Option<SetBonusDef>;
}

/// Achievement catalog.
pub trait AchievementOracle: Send + Sync {
    fn achievements(&self) -> &[AchievementDef];
}

/// Technique generation tables.
pub trait TechniqueOracle: Send + Sync {
    fn tables(&self) -> &TechniqueTables;
}

// ============================================================================
// Environment Aggregate
// ============================================================================

/// Aggregates the read-only oracles required by progression and combat.
#[derive(Clone, Copy)]
pub struct WorldEnv<'a> {
    pub cultivation: &'a dyn CultivationOracle,
    pub bosses: &'a dyn BossOracle,
    pub set_bonuses: &'a dyn SetBonusOracle,
    pub achievements: &'a dyn AchievementOracle,
    pub techniques: &'a dyn TechniqueOracle,
}
