//! Deterministic game rules shared by the runtime and offline tools.
//!
//! `game-core` defines the canonical progression, combat, and party rules for
//! the cultivation world-boss game. All functions here are pure: static
//! catalog data arrives through the oracle traits in [`env`], randomness is
//! injected as a [`rand::Rng`], and nothing in this crate performs I/O or
//! touches the clock beyond values passed in by the caller.
pub mod combat;
pub mod config;
pub mod env;
pub mod party;
pub mod player;
pub mod progression;
pub mod types;

pub use combat::{
    BattleMember, RewardShare, attack_damage, completes_boss_set, counter_attack, roll_drop,
    split_rewards,
};
pub use config::GameConfig;
pub use env::{
    AchievementCondition, AchievementDef, AchievementOracle, AchievementReward, BossDef,
    BossOracle, CultivationOracle, DamageRange, RaceDef, RealmDef, RewardBase, SetBonusDef,
    SetBonusOracle, TechniqueOracle, TechniqueTables, TechniqueTypeDef, WorldEnv,
};
pub use party::{LeaveOutcome, Party, PartyError, PartyRegistry, PartyRole};
pub use player::{EquipmentItem, PlayerId, PlayerRecord, QuestProgress};
pub use progression::{
    BreakthroughError, attempt_breakthrough, check_achievements, compute_set_bonus, exp_cap_of,
    generate_technique, grant_exp, level_of, needs_daily_reset, record_login, reset_daily_quests,
    total_power_of,
};
pub use types::{Element, Rarity, Slot, Technique};
