//! Game rule constants and tunable parameters.

/// Balance parameters shared by progression and combat.
///
/// Compile-time constants cover the values the original rules hard-code;
/// the struct itself carries nothing tunable yet but keeps the call sites
/// stable if balance knobs move out of constants later.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameConfig;

impl GameConfig {
    /// Base experience cap before realm/stage scaling.
    pub const BASE_EXP_CAP: u64 = 1_000;
    /// Combat health every party member starts a world-boss battle with.
    pub const MEMBER_BATTLE_HP: u32 = 1_000;
    /// Floor applied to every attack damage roll.
    pub const MIN_ATTACK_DAMAGE: u64 = 10;
    /// Damage multiplier when the boss declares a weakness.
    pub const WEAKNESS_MULTIPLIER: f64 = 1.5;
    /// Lower bound of the uniform damage variance roll.
    pub const DAMAGE_VARIANCE_LOW: f64 = 0.8;
    /// Upper bound of the uniform damage variance roll.
    pub const DAMAGE_VARIANCE_HIGH: f64 = 1.2;
    /// Per-survivor equipment drop chance on a world-boss victory.
    pub const DROP_CHANCE: f64 = 0.05;
    /// Hard cap on party membership.
    pub const PARTY_CAPACITY: usize = 10;
    /// Member count at which a party is reported as ready (informational).
    pub const PARTY_READY_THRESHOLD: usize = 3;
}
