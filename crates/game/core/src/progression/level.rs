//! Level and experience-cap math, experience grants, breakthroughs.

use thiserror::Error;

use crate::config::GameConfig;
use crate::env::CultivationOracle;
use crate::player::PlayerRecord;

/// Effective level of a player.
///
/// # Formula
///
/// ```text
/// level = realm_index * 100 + stage_index * 3 + 1
/// level *= race_exp_multiplier (if a race is set)
/// ```
///
/// Fails closed: an unresolvable realm/stage yields level 1 rather than an
/// error, so callers mid-reward-flow never have to handle a failure.
pub fn level_of(player: &PlayerRecord, cultivation: &dyn CultivationOracle) -> u32 {
    let Some(realm_idx) = cultivation.realm_index(&player.realm) else {
        return 1;
    };
    let Some(stage_idx) = cultivation.stage_index(&player.realm, &player.stage) else {
        return 1;
    };

    let base = (realm_idx * 100 + stage_idx * 3 + 1) as f64;
    let scaled = base * cultivation.race_multiplier(player.race.as_deref());
    (scaled as u32).max(1)
}

/// Experience cap for the player's current realm/stage.
///
/// # Formula
///
/// ```text
/// cap = 1000 * 1.5^stage_index * realm_exp_multiplier * (1 + 0.1 * stage_index)
/// ```
///
/// Truncated to an integer, never below 1000. Unresolvable realm/stage
/// degrades to the base cap.
pub fn exp_cap_of(player: &PlayerRecord, cultivation: &dyn CultivationOracle) -> u64 {
    let (Some(realm_idx), Some(stage_idx)) = (
        cultivation.realm_index(&player.realm),
        cultivation.stage_index(&player.realm, &player.stage),
    ) else {
        return GameConfig::BASE_EXP_CAP;
    };

    let realm_multiplier = cultivation.realms()[realm_idx].exp_multiplier;
    let cap = GameConfig::BASE_EXP_CAP as f64
        * 1.5_f64.powi(stage_idx as i32)
        * realm_multiplier
        * (1.0 + 0.1 * stage_idx as f64);

    (cap as u64).max(GameConfig::BASE_EXP_CAP)
}

/// Grant experience, clamped at the current cap.
///
/// Returns the amount actually banked. Excess beyond the cap is discarded;
/// consuming a full cap is the job of [`attempt_breakthrough`].
pub fn grant_exp(
    player: &mut PlayerRecord,
    amount: u64,
    cultivation: &dyn CultivationOracle,
) -> u64 {
    let cap = exp_cap_of(player, cultivation);
    let before = player.exp;
    player.exp = (player.exp + amount).min(cap);
    player.exp - before
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BreakthroughError {
    #[error("need {cap} exp to break through, have {have}")]
    NotEnoughExp { have: u64, cap: u64 },

    #[error("already at the peak of the final realm")]
    AtPeak,

    #[error("realm or stage no longer resolves against the cultivation table")]
    UnknownRealm,
}

/// Consume a full experience cap and advance one stage.
///
/// Rolling past the last stage of a realm enters the first stage of the next
/// realm. Excess experience carries over, clamped to the new cap so the
/// post-update invariant (`exp <= cap`) holds.
pub fn attempt_breakthrough(
    player: &mut PlayerRecord,
    cultivation: &dyn CultivationOracle,
) -> Result<(), BreakthroughError> {
    let realm_idx = cultivation
        .realm_index(&player.realm)
        .ok_or(BreakthroughError::UnknownRealm)?;
    let stage_idx = cultivation
        .stage_index(&player.realm, &player.stage)
        .ok_or(BreakthroughError::UnknownRealm)?;

    let cap = exp_cap_of(player, cultivation);
    if player.exp < cap {
        return Err(BreakthroughError::NotEnoughExp {
            have: player.exp,
            cap,
        });
    }

    let realms = cultivation.realms();
    let realm = &realms[realm_idx];
    let (next_realm, next_stage) = if stage_idx + 1 < realm.stages.len() {
        (realm.name.clone(), realm.stages[stage_idx + 1].clone())
    } else {
        let next = realms.get(realm_idx + 1).ok_or(BreakthroughError::AtPeak)?;
        let first_stage = next
            .stages
            .first()
            .ok_or(BreakthroughError::UnknownRealm)?
            .clone();
        (next.name.clone(), first_stage)
    };

    let excess = player.exp - cap;
    player.realm = next_realm;
    player.stage = next_stage;
    player.exp = excess.min(exp_cap_of(player, cultivation));

    Ok(())
}
