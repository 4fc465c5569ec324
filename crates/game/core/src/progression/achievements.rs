//! Achievement evaluation and reward application.

use crate::env::{AchievementCondition, AchievementOracle, CultivationOracle, SetBonusOracle};
use crate::player::PlayerRecord;
use crate::progression::{grant_exp, total_power_of};

/// Evaluate every achievement predicate and grant the ones newly satisfied.
///
/// Already-earned achievements are never re-evaluated, so repeated calls are
/// idempotent. Rewards (stones/exp/qi/base power) mutate the same record so
/// they persist atomically with the grant; total power is recomputed when any
/// reward touched base power. Returns the ids earned by this call.
pub fn check_achievements(
    player: &mut PlayerRecord,
    achievements: &dyn AchievementOracle,
    cultivation: &dyn CultivationOracle,
    sets: &dyn SetBonusOracle,
) -> Vec<String> {
    let mut earned = Vec::new();
    let mut power_changed = false;

    for def in achievements.achievements() {
        if player.achievements.contains(&def.id) {
            continue;
        }
        if !condition_met(player, &def.condition, cultivation, sets) {
            continue;
        }

        player.achievements.insert(def.id.clone());
        player.spirit_stones += def.reward.spirit_stones;
        player.qi += def.reward.qi;
        if def.reward.exp > 0 {
            grant_exp(player, def.reward.exp, cultivation);
        }
        if def.reward.base_power > 0 {
            player.base_power += def.reward.base_power;
            power_changed = true;
        }
        earned.push(def.id.clone());
    }

    if power_changed {
        player.total_power = total_power_of(player, sets);
    }

    earned
}

fn condition_met(
    player: &PlayerRecord,
    condition: &AchievementCondition,
    cultivation: &dyn CultivationOracle,
    sets: &dyn SetBonusOracle,
) -> bool {
    match condition {
        AchievementCondition::RealmIndexAtLeast(idx) => {
            cultivation.realm_index(&player.realm).unwrap_or(0) >= *idx
        }
        AchievementCondition::BossKillsAtLeast(count) => player.total_boss_kills() >= *count,
        AchievementCondition::BossKillsOf { boss, count } => {
            player.world_boss_kills.get(boss).copied().unwrap_or(0) >= *count
        }
        AchievementCondition::TotalPowerAtLeast(power) => total_power_of(player, sets) >= *power,
        AchievementCondition::LoginStreakAtLeast(streak) => player.login_streak >= *streak,
        AchievementCondition::EquipmentAtLeast(count) => player.equipment.len() >= *count,
        AchievementCondition::SpiritStonesAtLeast(stones) => player.spirit_stones >= *stones,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{
        AchievementDef, AchievementReward, RaceDef, RealmDef, SetBonusDef,
    };
    use crate::player::PlayerId;

    struct Ladder(Vec<RealmDef>);

    impl CultivationOracle for Ladder {
        fn realms(&self) -> &[RealmDef] {
            &self.0
        }

        fn races(&self) -> &[RaceDef] {
            &[]
        }
    }

    struct NoSets;

    impl SetBonusOracle for NoSets {
        fn set_bonus(&self, _set: &str) -> Option<SetBonusDef> {
            None
        }
    }

    struct Catalog(Vec<AchievementDef>);

    impl AchievementOracle for Catalog {
        fn achievements(&self) -> &[AchievementDef] {
            &self.0
        }
    }

    fn ladder() -> Ladder {
        Ladder(vec![RealmDef {
            name: "Qi Condensation".into(),
            exp_multiplier: 1.0,
            stages: vec!["Early".into()],
        }])
    }

    fn catalog() -> Catalog {
        Catalog(vec![AchievementDef {
            id: "first-blood".into(),
            name: "First Blood".into(),
            condition: AchievementCondition::BossKillsAtLeast(1),
            reward: AchievementReward {
                spirit_stones: 100,
                exp: 0,
                qi: 0,
                base_power: 10,
            },
        }])
    }

    #[test]
    fn earned_exactly_once_with_rewards() {
        let (ladder, catalog, sets) = (ladder(), catalog(), NoSets);
        let mut p = PlayerRecord::new(PlayerId::from("p1"), "Qi Condensation", "Early");
        p.record_boss_kill("Flame Tyrant");

        let earned = check_achievements(&mut p, &catalog, &ladder, &sets);
        assert_eq!(earned, vec!["first-blood".to_string()]);
        assert_eq!(p.spirit_stones, 100);
        assert_eq!(p.base_power, 110);
        assert_eq!(p.total_power, 110);

        // Second pass is a no-op: no double rewards.
        let earned = check_achievements(&mut p, &catalog, &ladder, &sets);
        assert!(earned.is_empty());
        assert_eq!(p.spirit_stones, 100);
    }

    #[test]
    fn unmet_condition_grants_nothing() {
        let (ladder, catalog, sets) = (ladder(), catalog(), NoSets);
        let mut p = PlayerRecord::new(PlayerId::from("p1"), "Qi Condensation", "Early");
        assert!(check_achievements(&mut p, &catalog, &ladder, &sets).is_empty());
        assert_eq!(p.spirit_stones, 0);
    }
}
