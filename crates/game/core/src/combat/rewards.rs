//! Victory reward splitting and equipment drops.

use rand::Rng;
use rand::seq::SliceRandom;

use super::BattleMember;
use crate::config::GameConfig;
use crate::env::{BossDef, RewardBase};
use crate::player::{EquipmentItem, PlayerId};

/// A participant's floored share of the boss's base rewards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewardShare {
    pub exp: u64,
    pub qi: u64,
    pub spirit_stones: u64,
}

/// Split rewards by damage contribution.
///
/// Each surviving participant's share is
/// `floor(base * individual_damage / total_party_damage)`, where the total
/// includes damage dealt by members who later fell — falling only forfeits
/// the payout, not the attribution. Participants at 0 health receive
/// nothing. Flooring guarantees the shares never sum above the base amounts.
pub fn split_rewards(base: RewardBase, members: &[BattleMember]) -> Vec<(PlayerId, RewardShare)> {
    let total: u64 = members.iter().map(|m| m.damage_dealt).sum();
    if total == 0 {
        return Vec::new();
    }

    members
        .iter()
        .filter(|m| m.alive())
        .map(|m| {
            let share = RewardShare {
                exp: base.exp * m.damage_dealt / total,
                qi: base.qi * m.damage_dealt / total,
                spirit_stones: base.spirit_stones * m.damage_dealt / total,
            };
            (m.player.clone(), share)
        })
        .collect()
}

/// Independent 5% drop roll from the boss's drop table.
pub fn roll_drop(drop_table: &[EquipmentItem], rng: &mut impl Rng) -> Option<EquipmentItem> {
    if drop_table.is_empty() || !rng.gen_bool(GameConfig::DROP_CHANCE) {
        return None;
    }
    drop_table.choose(rng).cloned()
}

/// Whether `equipment` covers every `set`-tagged item name this boss drops.
///
/// Used after awarding a drop: completing the boss's set grants the flat
/// full-set power bonus exactly once (the caller compares before/after).
pub fn completes_boss_set(equipment: &[EquipmentItem], boss: &BossDef, set: &str) -> bool {
    let mut required = boss
        .drop_table
        .iter()
        .filter(|item| item.set.as_deref() == Some(set))
        .map(|item| item.name.as_str())
        .peekable();

    if required.peek().is_none() {
        return false;
    }

    required.all(|name| equipment.iter().any(|owned| owned.name == name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::DamageRange;
    use crate::types::{Element, Rarity, Slot};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeMap;

    fn member(id: &str, health: u32, damage: u64) -> BattleMember {
        BattleMember {
            player: PlayerId::from(id),
            health,
            damage_dealt: damage,
        }
    }

    fn drop_item(name: &str, set: Option<&str>) -> EquipmentItem {
        EquipmentItem {
            name: name.into(),
            slot: Slot::Weapon,
            stats: BTreeMap::new(),
            rarity: Rarity::Epic,
            set: set.map(str::to_string),
        }
    }

    fn boss(drop_table: Vec<EquipmentItem>) -> BossDef {
        BossDef {
            name: "Flame Tyrant".into(),
            flavor: "🔥".into(),
            level: 50,
            max_health: 50_000,
            damage: DamageRange { min: 50, max: 150 },
            rewards: RewardBase {
                exp: 1_000,
                qi: 500,
                spirit_stones: 300,
            },
            element: Element::Fire,
            weakness: Some(Element::Water),
            min_players: 2,
            max_players: 10,
            spawn_interval_secs: 3_600,
            drop_table,
            full_set_bonus: 500,
        }
    }

    #[test]
    fn shares_are_proportional_and_floored() {
        let base = RewardBase {
            exp: 1_000,
            qi: 100,
            spirit_stones: 10,
        };
        let members = vec![member("a", 100, 600), member("b", 100, 300)];
        let shares = split_rewards(base, &members);

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].1.exp, 666);
        assert_eq!(shares[1].1.exp, 333);
    }

    #[test]
    fn shares_never_over_allocate() {
        let base = RewardBase {
            exp: 997,
            qi: 13,
            spirit_stones: 7,
        };
        let members = vec![
            member("a", 100, 311),
            member("b", 100, 177),
            member("c", 100, 512),
        ];
        let shares = split_rewards(base, &members);

        let exp_sum: u64 = shares.iter().map(|(_, s)| s.exp).sum();
        let qi_sum: u64 = shares.iter().map(|(_, s)| s.qi).sum();
        let stones_sum: u64 = shares.iter().map(|(_, s)| s.spirit_stones).sum();
        assert!(exp_sum <= base.exp);
        assert!(qi_sum <= base.qi);
        assert!(stones_sum <= base.spirit_stones);
    }

    #[test]
    fn fallen_members_forfeit_but_still_dilute() {
        let base = RewardBase {
            exp: 1_000,
            qi: 0,
            spirit_stones: 0,
        };
        let members = vec![member("alive", 100, 500), member("fallen", 0, 500)];
        let shares = split_rewards(base, &members);

        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].0, PlayerId::from("alive"));
        assert_eq!(shares[0].1.exp, 500);
    }

    #[test]
    fn zero_total_damage_pays_nobody() {
        let base = RewardBase {
            exp: 1_000,
            qi: 1,
            spirit_stones: 1,
        };
        assert!(split_rewards(base, &[member("a", 100, 0)]).is_empty());
    }

    #[test]
    fn drop_rate_is_about_five_percent() {
        let table = vec![drop_item("Flame Saber", None)];
        let mut rng = StdRng::seed_from_u64(1);
        let hits = (0..10_000)
            .filter(|_| roll_drop(&table, &mut rng).is_some())
            .count();
        assert!((300..=700).contains(&hits), "drop count {hits}");
    }

    #[test]
    fn empty_drop_table_never_drops() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(roll_drop(&[], &mut rng).is_none());
    }

    #[test]
    fn set_completion_requires_every_boss_drop_of_that_set() {
        let boss = boss(vec![
            drop_item("Tyrant Helm", Some("Tyrant")),
            drop_item("Tyrant Plate", Some("Tyrant")),
            drop_item("Flame Saber", None),
        ]);

        let owned = vec![drop_item("Tyrant Helm", Some("Tyrant"))];
        assert!(!completes_boss_set(&owned, &boss, "Tyrant"));

        let owned = vec![
            drop_item("Tyrant Helm", Some("Tyrant")),
            drop_item("Tyrant Plate", Some("Tyrant")),
        ];
        assert!(completes_boss_set(&owned, &boss, "Tyrant"));

        // A set the boss does not drop can never be completed against it.
        assert!(!completes_boss_set(&owned, &boss, "Azure Dragon"));
    }
}
