//! Equipment set bonuses and total power recomputation.

use std::collections::BTreeMap;

use crate::env::SetBonusOracle;
use crate::player::{EquipmentItem, PlayerRecord};

/// Sum of set bonuses across the whole equipment list.
///
/// Pieces are grouped by set name; each set with a defined bonus table awards
/// the highest threshold met (3-piece, else 2-piece). No partial or
/// interpolated bonuses, and extra pieces beyond the top threshold change
/// nothing. Invariant under reordering of the list.
pub fn compute_set_bonus(equipment: &[EquipmentItem], sets: &dyn SetBonusOracle) -> u64 {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for item in equipment {
        if let Some(set) = item.set.as_deref() {
            *counts.entry(set).or_insert(0) += 1;
        }
    }

    counts
        .iter()
        .filter_map(|(set, &count)| {
            let bonus = sets.set_bonus(set)?;
            match count {
                0..=1 => None,
                2 => Some(bonus.two_piece),
                _ => Some(bonus.three_piece),
            }
        })
        .sum()
}

/// Derived total power: base + per-item power + set bonuses.
pub fn total_power_of(player: &PlayerRecord, sets: &dyn SetBonusOracle) -> u64 {
    let item_power: u64 = player.equipment.iter().map(EquipmentItem::power).sum();
    player.base_power + item_power + compute_set_bonus(&player.equipment, sets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SetBonusDef;
    use crate::types::{Rarity, Slot};

    struct Sets;

    impl SetBonusOracle for Sets {
        fn set_bonus(&self, set: &str) -> Option<SetBonusDef> {
            (set == "Azure Dragon").then_some(SetBonusDef {
                two_piece: 50,
                three_piece: 150,
            })
        }
    }

    fn piece(name: &str, set: Option<&str>) -> EquipmentItem {
        EquipmentItem {
            name: name.into(),
            slot: Slot::Ring,
            stats: BTreeMap::new(),
            rarity: Rarity::Rare,
            set: set.map(str::to_string),
        }
    }

    #[test]
    fn thresholds_award_highest_tier_only() {
        let sets = Sets;
        let mut items = vec![piece("a", Some("Azure Dragon"))];
        assert_eq!(compute_set_bonus(&items, &sets), 0);

        items.push(piece("b", Some("Azure Dragon")));
        assert_eq!(compute_set_bonus(&items, &sets), 50);

        items.push(piece("c", Some("Azure Dragon")));
        assert_eq!(compute_set_bonus(&items, &sets), 150);

        // A fourth piece of a complete set changes nothing.
        items.push(piece("d", Some("Azure Dragon")));
        assert_eq!(compute_set_bonus(&items, &sets), 150);
    }

    #[test]
    fn order_invariant() {
        let sets = Sets;
        let items = vec![
            piece("a", Some("Azure Dragon")),
            piece("x", None),
            piece("b", Some("Azure Dragon")),
            piece("y", Some("Unknown Set")),
        ];
        let mut reversed = items.clone();
        reversed.reverse();
        assert_eq!(
            compute_set_bonus(&items, &sets),
            compute_set_bonus(&reversed, &sets)
        );
    }

    #[test]
    fn undefined_sets_award_nothing() {
        let sets = Sets;
        let items = vec![
            piece("a", Some("Unknown Set")),
            piece("b", Some("Unknown Set")),
            piece("c", Some("Unknown Set")),
        ];
        assert_eq!(compute_set_bonus(&items, &sets), 0);
    }
}
