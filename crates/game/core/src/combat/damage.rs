//! Attack and counter-attack damage rolls.

use rand::Rng;
use rand::seq::SliceRandom;

use super::BattleMember;
use crate::config::GameConfig;
use crate::env::DamageRange;
use crate::player::PlayerId;
use crate::types::Element;

/// Damage a participant deals to the boss this round.
///
/// # Formula
///
/// ```text
/// base = attacker_power * multiplier
/// damage = uniform_int(0.8 * base ..= 1.2 * base), minimum 10
/// ```
///
/// The multiplier is 1.5 whenever the boss declares any weakness element.
/// The original rules branched on the weakness twice with identical effect;
/// that effective behavior is kept deliberately.
pub fn attack_damage(attacker_power: u64, boss_weakness: Option<Element>, rng: &mut impl Rng) -> u64 {
    let multiplier = if boss_weakness.is_some() {
        GameConfig::WEAKNESS_MULTIPLIER
    } else {
        1.0
    };

    let base = attacker_power as f64 * multiplier;
    let low = (base * GameConfig::DAMAGE_VARIANCE_LOW) as u64;
    let high = (base * GameConfig::DAMAGE_VARIANCE_HIGH) as u64;

    rng.gen_range(low..=high).max(GameConfig::MIN_ATTACK_DAMAGE)
}

/// Boss counter-attack against one uniformly random living participant.
///
/// Applies a uniform roll from the boss's damage range; the target's health
/// is clamped at 0. Returns the target and damage dealt for event reporting,
/// or `None` when nobody is left standing.
pub fn counter_attack(
    members: &mut [BattleMember],
    range: DamageRange,
    rng: &mut impl Rng,
) -> Option<(PlayerId, u32)> {
    let living: Vec<usize> = members
        .iter()
        .enumerate()
        .filter(|(_, m)| m.alive())
        .map(|(i, _)| i)
        .collect();
    let target_idx = *living.choose(rng)?;

    let damage = rng.gen_range(range.min..=range.max);
    let target = &mut members[target_idx];
    target.health = target.health.saturating_sub(damage);

    Some((target.player.clone(), damage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn damage_stays_within_variance_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let d = attack_damage(1_000, None, &mut rng);
            assert!((800..=1_200).contains(&d), "damage {d} out of bounds");
        }
    }

    #[test]
    fn weakness_multiplies_base() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let d = attack_damage(1_000, Some(Element::Light), &mut rng);
            assert!((1_200..=1_800).contains(&d), "damage {d} out of bounds");
        }
    }

    #[test]
    fn minimum_damage_floor() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(attack_damage(0, None, &mut rng), 10);
        assert_eq!(attack_damage(1, None, &mut rng), 10);
    }

    #[test]
    fn counter_only_targets_living() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut members = vec![
            BattleMember {
                player: PlayerId::from("dead"),
                health: 0,
                damage_dealt: 0,
            },
            BattleMember::new(PlayerId::from("alive"), 100),
        ];
        let range = DamageRange { min: 10, max: 20 };

        for _ in 0..20 {
            members[1].health = 100;
            let (target, dmg) = counter_attack(&mut members, range, &mut rng).expect("target");
            assert_eq!(target, PlayerId::from("alive"));
            assert!((10..=20).contains(&dmg));
        }
    }

    #[test]
    fn counter_clamps_health_at_zero() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut members = vec![BattleMember::new(PlayerId::from("p"), 5)];
        let range = DamageRange { min: 50, max: 60 };
        counter_attack(&mut members, range, &mut rng).expect("target");
        assert_eq!(members[0].health, 0);
    }

    #[test]
    fn counter_with_no_living_is_none() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut members = vec![BattleMember {
            player: PlayerId::from("dead"),
            health: 0,
            damage_dealt: 0,
        }];
        let range = DamageRange { min: 1, max: 2 };
        assert!(counter_attack(&mut members, range, &mut rng).is_none());
    }
}
