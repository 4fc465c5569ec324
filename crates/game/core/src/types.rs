//! Shared vocabulary types used across progression, combat, and content.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Elemental affinity for bosses, techniques, and equipment flavor.
///
/// Bosses declare an element and optionally a weakness element; attack
/// damage gets a multiplier when the boss declares any weakness (see
/// [`crate::combat::attack_damage`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Element {
    Fire,
    Water,
    Earth,
    Wood,
    Metal,
    Lightning,
    Wind,
    Light,
    Dark,
}

/// Rarity tier of an equipment item.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Equipment slot an item occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Slot {
    Weapon,
    Armor,
    Helmet,
    Boots,
    Ring,
    Talisman,
}

/// A procedurally generated cultivation technique.
///
/// Produced by [`crate::progression::generate_technique`]; the power bonus is
/// already rounded to two decimals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Technique {
    pub name: String,
    pub element: Element,
    pub power_bonus: f64,
}

impl Technique {
    /// Fixed fallback returned whenever catalog lookups fail.
    ///
    /// Reward flows rely on always receiving a technique, so generation never
    /// surfaces an error to the caller.
    pub fn default_fallback() -> Self {
        Self {
            name: "Basic Breathing Method".to_string(),
            element: Element::Wood,
            power_bonus: 5.0,
        }
    }
}
