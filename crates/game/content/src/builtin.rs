//! Compiled-in default catalog.

use std::collections::BTreeMap;

use game_core::{
    AchievementCondition, AchievementDef, AchievementReward, BossDef, DamageRange, EquipmentItem,
    Element, RaceDef, Rarity, RealmDef, RewardBase, SetBonusDef, Slot, TechniqueTables,
    TechniqueTypeDef,
};

use crate::ContentBundle;

const STAGES: [&str; 4] = ["Early", "Middle", "Late", "Peak"];

fn realm(name: &str, exp_multiplier: f64) -> RealmDef {
    RealmDef {
        name: name.to_string(),
        exp_multiplier,
        stages: STAGES.iter().map(|s| s.to_string()).collect(),
    }
}

fn drop_item(name: &str, slot: Slot, power: u64, rarity: Rarity, set: Option<&str>) -> EquipmentItem {
    EquipmentItem {
        name: name.to_string(),
        slot,
        stats: BTreeMap::from([("power".to_string(), power)]),
        rarity,
        set: set.map(str::to_string),
    }
}

/// The default world catalog.
pub fn builtin() -> ContentBundle {
    let bundle = ContentBundle {
        realms: vec![
            realm("Qi Condensation", 1.0),
            realm("Foundation Establishment", 1.5),
            realm("Core Formation", 2.0),
            realm("Nascent Soul", 3.0),
            realm("Spirit Severing", 4.5),
            realm("Dao Seeking", 6.0),
            realm("Immortal Ascension", 8.0),
        ],
        races: vec![
            RaceDef {
                name: "Human".to_string(),
                exp_multiplier: 1.0,
            },
            RaceDef {
                name: "Celestial".to_string(),
                exp_multiplier: 1.2,
            },
            RaceDef {
                name: "Demon".to_string(),
                exp_multiplier: 1.1,
            },
        ],
        bosses: vec![
            BossDef {
                name: "Flame Tyrant".to_string(),
                flavor: "🔥".to_string(),
                level: 50,
                max_health: 50_000,
                damage: DamageRange { min: 50, max: 150 },
                rewards: RewardBase {
                    exp: 5_000,
                    qi: 2_000,
                    spirit_stones: 1_000,
                },
                element: Element::Fire,
                weakness: Some(Element::Water),
                min_players: 2,
                max_players: 10,
                spawn_interval_secs: 3_600,
                drop_table: vec![
                    drop_item("Tyrant Helm", Slot::Helmet, 120, Rarity::Epic, Some("Tyrant")),
                    drop_item("Tyrant Plate", Slot::Armor, 150, Rarity::Epic, Some("Tyrant")),
                    drop_item("Flame Saber", Slot::Weapon, 200, Rarity::Legendary, None),
                ],
                full_set_bonus: 500,
            },
            BossDef {
                name: "Abyssal Serpent".to_string(),
                flavor: "🐍".to_string(),
                level: 80,
                max_health: 120_000,
                damage: DamageRange { min: 100, max: 250 },
                rewards: RewardBase {
                    exp: 12_000,
                    qi: 5_000,
                    spirit_stones: 2_500,
                },
                element: Element::Water,
                weakness: Some(Element::Lightning),
                min_players: 3,
                max_players: 10,
                spawn_interval_secs: 7_200,
                drop_table: vec![
                    drop_item("Serpent Scale Mail", Slot::Armor, 220, Rarity::Epic, Some("Abyss")),
                    drop_item("Abyssal Ring", Slot::Ring, 180, Rarity::Epic, Some("Abyss")),
                    drop_item("Tideforce Boots", Slot::Boots, 160, Rarity::Rare, Some("Abyss")),
                ],
                full_set_bonus: 900,
            },
            BossDef {
                name: "Shadow Monarch".to_string(),
                flavor: "👤".to_string(),
                level: 120,
                max_health: 300_000,
                damage: DamageRange { min: 200, max: 500 },
                rewards: RewardBase {
                    exp: 30_000,
                    qi: 12_000,
                    spirit_stones: 6_000,
                },
                element: Element::Dark,
                weakness: Some(Element::Light),
                min_players: 5,
                max_players: 10,
                spawn_interval_secs: 14_400,
                drop_table: vec![
                    drop_item("Monarch Crown", Slot::Helmet, 400, Rarity::Legendary, Some("Monarch")),
                    drop_item("Shadow Talisman", Slot::Talisman, 350, Rarity::Legendary, Some("Monarch")),
                    drop_item("Night Reaver", Slot::Weapon, 500, Rarity::Legendary, None),
                ],
                full_set_bonus: 2_000,
            },
        ],
        set_bonuses: BTreeMap::from([
            (
                "Tyrant".to_string(),
                SetBonusDef {
                    two_piece: 100,
                    three_piece: 300,
                },
            ),
            (
                "Abyss".to_string(),
                SetBonusDef {
                    two_piece: 150,
                    three_piece: 450,
                },
            ),
            (
                "Monarch".to_string(),
                SetBonusDef {
                    two_piece: 400,
                    three_piece: 1_200,
                },
            ),
        ]),
        achievements: vec![
            AchievementDef {
                id: "first-blood".to_string(),
                name: "First Blood".to_string(),
                condition: AchievementCondition::BossKillsAtLeast(1),
                reward: AchievementReward {
                    spirit_stones: 500,
                    exp: 500,
                    qi: 0,
                    base_power: 20,
                },
            },
            AchievementDef {
                id: "boss-hunter".to_string(),
                name: "Boss Hunter".to_string(),
                condition: AchievementCondition::BossKillsAtLeast(10),
                reward: AchievementReward {
                    spirit_stones: 5_000,
                    exp: 5_000,
                    qi: 1_000,
                    base_power: 100,
                },
            },
            AchievementDef {
                id: "tyrant-slayer".to_string(),
                name: "Tyrant Slayer".to_string(),
                condition: AchievementCondition::BossKillsOf {
                    boss: "Flame Tyrant".to_string(),
                    count: 5,
                },
                reward: AchievementReward {
                    spirit_stones: 2_000,
                    exp: 0,
                    qi: 500,
                    base_power: 50,
                },
            },
            AchievementDef {
                id: "foundation-built".to_string(),
                name: "Foundation Built".to_string(),
                condition: AchievementCondition::RealmIndexAtLeast(1),
                reward: AchievementReward {
                    spirit_stones: 1_000,
                    exp: 0,
                    qi: 0,
                    base_power: 30,
                },
            },
            AchievementDef {
                id: "ten-thousand-strong".to_string(),
                name: "Ten Thousand Strong".to_string(),
                condition: AchievementCondition::TotalPowerAtLeast(10_000),
                reward: AchievementReward {
                    spirit_stones: 10_000,
                    exp: 0,
                    qi: 2_000,
                    base_power: 200,
                },
            },
            AchievementDef {
                id: "devoted".to_string(),
                name: "Devoted".to_string(),
                condition: AchievementCondition::LoginStreakAtLeast(7),
                reward: AchievementReward {
                    spirit_stones: 700,
                    exp: 700,
                    qi: 0,
                    base_power: 0,
                },
            },
            AchievementDef {
                id: "collector".to_string(),
                name: "Collector".to_string(),
                condition: AchievementCondition::EquipmentAtLeast(5),
                reward: AchievementReward {
                    spirit_stones: 1_500,
                    exp: 0,
                    qi: 0,
                    base_power: 40,
                },
            },
            AchievementDef {
                id: "stone-rich".to_string(),
                name: "Stone Rich".to_string(),
                condition: AchievementCondition::SpiritStonesAtLeast(100_000),
                reward: AchievementReward {
                    spirit_stones: 0,
                    exp: 10_000,
                    qi: 5_000,
                    base_power: 150,
                },
            },
        ],
        techniques: TechniqueTables {
            sects: vec![
                "Azure Peak".to_string(),
                "Blood Lotus".to_string(),
                "Drifting Cloud".to_string(),
                "Iron Pagoda".to_string(),
                "Silent Thunder".to_string(),
            ],
            types: vec![
                TechniqueTypeDef {
                    name: "Sword Art".to_string(),
                    bonus_min: 5.0,
                    bonus_max: 15.0,
                },
                TechniqueTypeDef {
                    name: "Palm Strike".to_string(),
                    bonus_min: 3.0,
                    bonus_max: 10.0,
                },
                TechniqueTypeDef {
                    name: "Body Tempering".to_string(),
                    bonus_min: 8.0,
                    bonus_max: 12.0,
                },
                TechniqueTypeDef {
                    name: "Soul Incantation".to_string(),
                    bonus_min: 10.0,
                    bonus_max: 25.0,
                },
            ],
            elements: vec![
                Element::Fire,
                Element::Water,
                Element::Earth,
                Element::Wood,
                Element::Metal,
                Element::Lightning,
                Element::Light,
                Element::Dark,
            ],
        },
    };

    debug_assert!(bundle.validate().is_ok());
    bundle
}
