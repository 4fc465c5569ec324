#![allow(dead_code)]

use std::collections::BTreeMap;
use std::time::Duration;

use game_content::ContentBundle;
use game_core::{
    BossDef, DamageRange, Element, RaceDef, RealmDef, RewardBase, TechniqueTables,
    TechniqueTypeDef,
};
use runtime::{BossState, RuntimeConfig, RuntimeHandle};

/// Route worker logs through the test harness when `RUST_LOG` is set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A boss definition with test-friendly numbers.
pub fn boss(name: &str, max_health: u64, damage: DamageRange) -> BossDef {
    BossDef {
        name: name.into(),
        flavor: "A terror of the wastes".into(),
        level: 10,
        max_health,
        damage,
        rewards: RewardBase {
            exp: 300,
            qi: 200,
            spirit_stones: 100,
        },
        element: Element::Fire,
        weakness: Some(Element::Water),
        min_players: 2,
        max_players: 10,
        spawn_interval_secs: 3_600,
        drop_table: Vec::new(),
        full_set_bonus: 0,
    }
}

/// Minimal catalog: one realm, one race, the given bosses.
pub fn content(bosses: Vec<BossDef>) -> ContentBundle {
    ContentBundle {
        realms: vec![RealmDef {
            name: "Qi Condensation".into(),
            exp_multiplier: 1.0,
            stages: vec!["Early".into(), "Middle".into(), "Late".into(), "Peak".into()],
        }],
        races: vec![RaceDef {
            name: "Human".into(),
            exp_multiplier: 1.0,
        }],
        bosses,
        set_bonuses: BTreeMap::new(),
        achievements: Vec::new(),
        techniques: TechniqueTables {
            sects: vec!["Azure Cloud".into()],
            types: vec![TechniqueTypeDef {
                name: "Sword Art".into(),
                bonus_min: 1.0,
                bonus_max: 5.0,
            }],
            elements: vec![Element::Fire],
        },
    }
}

/// Millisecond pacing so battles resolve within a test run.
pub fn fast_config() -> RuntimeConfig {
    RuntimeConfig {
        round_delay: Duration::from_millis(20),
        battle_deadline: Duration::from_secs(60),
        spawn_check_interval: Duration::from_millis(25),
        maintenance_interval: Duration::from_secs(3_600),
        party_inactivity: Duration::from_secs(3_600),
        ..RuntimeConfig::default()
    }
}

/// Poll boss status until the named boss reports as spawned.
pub async fn wait_for_spawn(handle: &RuntimeHandle, boss: &str) {
    for _ in 0..400 {
        let status = handle.world_boss_status().await.expect("status query");
        let spawned = status
            .iter()
            .any(|s| s.name == boss && matches!(s.state, BossState::Spawned { .. }));
        if spawned {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("boss '{boss}' never spawned");
}
