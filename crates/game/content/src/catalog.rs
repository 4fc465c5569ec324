//! The catalog bundle: every static table the rules consume.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use game_core::{AchievementDef, BossDef, RaceDef, RealmDef, SetBonusDef, TechniqueTables};

/// All static world data, injected into the runtime at construction.
///
/// Immutable after load; the only mutable boss field (`last_spawn_time`)
/// lives in the runtime's registries, never here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentBundle {
    pub realms: Vec<RealmDef>,
    pub races: Vec<RaceDef>,
    pub bosses: Vec<BossDef>,
    /// Set name → piece-count bonus thresholds.
    pub set_bonuses: BTreeMap<String, SetBonusDef>,
    pub achievements: Vec<AchievementDef>,
    pub techniques: TechniqueTables,
}

impl ContentBundle {
    /// Starting realm/stage for newly registered players.
    ///
    /// The ladder is validated non-empty at load time, so this only returns
    /// `None` for a hand-built bundle that skipped validation.
    pub fn starting_point(&self) -> Option<(&str, &str)> {
        let realm = self.realms.first()?;
        let stage = realm.stages.first()?;
        Some((realm.name.as_str(), stage.as_str()))
    }

    /// Structural sanity checks shared by builtin and loaded bundles.
    pub fn validate(&self) -> Result<(), String> {
        if self.realms.is_empty() {
            return Err("realm ladder is empty".into());
        }
        if let Some(realm) = self.realms.iter().find(|r| r.stages.is_empty()) {
            return Err(format!("realm '{}' has no stages", realm.name));
        }
        if let Some(boss) = self.bosses.iter().find(|b| b.max_health == 0) {
            return Err(format!("boss '{}' has zero health", boss.name));
        }
        if let Some(boss) = self.bosses.iter().find(|b| b.damage.min > b.damage.max) {
            return Err(format!("boss '{}' has an inverted damage range", boss.name));
        }
        Ok(())
    }
}
