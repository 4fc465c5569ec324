//! Runtime wrappers around static catalog data.
//!
//! [`OracleManager`] owns a [`ContentBundle`] and exposes the `game-core`
//! oracle traits over it, bundling everything into a [`WorldEnv`] on demand.
//! The data is immutable at runtime; dynamic state lives in the world
//! worker's registries and the repositories.

use std::sync::Arc;

use game_content::ContentBundle;
use game_core::{
    AchievementDef, AchievementOracle, BossDef, BossOracle, CultivationOracle, RaceDef, RealmDef,
    SetBonusDef, SetBonusOracle, TechniqueOracle, TechniqueTables, WorldEnv,
};

/// Manages catalog access and provides the rules' environment aggregate.
#[derive(Clone)]
pub struct OracleManager {
    content: Arc<ContentBundle>,
}

impl OracleManager {
    pub fn new(content: ContentBundle) -> Self {
        Self {
            content: Arc::new(content),
        }
    }

    /// Converts the manager into the environment `game-core` consumes.
    pub fn as_world_env(&self) -> WorldEnv<'_> {
        WorldEnv {
            cultivation: self,
            bosses: self,
            set_bonuses: self,
            achievements: self,
            techniques: self,
        }
    }

    /// Starting realm/stage for new registrations.
    pub fn starting_point(&self) -> Option<(&str, &str)> {
        self.content.starting_point()
    }

    pub fn content(&self) -> &ContentBundle {
        &self.content
    }
}

impl CultivationOracle for OracleManager {
    fn realms(&self) -> &[RealmDef] {
        &self.content.realms
    }

    fn races(&self) -> &[RaceDef] {
        &self.content.races
    }
}

impl BossOracle for OracleManager {
    fn bosses(&self) -> &[BossDef] {
        &self.content.bosses
    }
}

impl SetBonusOracle for OracleManager {
    fn set_bonus(&self, set: &str) -> Option<SetBonusDef> {
        self.content.set_bonuses.get(set).copied()
    }
}

impl AchievementOracle for OracleManager {
    fn achievements(&self) -> &[AchievementDef] {
        &self.content.achievements
    }
}

impl TechniqueOracle for OracleManager {
    fn tables(&self) -> &TechniqueTables {
        &self.content.techniques
    }
}
