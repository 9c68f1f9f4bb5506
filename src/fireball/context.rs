//! Host access and tuning handed to fireball behaviors each tick.

use crate::config::{Config, FireballSettings};
use crate::core::Guard;
use crate::host::{AbilityProgress, Body, Progression, TreePath, World};

/// Tuning shared by every fireball, built once from [`Config`].
#[derive(Clone, Debug)]
pub struct FireballRules {
    pub settings: FireballSettings,
    /// Experience granted to the owner on an entity hit.
    pub hit_experience: f32,
    /// Whether a controlled fireball may grow for its owner.
    pub growth: Guard<AbilityProgress>,
}

impl FireballRules {
    pub fn from_config(config: &Config) -> Self {
        Self {
            settings: config.fireball.clone(),
            hit_experience: config.skills.fireball_hit,
            growth: Guard::new(|progress: &AbilityProgress| {
                progress.is_master_path(TreePath::Second)
            }),
        }
    }

    pub fn with_growth(mut self, growth: Guard<AbilityProgress>) -> Self {
        self.growth = growth;
        self
    }
}

impl Default for FireballRules {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Everything a fireball behavior may touch during one tick.
pub struct FireballContext<'a> {
    pub body: &'a mut dyn Body,
    pub world: &'a mut dyn World,
    pub progression: &'a mut dyn Progression,
    pub rules: &'a FireballRules,
}
