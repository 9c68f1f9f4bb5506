//! Gameplay settings read once at startup.
//!
//! Settings are deserialized from TOML. Every section and field is optional
//! and falls back to the stock values, so an empty file is a valid config.
//!
//! # Example
//!
//! ```rust
//! use bending::config::Config;
//!
//! let config = Config::from_toml_str(r#"
//!     [fireball]
//!     damage = 8.0
//!
//!     [transfer]
//!     confirm_ticks = 200
//! "#).unwrap();
//!
//! assert_eq!(config.fireball.damage, 8.0);
//! assert_eq!(config.fireball.fire_time, 6);
//! assert_eq!(config.transfer.confirm_ticks, 200);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use stillwater::validation::Validation;
use tracing::{info, warn};

pub mod error;
pub mod validation;

pub use error::ConfigError;
pub use validation::{validate, ConfigCheck, ConfigViolation};

/// Root of the settings file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fireball: FireballSettings,
    pub skills: SkillsSettings,
    pub transfer: TransferSettings,
}

/// Fireball stats and flight tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireballSettings {
    pub damage: f32,
    /// Seconds a hit target burns.
    pub fire_time: u32,
    pub explosion_size: f32,
    pub damage_blocks: bool,
    /// Knockback multiplier on hit.
    pub push: f64,
    /// Downward acceleration per tick while thrown.
    pub gravity: f64,
    /// Ticks a thrown fireball flies before it burns out.
    pub lifetime_ticks: u32,
    /// Growth of the hitbox used for entity hits.
    pub hitbox_expansion: f64,
    /// Distance in front of the eyes a controlled fireball hovers at.
    pub control_distance: f64,
    /// Velocity multiplier pulling a controlled fireball to its hover point.
    pub control_speed: f64,
    pub max_size: u32,
    /// A controlled fireball grows once every this many ticks.
    pub growth_interval: u64,
}

impl Default for FireballSettings {
    fn default() -> Self {
        Self {
            damage: 6.0,
            fire_time: 6,
            explosion_size: 1.5,
            damage_blocks: false,
            push: 0.75,
            gravity: 9.81 / 40.0,
            lifetime_ticks: 100,
            hitbox_expansion: 0.35,
            control_distance: 2.0,
            control_speed: 5.0,
            max_size: 60,
            growth_interval: 4,
        }
    }
}

/// Experience granted for ability use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsSettings {
    pub fireball_hit: f32,
}

impl Default for SkillsSettings {
    fn default() -> Self {
        Self { fireball_hit: 5.0 }
    }
}

/// Ownership transfer window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferSettings {
    /// Ticks the initiator has to confirm.
    pub confirm_ticks: u32,
}

impl Default for TransferSettings {
    fn default() -> Self {
        Self { confirm_ticks: 100 }
    }
}

impl Config {
    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a settings file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!(path = %path.display(), "loaded settings");
        Ok(config)
    }

    /// Read a settings file, using the stock settings when it is missing.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(path = %path.display(), "settings file missing, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Check every setting, reporting all violations at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match validate(self) {
            Validation::Success(()) => Ok(()),
            Validation::Failure(violations) => {
                for violation in violations.iter() {
                    warn!(field = violation.field, "{}", violation.message);
                }
                Err(ConfigError::Invalid(violations))
            }
        }
    }
}
