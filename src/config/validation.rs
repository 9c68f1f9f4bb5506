//! Validation of loaded settings.
//!
//! Every check runs and every violation is collected, so a broken config file
//! is reported in one pass instead of one field at a time.

use crate::config::Config;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single setting outside its allowed range
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{field}: {message}")]
pub struct ConfigViolation {
    pub field: &'static str,
    pub message: String,
}

impl ConfigViolation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Outcome of a single setting check
pub type ConfigCheck = Validation<(), NonEmptyVec<ConfigViolation>>;

fn require(ok: bool, field: &'static str, message: &str) -> ConfigCheck {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::new(field, message))
    }
}

fn non_negative_f32(value: f32, field: &'static str) -> ConfigCheck {
    require(value.is_finite() && value >= 0.0, field, "must be a non-negative number")
}

fn finite(value: f64, field: &'static str) -> ConfigCheck {
    require(value.is_finite(), field, "must be a finite number")
}

/// Run all checks, accumulating ALL violations.
pub fn validate(config: &Config) -> ConfigCheck {
    let fireball = &config.fireball;

    let checks = vec![
        non_negative_f32(fireball.damage, "fireball.damage"),
        non_negative_f32(fireball.explosion_size, "fireball.explosion_size"),
        finite(fireball.push, "fireball.push"),
        finite(fireball.gravity, "fireball.gravity"),
        require(
            fireball.lifetime_ticks > 0,
            "fireball.lifetime_ticks",
            "must be at least 1",
        ),
        require(
            fireball.hitbox_expansion.is_finite() && fireball.hitbox_expansion >= 0.0,
            "fireball.hitbox_expansion",
            "must be a non-negative number",
        ),
        require(
            fireball.control_distance.is_finite() && fireball.control_distance > 0.0,
            "fireball.control_distance",
            "must be positive",
        ),
        finite(fireball.control_speed, "fireball.control_speed"),
        require(
            fireball.growth_interval > 0,
            "fireball.growth_interval",
            "must be at least 1",
        ),
        non_negative_f32(config.skills.fireball_hit, "skills.fireball_hit"),
        require(
            config.transfer.confirm_ticks > 0,
            "transfer.confirm_ticks",
            "must be at least 1",
        ),
    ];

    Validation::all_vec(checks).map(|_| ())
}
