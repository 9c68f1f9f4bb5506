//! Free flight after release.

use super::{FireballContext, ABILITY_FIREBALL};
use crate::config::FireballSettings;
use crate::host::{DamageSource, Explosion, Nearby};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Vertical kick applied to anything a fireball shoves.
const KNOCKBACK_LIFT: f64 = 0.08;

/// Share of the separation vector used to shove non-living entities.
const SHOVE_FACTOR: f64 = 0.3;

/// State of a thrown fireball.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thrown {
    /// Ticks since release.
    pub time: u32,
}

impl Thrown {
    pub(crate) fn update(&mut self, ctx: &mut FireballContext<'_>) {
        self.time = self.time.saturating_add(1);
        let settings = &ctx.rules.settings;

        let burnt_out = !ctx.world.is_remote() && self.time >= settings.lifetime_ticks;
        if ctx.body.is_collided() || burnt_out {
            trace!(entity = %ctx.body.id(), time = self.time, "fireball expired");
            ctx.body.set_dead();
            ctx.body.on_collide_with_solid(explosion(settings));
        }

        let velocity = ctx.body.velocity() - DVec3::new(0.0, settings.gravity, 0.0);
        ctx.body.set_velocity(velocity);

        if ctx.body.is_dead() {
            return;
        }

        let bounds = ctx.body.bounding_box().grow(settings.hitbox_expansion);
        let nearby = ctx.world.entities_within(&bounds, ctx.body.id());
        let Some(hit) = nearby.into_iter().next() else {
            return;
        };

        let owner = ctx.body.owner();
        if owner.is_some() && hit.actor == owner {
            return;
        }

        if hit.living {
            strike(&hit, ctx);
        } else {
            let mut shove = (hit.position - ctx.body.position()) * SHOVE_FACTOR;
            shove.y = KNOCKBACK_LIFT;
            ctx.world.add_velocity(hit.id, shove);
        }
    }
}

/// Hit a living target: burn it, knock it back and credit the owner.
fn strike(target: &Nearby, ctx: &mut FireballContext<'_>) {
    let settings = &ctx.rules.settings;
    let owner = ctx.body.owner();

    trace!(entity = %ctx.body.id(), target = %target.id, "fireball hit");
    ctx.world
        .attack(target.id, DamageSource::fireball(owner), settings.damage);
    ctx.world.set_fire(target.id, settings.fire_time);

    let mut knockback = ctx.body.velocity() / 20.0 * settings.push;
    knockback.y = KNOCKBACK_LIFT;
    ctx.world.add_velocity(target.id, knockback);

    if !ctx.world.is_remote() {
        if let Some(owner) = owner {
            ctx.progression
                .add_experience(owner, ABILITY_FIREBALL, ctx.rules.hit_experience);
        }
        ctx.body.set_dead();
    }
    ctx.body.on_collide_with_solid(explosion(settings));
}

fn explosion(settings: &FireballSettings) -> Explosion {
    Explosion {
        strength: settings.explosion_size,
        damage_blocks: settings.damage_blocks,
    }
}
