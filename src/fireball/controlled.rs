//! Fireball held in front of its owner.

use super::{FireballContext, ABILITY_FIREBALL};

pub(crate) fn update(ctx: &mut FireballContext<'_>) {
    let Some(owner) = ctx.body.owner() else {
        return;
    };
    let Some(aim) = ctx.world.aim(owner) else {
        return;
    };
    let settings = &ctx.rules.settings;

    let target = aim.eye + aim.forward() * settings.control_distance;
    let motion = (target - ctx.body.position()) * settings.control_speed;
    ctx.body.set_velocity(motion);

    let grows = ctx
        .progression
        .progress(owner, ABILITY_FIREBALL)
        .is_some_and(|progress| ctx.rules.growth.check(&progress));
    if grows {
        let size = ctx.body.size();
        let on_interval = ctx.body.ticks_existed().checked_rem(settings.growth_interval) == Some(0);
        if size < settings.max_size && on_interval {
            ctx.body.set_size(size + 1);
        }
    }
}
