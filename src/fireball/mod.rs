//! Fireball behaviors.
//!
//! A fireball entity carries exactly one [`FireballBehavior`]:
//!
//! - `Idle`: resting, does nothing
//! - `PlayerControlled`: hovers in front of its owner's eyes and may grow
//! - `Thrown`: falls under gravity, burns what it hits, burns out after a while
//!
//! The behavior is ticked through a [`BehaviorMachine`] and synced with the
//! registry built by [`registry`].

mod context;
mod controlled;
mod thrown;

pub use context::{FireballContext, FireballRules};
pub use thrown::Thrown;

use crate::codec::{self, CodecError, VariantFields};
use crate::core::Behavior;
use crate::machine::{BehaviorMachine, StepResult, Transition, Update};
use crate::host::Body;
use crate::registry::{BehaviorRegistry, BuildError};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Ability id credited for fireball hits.
pub const ABILITY_FIREBALL: &str = "fireball";

/// Behavior of one fireball entity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum FireballBehavior {
    #[default]
    Idle,
    PlayerControlled,
    Thrown(Thrown),
}

impl FireballBehavior {
    /// Freshly released fireball.
    pub fn thrown() -> Self {
        Self::Thrown(Thrown::default())
    }
}

impl Behavior for FireballBehavior {
    fn name(&self) -> &str {
        match self {
            Self::Idle => "Idle",
            Self::PlayerControlled => "PlayerControlled",
            Self::Thrown(_) => "Thrown",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl VariantFields for FireballBehavior {
    fn write_fields(&self) -> Result<Vec<u8>, CodecError> {
        match self {
            Self::Thrown(thrown) => codec::to_bytes(thrown),
            Self::Idle | Self::PlayerControlled => Ok(Vec::new()),
        }
    }

    fn read_fields(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        match self {
            Self::Thrown(thrown) => {
                *thrown = codec::from_bytes(bytes)?;
                Ok(())
            }
            Self::Idle | Self::PlayerControlled => codec::expect_no_fields(bytes),
        }
    }

    fn save_fields(&self) -> Result<serde_json::Value, CodecError> {
        match self {
            Self::Thrown(thrown) => codec::to_value(thrown),
            Self::Idle | Self::PlayerControlled => Ok(serde_json::json!({})),
        }
    }

    fn load_fields(&mut self, fields: &serde_json::Value) -> Result<(), CodecError> {
        if let Self::Thrown(thrown) = self {
            *thrown = codec::from_value(fields)?;
        }
        Ok(())
    }
}

impl<'a> Update<FireballContext<'a>> for FireballBehavior {
    fn update(&mut self, ctx: &mut FireballContext<'a>, _tick: u64) -> Transition<Self> {
        match self {
            Self::Idle => {}
            Self::PlayerControlled => controlled::update(ctx),
            Self::Thrown(thrown) => thrown.update(ctx),
        }
        Transition::Stay
    }
}

/// Registry of fireball behaviors: Idle (1), PlayerControlled (2), Thrown (3).
pub fn registry() -> Result<BehaviorRegistry<FireballBehavior>, BuildError> {
    let mut builder = BehaviorRegistry::builder();
    builder.register("Idle", || FireballBehavior::Idle)?;
    builder.register("PlayerControlled", || FireballBehavior::PlayerControlled)?;
    builder.register("Thrown", FireballBehavior::thrown)?;
    builder.build()
}

/// Release a fireball with the given launch velocity.
pub fn throw(
    machine: &mut BehaviorMachine<FireballBehavior>,
    body: &mut dyn Body,
    velocity: DVec3,
    tick: u64,
) -> StepResult<FireballBehavior> {
    body.set_velocity(velocity);
    machine.set(FireballBehavior::thrown(), tick)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::Guard;
    use crate::host::{
        AbilityProgress, ActorId, Aabb, Aim, DamageKind, DamageSource, EntityId, Explosion,
        Nearby, Progression, TreePath, World,
    };
    use crate::registry::BehaviorId;
    use std::collections::HashMap;

    struct TestBody {
        id: EntityId,
        owner: Option<ActorId>,
        position: DVec3,
        velocity: DVec3,
        collided: bool,
        dead: bool,
        impacts: u32,
        last_explosion: Option<Explosion>,
        size: u32,
        ticks: u64,
    }

    impl TestBody {
        fn new(owner: Option<ActorId>) -> Self {
            Self {
                id: EntityId::random(),
                owner,
                position: DVec3::new(0.0, 64.0, 0.0),
                velocity: DVec3::ZERO,
                collided: false,
                dead: false,
                impacts: 0,
                last_explosion: None,
                size: 16,
                ticks: 0,
            }
        }
    }

    impl Body for TestBody {
        fn id(&self) -> EntityId {
            self.id
        }
        fn owner(&self) -> Option<ActorId> {
            self.owner
        }
        fn position(&self) -> DVec3 {
            self.position
        }
        fn velocity(&self) -> DVec3 {
            self.velocity
        }
        fn set_velocity(&mut self, velocity: DVec3) {
            self.velocity = velocity;
        }
        fn bounding_box(&self) -> Aabb {
            Aabb::standing(self.position, 0.5, 0.5)
        }
        fn is_collided(&self) -> bool {
            self.collided
        }
        fn is_dead(&self) -> bool {
            self.dead
        }
        fn set_dead(&mut self) {
            self.dead = true;
        }
        fn on_collide_with_solid(&mut self, explosion: Explosion) {
            self.impacts += 1;
            self.last_explosion = Some(explosion);
        }
        fn size(&self) -> u32 {
            self.size
        }
        fn set_size(&mut self, size: u32) {
            self.size = size;
        }
        fn ticks_existed(&self) -> u64 {
            self.ticks
        }
    }

    #[derive(Default)]
    struct TestWorld {
        remote: bool,
        nearby: Vec<Nearby>,
        aims: HashMap<ActorId, Aim>,
        attacks: Vec<(EntityId, DamageSource, f32)>,
        fires: Vec<(EntityId, u32)>,
        pushes: Vec<(EntityId, DVec3)>,
    }

    impl World for TestWorld {
        fn is_remote(&self) -> bool {
            self.remote
        }
        fn entities_within(&self, _bounds: &Aabb, exclude: EntityId) -> Vec<Nearby> {
            self.nearby.iter().filter(|n| n.id != exclude).cloned().collect()
        }
        fn attack(&mut self, target: EntityId, source: DamageSource, amount: f32) {
            self.attacks.push((target, source, amount));
        }
        fn set_fire(&mut self, target: EntityId, seconds: u32) {
            self.fires.push((target, seconds));
        }
        fn add_velocity(&mut self, target: EntityId, velocity: DVec3) {
            self.pushes.push((target, velocity));
        }
        fn aim(&self, actor: ActorId) -> Option<Aim> {
            self.aims.get(&actor).copied()
        }
    }

    #[derive(Default)]
    struct TestProgression {
        granted: Vec<(ActorId, String, f32)>,
        progress: Option<AbilityProgress>,
    }

    impl Progression for TestProgression {
        fn add_experience(&mut self, actor: ActorId, ability: &str, amount: f32) {
            self.granted.push((actor, ability.to_string(), amount));
        }
        fn progress(&self, _actor: ActorId, _ability: &str) -> Option<AbilityProgress> {
            self.progress
        }
    }

    fn run(
        behavior: &mut FireballBehavior,
        body: &mut TestBody,
        world: &mut TestWorld,
        progression: &mut TestProgression,
        rules: &FireballRules,
    ) -> Transition<FireballBehavior> {
        let mut ctx = FireballContext {
            body,
            world,
            progression,
            rules,
        };
        behavior.update(&mut ctx, 0)
    }

    fn living(id: EntityId, actor: Option<ActorId>) -> Nearby {
        Nearby {
            id,
            position: DVec3::new(0.5, 64.0, 0.0),
            living: true,
            actor,
        }
    }

    #[test]
    fn idle_never_touches_the_entity() {
        let rules = FireballRules::default();
        let mut body = TestBody::new(Some(ActorId::random()));
        body.velocity = DVec3::new(1.0, 2.0, 3.0);
        let mut world = TestWorld::default();
        world.nearby.push(living(EntityId::random(), None));
        let mut progression = TestProgression::default();
        let mut behavior = FireballBehavior::Idle;

        for _ in 0..10 {
            let result = run(&mut behavior, &mut body, &mut world, &mut progression, &rules);
            assert!(result.is_stay());
        }

        assert_eq!(body.velocity, DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(body.position, DVec3::new(0.0, 64.0, 0.0));
        assert!(!body.dead);
        assert!(world.attacks.is_empty() && world.pushes.is_empty());
        assert_eq!(behavior, FireballBehavior::Idle);
    }

    #[test]
    fn thrown_applies_gravity_each_tick() {
        let rules = FireballRules::default();
        let mut body = TestBody::new(None);
        let mut world = TestWorld::default();
        let mut progression = TestProgression::default();
        let mut behavior = FireballBehavior::thrown();

        run(&mut behavior, &mut body, &mut world, &mut progression, &rules);
        run(&mut behavior, &mut body, &mut world, &mut progression, &rules);

        assert!((body.velocity.y + 2.0 * 9.81 / 40.0).abs() < 1e-9);
        assert_eq!(behavior, FireballBehavior::Thrown(Thrown { time: 2 }));
    }

    #[test]
    fn thrown_burns_out_after_lifetime() {
        let rules = FireballRules::default();
        let mut body = TestBody::new(None);
        let mut world = TestWorld::default();
        let mut progression = TestProgression::default();
        let mut behavior = FireballBehavior::thrown();

        for _ in 0..99 {
            run(&mut behavior, &mut body, &mut world, &mut progression, &rules);
        }
        assert!(!body.dead);
        assert_eq!(body.impacts, 0);

        run(&mut behavior, &mut body, &mut world, &mut progression, &rules);
        assert!(body.dead);
        assert_eq!(body.impacts, 1);
    }

    #[test]
    fn thrown_does_not_burn_out_on_client() {
        let rules = FireballRules::default();
        let mut body = TestBody::new(None);
        let mut world = TestWorld {
            remote: true,
            ..TestWorld::default()
        };
        let mut progression = TestProgression::default();
        let mut behavior = FireballBehavior::thrown();

        for _ in 0..150 {
            run(&mut behavior, &mut body, &mut world, &mut progression, &rules);
        }
        assert!(!body.dead);
    }

    #[test]
    fn thrown_dies_on_solid_collision() {
        let rules = FireballRules::default();
        let mut body = TestBody::new(None);
        body.collided = true;
        let mut world = TestWorld::default();
        world.nearby.push(living(EntityId::random(), None));
        let mut progression = TestProgression::default();
        let mut behavior = FireballBehavior::thrown();

        run(&mut behavior, &mut body, &mut world, &mut progression, &rules);

        assert!(body.dead);
        assert_eq!(body.impacts, 1);
        assert!(world.attacks.is_empty(), "dead fireballs hit nothing");
    }

    #[test]
    fn thrown_strikes_living_target_and_credits_owner() {
        let rules = FireballRules::default();
        let owner = ActorId::random();
        let target = EntityId::random();
        let mut body = TestBody::new(Some(owner));
        body.velocity = DVec3::new(2.0, 0.0, 0.0);
        let mut world = TestWorld::default();
        world.nearby.push(living(target, None));
        let mut progression = TestProgression::default();
        let mut behavior = FireballBehavior::thrown();

        run(&mut behavior, &mut body, &mut world, &mut progression, &rules);

        assert_eq!(world.attacks.len(), 1);
        let (hit, source, amount) = world.attacks[0];
        assert_eq!(hit, target);
        assert_eq!(source.kind, DamageKind::Fireball);
        assert_eq!(source.attacker, Some(owner));
        assert_eq!(amount, 6.0);
        assert_eq!(world.fires, vec![(target, 6)]);

        let (pushed, knockback) = world.pushes[0];
        assert_eq!(pushed, target);
        assert!((knockback.x - 2.0 / 20.0 * 0.75).abs() < 1e-9);
        assert_eq!(knockback.y, 0.08);

        assert_eq!(
            progression.granted,
            vec![(owner, ABILITY_FIREBALL.to_string(), 5.0)]
        );
        assert!(body.dead);
        assert_eq!(body.impacts, 1);
    }

    #[test]
    fn configured_damage_and_blast_reach_the_host() {
        let mut config = Config::default();
        config.fireball.damage = 8.0;
        config.fireball.explosion_size = 3.0;
        config.fireball.damage_blocks = true;
        let rules = FireballRules::from_config(&config);
        let target = EntityId::random();
        let mut body = TestBody::new(Some(ActorId::random()));
        let mut world = TestWorld::default();
        world.nearby.push(living(target, None));
        let mut progression = TestProgression::default();
        let mut behavior = FireballBehavior::thrown();

        run(&mut behavior, &mut body, &mut world, &mut progression, &rules);

        assert_eq!(world.attacks.len(), 1);
        assert_eq!(world.attacks[0].2, 8.0);
        assert_eq!(
            body.last_explosion,
            Some(Explosion {
                strength: 3.0,
                damage_blocks: true
            })
        );
    }

    #[test]
    fn thrown_ignores_its_owner() {
        let rules = FireballRules::default();
        let owner = ActorId::random();
        let mut body = TestBody::new(Some(owner));
        let mut world = TestWorld::default();
        world.nearby.push(living(EntityId::random(), Some(owner)));
        let mut progression = TestProgression::default();
        let mut behavior = FireballBehavior::thrown();

        run(&mut behavior, &mut body, &mut world, &mut progression, &rules);

        assert!(world.attacks.is_empty());
        assert!(world.pushes.is_empty());
        assert!(!body.dead);
    }

    #[test]
    fn thrown_shoves_non_living_entities() {
        let rules = FireballRules::default();
        let crate_id = EntityId::random();
        let mut body = TestBody::new(None);
        let mut world = TestWorld::default();
        world.nearby.push(Nearby {
            id: crate_id,
            position: DVec3::new(1.0, 64.0, 0.0),
            living: false,
            actor: None,
        });
        let mut progression = TestProgression::default();
        let mut behavior = FireballBehavior::thrown();

        run(&mut behavior, &mut body, &mut world, &mut progression, &rules);

        assert!(world.attacks.is_empty());
        assert_eq!(world.pushes, vec![(crate_id, DVec3::new(0.3, 0.08, 0.0))]);
        assert!(!body.dead);
    }

    #[test]
    fn client_hit_plays_impact_without_kill_or_experience() {
        let rules = FireballRules::default();
        let owner = ActorId::random();
        let mut body = TestBody::new(Some(owner));
        let mut world = TestWorld {
            remote: true,
            ..TestWorld::default()
        };
        world.nearby.push(living(EntityId::random(), None));
        let mut progression = TestProgression::default();
        let mut behavior = FireballBehavior::thrown();

        run(&mut behavior, &mut body, &mut world, &mut progression, &rules);

        assert!(!body.dead);
        assert_eq!(body.impacts, 1);
        assert!(progression.granted.is_empty());
    }

    fn controlled_setup() -> (ActorId, TestBody, TestWorld) {
        let owner = ActorId::random();
        let body = TestBody::new(Some(owner));
        let mut world = TestWorld::default();
        world.aims.insert(
            owner,
            Aim {
                eye: DVec3::new(0.0, 65.6, 0.0),
                yaw: 0.0,
                pitch: 0.0,
            },
        );
        (owner, body, world)
    }

    #[test]
    fn controlled_pulls_toward_hover_point() {
        let rules = FireballRules::default();
        let (_, mut body, mut world) = controlled_setup();
        let mut progression = TestProgression::default();
        let mut behavior = FireballBehavior::PlayerControlled;

        run(&mut behavior, &mut body, &mut world, &mut progression, &rules);

        let expected = (DVec3::new(0.0, 65.6, 2.0) - body.position) * 5.0;
        assert!((body.velocity - expected).length() < 1e-9);
        assert_eq!(body.size, 16);
    }

    #[test]
    fn controlled_without_owner_or_aim_does_nothing() {
        let rules = FireballRules::default();
        let mut progression = TestProgression::default();
        let mut behavior = FireballBehavior::PlayerControlled;

        let mut orphan = TestBody::new(None);
        orphan.velocity = DVec3::X;
        let mut world = TestWorld::default();
        run(&mut behavior, &mut orphan, &mut world, &mut progression, &rules);
        assert_eq!(orphan.velocity, DVec3::X);

        let mut absent = TestBody::new(Some(ActorId::random()));
        absent.velocity = DVec3::X;
        run(&mut behavior, &mut absent, &mut world, &mut progression, &rules);
        assert_eq!(absent.velocity, DVec3::X);
    }

    #[test]
    fn controlled_grows_for_masters_on_interval() {
        let rules = FireballRules::default();
        let (_, mut body, mut world) = controlled_setup();
        let mut progression = TestProgression {
            progress: Some(AbilityProgress {
                level: 3,
                xp: 100.0,
                path: TreePath::Second,
            }),
            ..TestProgression::default()
        };
        let mut behavior = FireballBehavior::PlayerControlled;

        body.ticks = 8;
        run(&mut behavior, &mut body, &mut world, &mut progression, &rules);
        assert_eq!(body.size, 17);

        body.ticks = 9;
        run(&mut behavior, &mut body, &mut world, &mut progression, &rules);
        assert_eq!(body.size, 17);

        body.ticks = 12;
        body.size = 60;
        run(&mut behavior, &mut body, &mut world, &mut progression, &rules);
        assert_eq!(body.size, 60);
    }

    #[test]
    fn growth_follows_the_configured_guard() {
        let rules = FireballRules::default().with_growth(Guard::never());
        let (_, mut body, mut world) = controlled_setup();
        let mut progression = TestProgression {
            progress: Some(AbilityProgress {
                level: 3,
                xp: 100.0,
                path: TreePath::Second,
            }),
            ..TestProgression::default()
        };
        let mut behavior = FireballBehavior::PlayerControlled;

        run(&mut behavior, &mut body, &mut world, &mut progression, &rules);
        assert_eq!(body.size, 16);
    }

    #[test]
    fn registry_assigns_ids_in_registration_order() {
        let registry = registry().unwrap();

        assert_eq!(registry.id_of(&FireballBehavior::Idle), Some(BehaviorId(1)));
        assert_eq!(
            registry.id_of(&FireballBehavior::PlayerControlled),
            Some(BehaviorId(2))
        );
        assert_eq!(
            registry.id_of(&FireballBehavior::Thrown(Thrown { time: 40 })),
            Some(BehaviorId(3))
        );
        assert_eq!(registry.fallback(), FireballBehavior::Idle);
    }

    #[test]
    fn thrown_time_survives_both_encodings() {
        let registry = registry().unwrap();
        let behavior = FireballBehavior::Thrown(Thrown { time: 57 });

        let bytes = registry.encode(&behavior).unwrap();
        assert_eq!(registry.decode(&bytes).unwrap(), behavior);

        let record = registry.save(&behavior).unwrap();
        assert_eq!(record.fields, serde_json::json!({ "time": 57 }));
        assert_eq!(registry.load(&record).unwrap(), behavior);
    }

    #[test]
    fn payload_with_leftover_bytes_is_rejected() {
        let registry = registry().unwrap();

        assert_eq!(
            registry.decode(&[2, 0xFF, 0xFF]),
            Err(CodecError::TrailingBytes(2))
        );
        assert_eq!(
            registry.decode(&[3, 5, 0, 0, 0]).unwrap(),
            FireballBehavior::Thrown(Thrown { time: 5 })
        );
        assert!(registry.decode(&[3, 5, 0, 0, 0, 9]).is_err());
        assert!(registry.decode(&[3, 5, 0]).is_err());
    }

    #[test]
    fn unknown_id_decodes_to_idle() {
        let registry = registry().unwrap();
        assert_eq!(
            registry.decode(&[42]),
            Err(CodecError::UnknownVariant(42))
        );
        assert_eq!(registry.decode_or_fallback(&[42]), FireballBehavior::Idle);
    }

    #[test]
    fn throw_releases_a_held_fireball() {
        let mut machine = BehaviorMachine::new(FireballBehavior::PlayerControlled);
        machine.take_sync();
        let mut body = TestBody::new(None);

        let result = throw(&mut machine, &mut body, DVec3::new(0.0, 0.5, 1.5), 20);

        assert!(result.is_transition());
        assert_eq!(machine.current(), &FireballBehavior::thrown());
        assert_eq!(body.velocity, DVec3::new(0.0, 0.5, 1.5));
        assert!(machine.take_sync());
    }
}
