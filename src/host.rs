//! Capability traits the host engine implements.
//!
//! Nothing in this crate owns an entity, a world or a chat channel. Behaviors
//! and trackers reach the simulation only through the narrow traits below,
//! which a host adapter implements on top of its own types.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::transfer::MessageTemplate;

/// Identity of a controllable agent (player or AI).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity of a simulated entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Box of the given width and height standing on `feet`.
    pub fn standing(feet: DVec3, width: f64, height: f64) -> Self {
        let half = width / 2.0;
        Self::new(
            DVec3::new(feet.x - half, feet.y, feet.z - half),
            DVec3::new(feet.x + half, feet.y + height, feet.z + half),
        )
    }

    /// Grow the box by `amount` in every direction.
    pub fn grow(&self, amount: f64) -> Self {
        Self::new(self.min - DVec3::splat(amount), self.max + DVec3::splat(amount))
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }
}

/// An entity returned by a collision query.
#[derive(Clone, Debug, PartialEq)]
pub struct Nearby {
    pub id: EntityId,
    pub position: DVec3,
    /// Living entities can be damaged and set on fire.
    pub living: bool,
    /// Set when this entity is the body of an actor.
    pub actor: Option<ActorId>,
}

/// Where an actor is looking from, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aim {
    pub eye: DVec3,
    pub yaw: f64,
    pub pitch: f64,
}

impl Aim {
    /// Unit vector in the look direction.
    ///
    /// Yaw 0 faces +Z, positive pitch looks down.
    pub fn forward(&self) -> DVec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        DVec3::new(
            -yaw.sin() * pitch.cos(),
            -pitch.sin(),
            yaw.cos() * pitch.cos(),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageKind {
    Fireball,
}

/// Blast requested when a body hits something.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Explosion {
    pub strength: f32,
    /// Whether the blast may break blocks.
    pub damage_blocks: bool,
}

/// Cause of damage handed to the host when a behavior hurts something.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageSource {
    pub kind: DamageKind,
    pub attacker: Option<ActorId>,
}

impl DamageSource {
    pub fn fireball(attacker: Option<ActorId>) -> Self {
        Self {
            kind: DamageKind::Fireball,
            attacker,
        }
    }
}

/// Branch of an ability's skill tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreePath {
    Main,
    First,
    Second,
}

/// Highest level an ability can reach.
pub const MAX_ABILITY_LEVEL: u32 = 3;

/// Snapshot of an actor's progression in one ability.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbilityProgress {
    pub level: u32,
    pub xp: f32,
    pub path: TreePath,
}

impl AbilityProgress {
    /// Whether the ability is fully levelled along `path`.
    pub fn is_master_path(&self, path: TreePath) -> bool {
        self.level >= MAX_ABILITY_LEVEL && self.path == path
    }
}

/// The entity a behavior is attached to.
pub trait Body {
    fn id(&self) -> EntityId;
    fn owner(&self) -> Option<ActorId>;
    fn position(&self) -> DVec3;
    fn velocity(&self) -> DVec3;
    fn set_velocity(&mut self, velocity: DVec3);
    fn bounding_box(&self) -> Aabb;
    /// Whether the physics step left the body touching a solid.
    fn is_collided(&self) -> bool;
    fn is_dead(&self) -> bool;
    /// Flag the body for removal at the end of the tick.
    fn set_dead(&mut self);
    /// Impact effects: the blast plus particles and sound.
    fn on_collide_with_solid(&mut self, explosion: Explosion);
    fn size(&self) -> u32;
    fn set_size(&mut self, size: u32);
    fn ticks_existed(&self) -> u64;
}

/// World queries and effects on other entities.
pub trait World {
    /// True on the client copy of the simulation.
    fn is_remote(&self) -> bool;
    /// Entities whose bounds intersect `bounds`, nearest first, without `exclude`.
    fn entities_within(&self, bounds: &Aabb, exclude: EntityId) -> Vec<Nearby>;
    fn attack(&mut self, target: EntityId, source: DamageSource, amount: f32);
    fn set_fire(&mut self, target: EntityId, seconds: u32);
    fn add_velocity(&mut self, target: EntityId, velocity: DVec3);
    /// Current aim of an actor, `None` when the actor is not in the world.
    fn aim(&self, actor: ActorId) -> Option<Aim>;
}

/// Ability progression store.
pub trait Progression {
    fn add_experience(&mut self, actor: ActorId, ability: &str, amount: f32);
    fn progress(&self, actor: ActorId, ability: &str) -> Option<AbilityProgress>;
}

/// Fire-and-forget chat channel.
pub trait Notifier {
    fn notify(&mut self, actor: ActorId, template: MessageTemplate, args: &[String]);
}
