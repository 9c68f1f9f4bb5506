//! Fireball Flight
//!
//! This example holds a fireball in front of a master firebender, throws it,
//! and follows it until it burns out.
//!
//! Key concepts:
//! - Host capability traits implemented by a toy world
//! - External transitions via `fireball::throw`
//! - Compact sync payloads and save records mid-flight
//!
//! Run with: cargo run --example fireball_flight

use bending::config::Config;
use bending::core::Behavior;
use bending::fireball::{self, FireballBehavior, FireballContext, FireballRules};
use bending::host::{
    AbilityProgress, Aabb, ActorId, Aim, Body, DamageSource, EntityId, Explosion, Nearby,
    Progression, TreePath, World,
};
use bending::machine::BehaviorMachine;
use glam::DVec3;

struct Ball {
    id: EntityId,
    owner: ActorId,
    position: DVec3,
    velocity: DVec3,
    dead: bool,
    size: u32,
    ticks: u64,
}

impl Body for Ball {
    fn id(&self) -> EntityId {
        self.id
    }
    fn owner(&self) -> Option<ActorId> {
        Some(self.owner)
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
        self.position.y <= 0.0
    }
    fn is_dead(&self) -> bool {
        self.dead
    }
    fn set_dead(&mut self) {
        self.dead = true;
    }
    fn on_collide_with_solid(&mut self, explosion: Explosion) {
        println!(
            "  boom at {:.1?} (strength {}, breaks blocks: {})",
            self.position, explosion.strength, explosion.damage_blocks
        );
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

// An empty field with one bender looking north
struct Field {
    bender: ActorId,
}

impl World for Field {
    fn is_remote(&self) -> bool {
        false
    }
    fn entities_within(&self, _bounds: &Aabb, _exclude: EntityId) -> Vec<Nearby> {
        Vec::new()
    }
    fn attack(&mut self, _target: EntityId, _source: DamageSource, _amount: f32) {}
    fn set_fire(&mut self, _target: EntityId, _seconds: u32) {}
    fn add_velocity(&mut self, _target: EntityId, _velocity: DVec3) {}
    fn aim(&self, actor: ActorId) -> Option<Aim> {
        (actor == self.bender).then(|| Aim {
            eye: DVec3::new(0.0, 65.6, 0.0),
            yaw: 0.0,
            pitch: -10.0,
        })
    }
}

struct Master;

impl Progression for Master {
    fn add_experience(&mut self, _actor: ActorId, _ability: &str, _amount: f32) {}
    fn progress(&self, _actor: ActorId, _ability: &str) -> Option<AbilityProgress> {
        Some(AbilityProgress {
            level: 3,
            xp: 100.0,
            path: TreePath::Second,
        })
    }
}

fn main() {
    println!("=== Fireball Flight ===\n");

    let registry = fireball::registry().expect("fireball registry");
    let rules = FireballRules::from_config(&Config::default());
    let bender = ActorId::random();
    let mut ball = Ball {
        id: EntityId::random(),
        owner: bender,
        position: DVec3::new(0.0, 65.0, 1.0),
        velocity: DVec3::ZERO,
        dead: false,
        size: 20,
        ticks: 0,
    };
    let mut field = Field { bender };
    let mut master = Master;
    let mut machine = BehaviorMachine::new(FireballBehavior::PlayerControlled);

    let mut tick = 0;
    while !ball.dead {
        tick += 1;
        if tick == 20 {
            fireball::throw(&mut machine, &mut ball, DVec3::new(0.0, 0.4, 1.2), tick);
            println!("1. thrown at tick {tick}, size {}", ball.size);
        }
        if tick == 40 {
            let payload = machine.sync_payload(&registry).expect("sync payload");
            let record = machine.save(&registry).expect("save record");
            println!("2. mid-flight sync payload {payload:?}");
            println!("   save record {}", record.to_json().expect("record json"));
        }

        let mut ctx = FireballContext {
            body: &mut ball,
            world: &mut field,
            progression: &mut master,
            rules: &rules,
        };
        machine.tick(&mut ctx, tick);
        ball.position += ball.velocity;
        ball.ticks += 1;
    }

    println!(
        "3. {} fireball gone at tick {tick} after {} transitions",
        machine.current().name(),
        machine.history().transitions().len()
    );
    println!("\n=== Example Complete ===");
}
