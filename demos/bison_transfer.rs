//! Bison Transfer
//!
//! This example walks a sky bison through two ownership transfers.
//!
//! Key concepts:
//! - Starting a transfer and confirming it in time
//! - Network confirmations queued until the next tick
//! - Unconfirmed transfers lapsing after the window
//!
//! Run with: cargo run --example bison_transfer

use bending::config::TransferSettings;
use bending::host::{ActorId, EntityId, Notifier};
use bending::transfer::{MessageTemplate, TransferHost, TransferTracker};
use std::collections::HashMap;

// Server-side view of players and bison
struct Server {
    names: HashMap<ActorId, &'static str>,
    owners: HashMap<EntityId, ActorId>,
}

impl Notifier for Server {
    fn notify(&mut self, actor: ActorId, template: MessageTemplate, args: &[String]) {
        let name = self.names.get(&actor).copied().unwrap_or("?");
        println!("  [chat -> {name}] {} {:?}", template.key(), args);
    }
}

impl TransferHost for Server {
    fn is_actor_present(&self, actor: ActorId) -> bool {
        self.names.contains_key(&actor)
    }
    fn is_entity_alive(&self, entity: EntityId) -> bool {
        self.owners.contains_key(&entity)
    }
    fn actor_name(&self, actor: ActorId) -> String {
        self.names.get(&actor).copied().unwrap_or("?").to_string()
    }
    fn entity_name(&self, _entity: EntityId) -> String {
        "Appa".to_string()
    }
    fn set_owner(&mut self, entity: EntityId, owner: ActorId) {
        self.owners.insert(entity, owner);
    }
}

fn main() {
    println!("=== Bison Transfer ===\n");

    let (aang, katara, sokka) = (ActorId::random(), ActorId::random(), ActorId::random());
    let appa = EntityId::random();
    let mut server = Server {
        names: HashMap::from([(aang, "Aang"), (katara, "Katara"), (sokka, "Sokka")]),
        owners: HashMap::from([(appa, aang)]),
    };
    let mut tracker = TransferTracker::from_settings(&TransferSettings { confirm_ticks: 20 });

    println!("1. Aang offers Appa to Katara and confirms over the network:");
    tracker.start(&mut server, aang, katara, appa);
    for _ in 0..5 {
        tracker.tick(&mut server);
    }
    tracker.queue_confirm(aang);
    let report = tracker.tick(&mut server);
    println!("  confirmed: {:?}", report.confirmed);
    println!("  owner is now {}\n", server.actor_name(server.owners[&appa]));

    println!("2. Katara offers Appa to Sokka but never confirms:");
    tracker.start(&mut server, katara, sokka, appa);
    let mut ticks = 0;
    loop {
        ticks += 1;
        let report = tracker.tick(&mut server);
        if !report.expired.is_empty() {
            println!("  lapsed after {ticks} ticks");
            break;
        }
    }
    println!("  owner is still {}", server.actor_name(server.owners[&appa]));

    println!("\n=== Example Complete ===");
}
