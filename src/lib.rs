//! Bending: host-independent core of an elemental bending game mod
//!
//! The crate holds the parts of the mod that do not depend on a particular
//! game engine. The engine is reached only through the capability traits in
//! [`host`], so everything here can be driven and tested with plain fakes.
//!
//! # Core Concepts
//!
//! - **Behaviors**: a closed set of serializable variants attached to an
//!   entity, ticked by a [`BehaviorMachine`](machine::BehaviorMachine)
//! - **Registry**: stable one-byte ids for every variant, starting at 1
//! - **Codec**: compact `[id][fields]` bytes for sync, structured records for
//!   save data
//! - **Transfers**: timed ownership transfers awaiting confirmation
//! - **Status controls**: temporary listeners on control input
//!
//! # Example
//!
//! ```rust
//! use bending::core::Behavior;
//! use bending::fireball::{self, FireballBehavior};
//! use bending::machine::BehaviorMachine;
//!
//! let registry = fireball::registry().unwrap();
//! let mut machine = BehaviorMachine::new(FireballBehavior::PlayerControlled);
//! machine.take_sync();
//!
//! machine.set(FireballBehavior::thrown(), 40);
//! assert_eq!(machine.current().name(), "Thrown");
//! assert!(machine.take_sync());
//!
//! let bytes = machine.sync_payload(&registry).unwrap();
//! assert_eq!(bytes[0], 3);
//! assert_eq!(registry.decode(&bytes).unwrap(), FireballBehavior::thrown());
//! ```

pub mod codec;
pub mod config;
pub mod core;
pub mod fireball;
pub mod host;
pub mod machine;
pub mod registry;
pub mod status;
pub mod transfer;

// Re-export commonly used types
pub use codec::{BehaviorRecord, CodecError, VariantFields};
pub use config::{Config, ConfigError};
pub use core::{Behavior, BehaviorHistory, BehaviorTransition, Guard};
pub use machine::{BehaviorMachine, StepResult, Transition, Update};
pub use registry::{BehaviorId, BehaviorRegistry, BuildError};
pub use transfer::{ConfirmOutcome, TransferTracker};
