//! Core behavior types.
//!
//! This module contains the pure part of the behavior state machine:
//! - Behavior definitions via the `Behavior` trait
//! - Guard predicates over host data
//! - Immutable, tick-stamped transition history
//!
//! Nothing here touches the host simulation.

mod behavior;
mod guard;
mod history;

pub use behavior::Behavior;
pub use guard::Guard;
pub use history::{BehaviorHistory, BehaviorTransition};
