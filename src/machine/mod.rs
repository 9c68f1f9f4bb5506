//! Tick-driven behavior execution.
//!
//! This module is the imperative shell around the pure core: it hands each
//! behavior its host context once per tick and applies the transitions the
//! behavior asks for.
//!
//! # Key Concepts
//!
//! - **Update**: per-variant tick logic returning a [`Transition`]
//! - **Behavior machine**: owns the current variant, history and sync flag

mod machine;
mod transition;

pub use machine::{BehaviorMachine, StepResult, DEFAULT_HISTORY_LIMIT};
pub use transition::{Transition, Update};
