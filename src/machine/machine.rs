//! Owner of one entity's current behavior.

use crate::codec::{BehaviorRecord, CodecError, VariantFields};
use crate::core::{Behavior, BehaviorHistory, BehaviorTransition};
use crate::machine::transition::{Transition, Update};
use crate::registry::BehaviorRegistry;
use tracing::debug;

/// Result of executing a single step
#[derive(Clone, Debug, PartialEq)]
pub enum StepResult<B: Behavior> {
    /// The behavior stayed in place
    Stayed,

    /// The behavior was replaced
    Transitioned { from: B, to: B },
}

impl<B: Behavior> StepResult<B> {
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }
}

/// Transitions a machine remembers unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 32;

/// Drives the behavior attached to one entity.
///
/// The machine ticks the current variant, swaps it out when it asks for a
/// transition, records every swap and raises a sync flag so the host
/// re-sends and re-saves the entity's behavior.
#[derive(Clone, Debug)]
pub struct BehaviorMachine<B: Behavior> {
    current: B,
    history: BehaviorHistory<B>,
    history_limit: usize,
    needs_sync: bool,
}

impl<B: Behavior> BehaviorMachine<B> {
    /// Create a machine in the initial behavior.
    ///
    /// A fresh machine needs an initial sync.
    pub fn new(initial: B) -> Self {
        Self {
            current: initial,
            history: BehaviorHistory::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            needs_sync: true,
        }
    }

    /// Keep at most `limit` transitions, oldest dropped first.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Get current behavior (pure)
    pub fn current(&self) -> &B {
        &self.current
    }

    /// Check if the current behavior is a resting state (pure)
    pub fn is_final(&self) -> bool {
        self.current.is_final()
    }

    /// Get transition history (pure)
    pub fn history(&self) -> &BehaviorHistory<B> {
        &self.history
    }

    /// Run the current behavior for one tick.
    pub fn tick<C: ?Sized>(&mut self, ctx: &mut C, tick: u64) -> StepResult<B>
    where
        B: Update<C>,
    {
        match self.current.update(ctx, tick) {
            Transition::Stay => StepResult::Stayed,
            Transition::To(next) => self.set(next, tick),
        }
    }

    /// Replace the current behavior from outside the update loop.
    ///
    /// Setting an equal behavior is not a transition.
    pub fn set(&mut self, next: B, tick: u64) -> StepResult<B> {
        if next == self.current {
            return StepResult::Stayed;
        }

        let from = std::mem::replace(&mut self.current, next);
        debug!(from = from.name(), to = self.current.name(), tick, "behavior transition");

        self.history.push_bounded(
            BehaviorTransition {
                from: from.clone(),
                to: self.current.clone(),
                tick,
            },
            self.history_limit,
        );
        self.needs_sync = true;

        StepResult::Transitioned {
            from,
            to: self.current.clone(),
        }
    }

    /// Whether the behavior changed since the last call, clearing the flag.
    pub fn take_sync(&mut self) -> bool {
        std::mem::take(&mut self.needs_sync)
    }

    pub fn needs_sync(&self) -> bool {
        self.needs_sync
    }
}

impl<B: VariantFields> BehaviorMachine<B> {
    /// Compact payload for the entity sync channel.
    pub fn sync_payload(&self, registry: &BehaviorRegistry<B>) -> Result<Vec<u8>, CodecError> {
        registry.encode(&self.current)
    }

    /// Rebuild a machine from a received sync payload.
    ///
    /// Unusable payloads yield the registry fallback.
    pub fn from_payload(registry: &BehaviorRegistry<B>, bytes: &[u8]) -> Self {
        let mut machine = Self::new(registry.decode_or_fallback(bytes));
        machine.needs_sync = false;
        machine
    }

    /// Save-data record of the current behavior.
    pub fn save(&self, registry: &BehaviorRegistry<B>) -> Result<BehaviorRecord, CodecError> {
        registry.save(&self.current)
    }

    /// Rebuild a machine from save data.
    ///
    /// A loaded entity still needs its first sync.
    pub fn load(registry: &BehaviorRegistry<B>, record: &BehaviorRecord) -> Self {
        Self::new(registry.load_or_fallback(record))
    }
}
