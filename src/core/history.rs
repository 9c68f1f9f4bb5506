//! Behavior transition history tracking.
//!
//! Provides immutable, tick-stamped tracking of the behaviors an entity has
//! passed through.

use super::behavior::Behavior;

/// Record of a single behavior transition.
///
/// # Example
///
/// ```rust
/// use bending::core::BehaviorTransition;
/// use bending::fireball::FireballBehavior;
///
/// let transition = BehaviorTransition {
///     from: FireballBehavior::Idle,
///     to: FireballBehavior::thrown(),
///     tick: 40,
/// };
/// assert_eq!(transition.tick, 40);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BehaviorTransition<B: Behavior> {
    /// The behavior being replaced
    pub from: B,
    /// The replacement behavior
    pub to: B,
    /// Simulation tick on which the replacement happened
    pub tick: u64,
}

/// Ordered history of behavior transitions.
///
/// History is immutable - `record` returns a new history with the transition
/// added.
///
/// # Example
///
/// ```rust
/// use bending::core::{BehaviorHistory, BehaviorTransition};
/// use bending::fireball::FireballBehavior;
///
/// let history = BehaviorHistory::new();
///
/// let history = history.record(BehaviorTransition {
///     from: FireballBehavior::Idle,
///     to: FireballBehavior::PlayerControlled,
///     tick: 10,
/// });
///
/// let history = history.record(BehaviorTransition {
///     from: FireballBehavior::PlayerControlled,
///     to: FireballBehavior::thrown(),
///     tick: 30,
/// });
///
/// assert_eq!(history.get_path().len(), 3); // Idle -> PlayerControlled -> Thrown
/// assert_eq!(history.span_ticks(), Some(20));
/// ```
#[derive(Clone, Debug)]
pub struct BehaviorHistory<B: Behavior> {
    transitions: Vec<BehaviorTransition<B>>,
}

impl<B: Behavior> Default for BehaviorHistory<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Behavior> BehaviorHistory<B> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: BehaviorTransition<B>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Append a transition in place, dropping the oldest beyond `limit`.
    pub(crate) fn push_bounded(&mut self, transition: BehaviorTransition<B>, limit: usize) {
        self.transitions.push(transition);
        let excess = self.transitions.len().saturating_sub(limit);
        self.transitions.drain(..excess);
    }

    /// Get the path of behaviors traversed.
    ///
    /// Returns the first `from`, then the `to` of each transition.
    pub fn get_path(&self) -> Vec<&B> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Ticks elapsed between the first and last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn span_ticks(&self) -> Option<u64> {
        match (self.transitions.first(), self.transitions.last()) {
            (Some(first), Some(last)) => Some(last.tick.saturating_sub(first.tick)),
            _ => None,
        }
    }

    /// Most recent transition.
    pub fn last(&self) -> Option<&BehaviorTransition<B>> {
        self.transitions.last()
    }

    /// Get all transitions in order.
    pub fn transitions(&self) -> &[BehaviorTransition<B>] {
        &self.transitions
    }
}
