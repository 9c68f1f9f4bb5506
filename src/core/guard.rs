//! Guard predicates for gating behavior effects.
//!
//! Guards are pure boolean functions over host-provided data, such as an
//! actor's ability progression. Behaviors consult them instead of
//! hard-coding the condition.

use std::fmt;
use std::sync::Arc;

/// Pure predicate over a value of type `T`.
///
/// Cloning a guard shares the predicate.
///
/// # Example
///
/// ```rust
/// use bending::core::Guard;
/// use bending::host::{AbilityProgress, TreePath};
///
/// let mastered = Guard::new(|p: &AbilityProgress| p.is_master_path(TreePath::Second));
///
/// let novice = AbilityProgress { level: 0, xp: 0.0, path: TreePath::Main };
/// let master = AbilityProgress { level: 3, xp: 0.0, path: TreePath::Second };
///
/// assert!(!mastered.check(&novice));
/// assert!(mastered.check(&master));
/// ```
pub struct Guard<T> {
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Guard<T> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Guard that always passes.
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// Guard that never passes.
    pub fn never() -> Self {
        Self::new(|_| false)
    }

    /// Check if the guard passes for this value.
    pub fn check(&self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

impl<T> Clone for Guard<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
