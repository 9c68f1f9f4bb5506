//! Registry of behavior variants keyed by stable one-byte ids.
//!
//! The registry is built once at startup and shared immutably afterwards.
//! Ids are stable for the lifetime of the process; nothing guarantees they
//! survive a change in registration order between versions.

pub mod builder;
pub mod error;

pub use builder::RegistryBuilder;
pub use error::BuildError;

use crate::core::Behavior;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Id handed to the first registered behavior.
pub const FIRST_BEHAVIOR_ID: u8 = 1;

/// Constructor producing a variant in its initial state.
pub type Constructor<B> = fn() -> B;

/// Stable small integer id of a behavior variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BehaviorId(pub u8);

impl fmt::Display for BehaviorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub(crate) struct RegisteredBehavior<B> {
    pub(crate) id: BehaviorId,
    pub(crate) name: &'static str,
    pub(crate) construct: Constructor<B>,
}

/// Frozen mapping between behavior ids, names and constructors.
///
/// # Example
///
/// ```rust
/// use bending::fireball::{self, FireballBehavior};
/// use bending::registry::BehaviorId;
///
/// let registry = fireball::registry().unwrap();
///
/// assert_eq!(registry.id_of(&FireballBehavior::Idle), Some(BehaviorId(1)));
/// assert_eq!(registry.construct(BehaviorId(3)), Some(FireballBehavior::thrown()));
/// assert!(registry.lookup(BehaviorId(200)).is_none());
/// ```
pub struct BehaviorRegistry<B: Behavior> {
    entries: Vec<RegisteredBehavior<B>>,
}

impl<B: Behavior> BehaviorRegistry<B> {
    /// Start registering behaviors.
    pub fn builder() -> RegistryBuilder<B> {
        RegistryBuilder::new()
    }

    fn entry(&self, id: BehaviorId) -> Option<&RegisteredBehavior<B>> {
        let index = id.0.checked_sub(FIRST_BEHAVIOR_ID)?;
        self.entries.get(usize::from(index))
    }

    /// Constructor registered under `id`.
    pub fn lookup(&self, id: BehaviorId) -> Option<Constructor<B>> {
        self.entry(id).map(|entry| entry.construct)
    }

    /// Fresh variant registered under `id`.
    pub fn construct(&self, id: BehaviorId) -> Option<B> {
        self.lookup(id).map(|construct| construct())
    }

    /// Id of the variant `behavior` belongs to.
    pub fn id_of(&self, behavior: &B) -> Option<BehaviorId> {
        self.id_by_name(behavior.name())
    }

    pub fn id_by_name(&self, name: &str) -> Option<BehaviorId> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.id)
    }

    pub fn name_of(&self, id: BehaviorId) -> Option<&'static str> {
        self.entry(id).map(|entry| entry.name)
    }

    /// Variant substituted when decoding fails.
    ///
    /// This is the first registered behavior.
    pub fn fallback(&self) -> B {
        (self.entries[0].construct)()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a built registry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered ids and names in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (BehaviorId, &'static str)> + '_ {
        self.entries.iter().map(|entry| (entry.id, entry.name))
    }
}

impl<B: Behavior> fmt::Debug for BehaviorRegistry<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
