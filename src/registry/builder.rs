//! Builder for behavior registries.

use super::{BehaviorId, BehaviorRegistry, Constructor, RegisteredBehavior, FIRST_BEHAVIOR_ID};
use crate::core::Behavior;
use crate::registry::error::BuildError;
use tracing::debug;

/// Collects behavior registrations, then freezes them into a
/// [`BehaviorRegistry`].
pub struct RegistryBuilder<B: Behavior> {
    entries: Vec<RegisteredBehavior<B>>,
}

impl<B: Behavior> RegistryBuilder<B> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a variant and return its id.
    ///
    /// Ids are handed out in registration order starting at
    /// [`FIRST_BEHAVIOR_ID`]. The first variant registered becomes the
    /// registry's fallback.
    pub fn register(
        &mut self,
        name: &'static str,
        construct: Constructor<B>,
    ) -> Result<BehaviorId, BuildError> {
        if self.entries.iter().any(|entry| entry.name == name) {
            return Err(BuildError::DuplicateName(name.to_string()));
        }

        let constructed = construct();
        if constructed.name() != name {
            return Err(BuildError::NameMismatch {
                registered: name.to_string(),
                constructed: constructed.name().to_string(),
            });
        }

        let max = usize::from(u8::MAX - FIRST_BEHAVIOR_ID) + 1;
        if self.entries.len() >= max {
            return Err(BuildError::TooManyVariants { max });
        }

        let id = BehaviorId(FIRST_BEHAVIOR_ID + self.entries.len() as u8);
        self.entries.push(RegisteredBehavior {
            id,
            name,
            construct,
        });
        debug!(behavior = name, id = id.0, "registered behavior");
        Ok(id)
    }

    /// Chaining form of [`register`](Self::register).
    pub fn with(mut self, name: &'static str, construct: Constructor<B>) -> Result<Self, BuildError> {
        self.register(name, construct)?;
        Ok(self)
    }

    /// Freeze the registrations.
    pub fn build(self) -> Result<BehaviorRegistry<B>, BuildError> {
        if self.entries.is_empty() {
            return Err(BuildError::NoBehaviors);
        }
        Ok(BehaviorRegistry {
            entries: self.entries,
        })
    }
}

impl<B: Behavior> Default for RegistryBuilder<B> {
    fn default() -> Self {
        Self::new()
    }
}
