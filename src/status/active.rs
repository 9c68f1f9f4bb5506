//! Status controls held by one actor.

use super::{Control, StatusControl, StatusControlId, StatusControlRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Ordered set of status control ids an actor currently holds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveStatusControls {
    ids: BTreeSet<StatusControlId>,
}

impl ActiveStatusControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give the actor a control. Returns false if it was already held.
    pub fn add(&mut self, id: StatusControlId) -> bool {
        self.ids.insert(id)
    }

    pub fn remove(&mut self, id: StatusControlId) -> bool {
        self.ids.remove(&id)
    }

    pub fn contains(&self, id: StatusControlId) -> bool {
        self.ids.contains(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = StatusControlId> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Held controls listening to `control`, in id order.
    pub fn subscribed_to<'r>(
        &self,
        control: Control,
        registry: &'r StatusControlRegistry,
    ) -> Vec<&'r StatusControl> {
        self.ids
            .iter()
            .filter_map(|id| registry.lookup(*id))
            .filter(|status| status.control == control)
            .collect()
    }

    /// Run every held control listening to `control`.
    ///
    /// `execute` returns true when a control is finished; finished controls
    /// are removed. Ids unknown to the registry are dropped. Returns the
    /// removed ids in id order.
    pub fn fire<F>(
        &mut self,
        control: Control,
        registry: &StatusControlRegistry,
        mut execute: F,
    ) -> Vec<StatusControlId>
    where
        F: FnMut(&StatusControl) -> bool,
    {
        let mut removed = Vec::new();
        self.ids.retain(|id| {
            let Some(status) = registry.lookup(*id) else {
                warn!(id = id.0, "dropping unknown status control");
                removed.push(*id);
                return false;
            };
            if status.control != control || !execute(status) {
                return true;
            }
            debug!(status_control = status.name, "status control finished");
            removed.push(*id);
            false
        });
        removed
    }
}

impl FromIterator<StatusControlId> for ActiveStatusControls {
    fn from_iter<I: IntoIterator<Item = StatusControlId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
