//! Per-tick update contract for behaviors.

use crate::core::Behavior;

/// Outcome of one behavior update.
#[derive(Clone, Debug, PartialEq)]
pub enum Transition<B: Behavior> {
    /// Remain in the current behavior
    Stay,

    /// Replace the current behavior
    To(B),
}

impl<B: Behavior> Transition<B> {
    pub fn is_stay(&self) -> bool {
        matches!(self, Self::Stay)
    }
}

/// Behaviors that can be ticked against a host context `Ctx`.
///
/// `update` runs once per simulation tick for the owning entity. It may
/// mutate its own fields (counters) and the entity through `ctx`, and returns
/// [`Transition::To`] to hand over to another variant.
pub trait Update<Ctx: ?Sized>: Behavior {
    fn update(&mut self, ctx: &mut Ctx, tick: u64) -> Transition<Self>;
}
