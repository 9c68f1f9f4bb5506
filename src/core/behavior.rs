//! Core Behavior trait for per-entity state objects.
//!
//! A behavior is one variant of a closed, enumerated set attached to a
//! simulated entity. The trait only exposes pure inspection; ticking lives in
//! [`crate::machine::Update`] and encoding in [`crate::codec::VariantFields`].

use std::fmt::Debug;

/// Trait for behavior variants.
///
/// All methods are pure. A behavior value is owned by exactly one entity and
/// replaced wholesale when the entity transitions.
///
/// # Required Traits
///
/// - `Clone`: behaviors are cloned into the transition history
/// - `PartialEq`: the round-trip law is checked field by field
/// - `Debug`: behaviors show up in logs
///
/// # Example
///
/// ```rust
/// use bending::core::Behavior;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Arrow {
///     Nocked,
///     Flying { ticks: u32 },
///     Stuck,
/// }
///
/// impl Behavior for Arrow {
///     fn name(&self) -> &str {
///         match self {
///             Self::Nocked => "Nocked",
///             Self::Flying { .. } => "Flying",
///             Self::Stuck => "Stuck",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Stuck)
///     }
/// }
///
/// assert_eq!(Arrow::Flying { ticks: 3 }.name(), "Flying");
/// ```
pub trait Behavior: Clone + PartialEq + Debug + Send + Sync {
    /// Variant name.
    ///
    /// Doubles as the registry key, so it must not depend on field values.
    fn name(&self) -> &str;

    /// Check if this is a resting state with no further transitions expected.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}
