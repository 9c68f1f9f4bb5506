//! Errors raised while building a behavior registry.

use thiserror::Error;

/// Errors that can occur when registering behavior variants.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Behavior '{0}' is already registered")]
    DuplicateName(String),

    #[error("Behavior registered as '{registered}' constructs '{constructed}'")]
    NameMismatch {
        registered: String,
        constructed: String,
    },

    #[error("Registry is full, at most {max} behaviors fit in a one-byte id")]
    TooManyVariants { max: usize },

    #[error("No behaviors registered. Register at least one before .build()")]
    NoBehaviors,
}
