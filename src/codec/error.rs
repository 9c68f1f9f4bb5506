//! Codec error types.

use thiserror::Error;

/// Errors that can occur while encoding or decoding a behavior
#[derive(Debug, Error, PartialEq)]
pub enum CodecError {
    /// The id does not name a registered behavior
    #[error("Unknown behavior variant id {0}")]
    UnknownVariant(u8),

    /// The behavior's name is not in the registry
    #[error("Behavior '{0}' is not registered")]
    Unregistered(String),

    /// Compact payload had no id byte
    #[error("Behavior payload is empty")]
    Empty,

    /// Compact payload carried bytes the variant did not consume
    #[error("{0} unexpected trailing bytes in behavior payload")]
    TrailingBytes(usize),

    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Record version is not supported by this version
    #[error("Unsupported record version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

