//! Compact and structured encodings of behavior variants.
//!
//! Two forms exist for every variant:
//!
//! - **Compact**: `[id][fields]`, one id byte followed by the variant's
//!   bincode fields. Carried by the entity sync channel next to the entity's
//!   other synced values; its length is implicit.
//! - **Structured**: a [`BehaviorRecord`] with the id, the variant name and the
//!   fields as a JSON value. Embedded in save data.
//!
//! Decoding either form reproduces the encoded variant field for field.

use crate::core::Behavior;
use crate::registry::{BehaviorId, BehaviorRegistry};
use bincode::Options;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub mod error;

pub use error::CodecError;

/// Version identifier for the structured record format
pub const RECORD_VERSION: u32 = 1;

/// Variant-specific payload of a behavior.
///
/// Implementations write only the fields of the current variant; the id is
/// written by the registry. Reading happens on a freshly constructed variant.
pub trait VariantFields: Behavior {
    fn write_fields(&self) -> Result<Vec<u8>, CodecError>;

    fn read_fields(&mut self, bytes: &[u8]) -> Result<(), CodecError>;

    fn save_fields(&self) -> Result<serde_json::Value, CodecError>;

    fn load_fields(&mut self, fields: &serde_json::Value) -> Result<(), CodecError>;
}

/// Serializable save-data form of a behavior.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BehaviorRecord {
    /// Record format version
    pub version: u32,

    /// Registry id of the variant
    pub behavior_id: u8,

    /// Variant name, kept for readability of save files
    pub name: String,

    /// When the record was written
    pub saved_at: DateTime<Utc>,

    /// Variant fields
    pub fields: serde_json::Value,
}

impl BehaviorRecord {
    pub fn to_json(&self) -> Result<String, CodecError> {
        serde_json::to_string(self).map_err(|e| CodecError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        serde_json::from_str(json).map_err(|e| CodecError::DeserializationFailed(e.to_string()))
    }
}

/// Fixed-width little-endian fields that must fill the payload exactly.
fn compact_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

/// Encode a field struct in the compact form.
pub fn to_bytes<T: Serialize>(fields: &T) -> Result<Vec<u8>, CodecError> {
    compact_options()
        .serialize(fields)
        .map_err(|e| CodecError::SerializationFailed(e.to_string()))
}

/// Decode a field struct from the compact form.
///
/// Leftover bytes are an error; the payload length is implicit.
pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    compact_options()
        .deserialize(bytes)
        .map_err(|e| CodecError::DeserializationFailed(e.to_string()))
}

/// Check the compact fields of a variant that carries none.
pub fn expect_no_fields(bytes: &[u8]) -> Result<(), CodecError> {
    if bytes.is_empty() {
        Ok(())
    } else {
        Err(CodecError::TrailingBytes(bytes.len()))
    }
}

/// Encode a field struct in the structured form.
pub fn to_value<T: Serialize>(fields: &T) -> Result<serde_json::Value, CodecError> {
    serde_json::to_value(fields).map_err(|e| CodecError::SerializationFailed(e.to_string()))
}

/// Decode a field struct from the structured form.
pub fn from_value<T: DeserializeOwned>(fields: &serde_json::Value) -> Result<T, CodecError> {
    T::deserialize(fields).map_err(|e| CodecError::DeserializationFailed(e.to_string()))
}

impl<B: VariantFields> BehaviorRegistry<B> {
    fn require_id(&self, behavior: &B) -> Result<BehaviorId, CodecError> {
        self.id_of(behavior)
            .ok_or_else(|| CodecError::Unregistered(behavior.name().to_string()))
    }

    /// Encode `behavior` in the compact form.
    pub fn encode(&self, behavior: &B) -> Result<Vec<u8>, CodecError> {
        let id = self.require_id(behavior)?;
        let fields = behavior.write_fields()?;

        let mut out = Vec::with_capacity(1 + fields.len());
        out.push(id.0);
        out.extend_from_slice(&fields);
        Ok(out)
    }

    /// Decode a behavior from the compact form.
    pub fn decode(&self, bytes: &[u8]) -> Result<B, CodecError> {
        let (&id, fields) = bytes.split_first().ok_or(CodecError::Empty)?;
        let mut behavior = self
            .construct(BehaviorId(id))
            .ok_or(CodecError::UnknownVariant(id))?;
        behavior.read_fields(fields)?;
        Ok(behavior)
    }

    /// Decode, substituting the fallback variant when the payload is unusable.
    pub fn decode_or_fallback(&self, bytes: &[u8]) -> B {
        self.decode(bytes).unwrap_or_else(|err| {
            let fallback = self.fallback();
            warn!(%err, fallback = fallback.name(), "substituting behavior after decode failure");
            fallback
        })
    }

    /// Encode `behavior` in the structured form.
    pub fn save(&self, behavior: &B) -> Result<BehaviorRecord, CodecError> {
        let id = self.require_id(behavior)?;
        Ok(BehaviorRecord {
            version: RECORD_VERSION,
            behavior_id: id.0,
            name: behavior.name().to_string(),
            saved_at: Utc::now(),
            fields: behavior.save_fields()?,
        })
    }

    /// Decode a behavior from the structured form.
    ///
    /// The id is authoritative; the stored name is informational.
    pub fn load(&self, record: &BehaviorRecord) -> Result<B, CodecError> {
        if record.version != RECORD_VERSION {
            return Err(CodecError::UnsupportedVersion {
                found: record.version,
                supported: RECORD_VERSION,
            });
        }

        let mut behavior = self
            .construct(BehaviorId(record.behavior_id))
            .ok_or(CodecError::UnknownVariant(record.behavior_id))?;
        behavior.load_fields(&record.fields)?;
        Ok(behavior)
    }

    /// Load, substituting the fallback variant when the record is unusable.
    pub fn load_or_fallback(&self, record: &BehaviorRecord) -> B {
        self.load(record).unwrap_or_else(|err| {
            let fallback = self.fallback();
            warn!(
                %err,
                stored = %record.name,
                fallback = fallback.name(),
                "substituting behavior after load failure"
            );
            fallback
        })
    }
}
