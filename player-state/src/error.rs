//! Error types for player-state

use thiserror::Error;

/// Result type for player-state operations
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Errors that reject an inbound state message as a whole
///
/// When decoding fails the current `PlayerState` must stay untouched; the
/// message is logged and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Payload is not valid UTF-8 JSON, or the JSON is not an object
    #[error("Malformed state payload: {0}")]
    MalformedPayload(String),
}

/// A single recognized field whose value could not be coerced
///
/// Recorded per field inside a `PartialStateUpdate`; the remaining fields of
/// the same message still apply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot coerce field '{key}': {reason}")]
pub struct FieldCoercionFailure {
    /// Payload key that was rejected
    pub key: &'static str,
    /// Why the value was rejected
    pub reason: String,
}

impl FieldCoercionFailure {
    pub fn new(key: &'static str, reason: impl Into<String>) -> Self {
        Self {
            key,
            reason: reason.into(),
        }
    }
}
