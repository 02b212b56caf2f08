//! Availability channel handling
//!
//! The availability topic carries plain string literals. A payload equal to
//! the configured "available" literal marks the player available; anything
//! else marks it unavailable. There is no third state.

use tracing::debug;

pub const DEFAULT_PAYLOAD_AVAILABLE: &str = "online";
pub const DEFAULT_PAYLOAD_NOT_AVAILABLE: &str = "offline";

/// Interprets availability-topic payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityTracker {
    payload_available: String,
    payload_not_available: String,
}

impl AvailabilityTracker {
    pub fn new(payload_available: impl Into<String>, payload_not_available: impl Into<String>) -> Self {
        Self {
            payload_available: payload_available.into(),
            payload_not_available: payload_not_available.into(),
        }
    }

    /// Literal that marks the player available
    pub fn payload_available(&self) -> &str {
        &self.payload_available
    }

    /// Literal the device sends when going away (informational only)
    pub fn payload_not_available(&self) -> &str {
        &self.payload_not_available
    }

    /// Evaluate a payload, byte-for-byte against the available literal
    pub fn evaluate(&self, payload: &[u8]) -> bool {
        let available = payload == self.payload_available.as_bytes();

        if !available && payload != self.payload_not_available.as_bytes() {
            debug!(
                payload = %String::from_utf8_lossy(payload),
                "Unrecognized availability payload, treating as unavailable"
            );
        }

        available
    }
}

impl Default for AvailabilityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_PAYLOAD_AVAILABLE, DEFAULT_PAYLOAD_NOT_AVAILABLE)
    }
}
