//! Player State Management
//!
//! State model and inbound decoding for a media player bridged over MQTT.
//!
//! # Features
//!
//! - **Tolerant Decoding**: Malformed payloads never corrupt state; bad fields are skipped one by one
//! - **Partial Updates**: Keys missing from a message leave their field untouched
//! - **Reactive Updates**: Watch the state using `tokio::sync::watch`, or subscribe to per-message changes
//! - **Availability**: Liveness tracked on its own channel
//!
//! # Architecture
//!
//! ```text
//! state topic        → decode_state_message → PlayerStateStore → watchers
//! availability topic → AvailabilityTracker  ↗
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use player_state::{decode_state_message, PlaybackStatus, PlayerStateStore};
//!
//! let store = PlayerStateStore::new();
//!
//! let update = decode_state_message(br#"{"state": "Playing", "volume": 55}"#).unwrap();
//! store.apply(&update);
//!
//! let state = store.snapshot();
//! assert_eq!(state.playback_status, PlaybackStatus::Playing);
//! assert_eq!(state.volume_level, 0.55);
//! ```

// Core modules
pub mod availability;
pub mod decoder;
pub mod model;
pub mod provider;
pub mod store;

// Error types
pub mod error;

// Logging infrastructure
pub mod logging;

// ============================================================================
// Re-exports
// ============================================================================

pub use availability::AvailabilityTracker;
pub use decoder::{decode_state_message, FieldUpdate, PartialStateUpdate};
pub use model::{PlaybackStatus, PlayerState, StateChange};
pub use provider::PlayerStateProvider;
pub use store::PlayerStateStore;

pub use error::{DecodeError, FieldCoercionFailure, Result};

pub use logging::{init_logging, init_logging_from_env, LoggingError, LoggingMode};

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::decoder::{decode_state_message, PartialStateUpdate};
    pub use crate::model::{PlaybackStatus, PlayerState, StateChange};
    pub use crate::provider::PlayerStateProvider;
    pub use crate::store::PlayerStateStore;
}
