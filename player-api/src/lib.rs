//! Command API for a media player bridged over MQTT
//!
//! This crate translates host commands into the JSON payloads the device
//! expects on its command topic, and defines the publish/subscribe
//! capabilities the bridge borrows from an external MQTT client.
//!
//! ```rust
//! use player_api::{encode_command, CommandIntent};
//!
//! let payload = encode_command(&CommandIntent::SetVolume(0.5));
//! assert_eq!(payload, br#"{"volume":50}"#);
//! ```

pub mod client;
pub mod command;
pub mod error;
pub mod transport;

pub use client::{CommandClient, CommandOutcome};
pub use command::{encode_command, CommandIntent};
pub use error::{ApiError, Result};
pub use transport::{MessageHandler, Publisher, Subscriber};
