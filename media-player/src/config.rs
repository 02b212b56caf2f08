//! Configuration for a bridged media player
//!
//! Mirrors what the host's configuration layer hands over when it creates
//! the entity. All topics are optional; a player without a state topic simply
//! never changes state, one without a command topic accepts commands and
//! sends nothing.
//!
//! ```rust
//! use mqtt_media_player::PlayerConfig;
//!
//! let config = PlayerConfig::from_json(r#"{
//!     "name": "Kitchen",
//!     "state_topic": "kitchen/player/state",
//!     "command_topic": "kitchen/player/set"
//! }"#).unwrap();
//!
//! assert_eq!(config.device_class, "speaker");
//! assert_eq!(config.payload_available, "online");
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use player_state::availability::{DEFAULT_PAYLOAD_AVAILABLE, DEFAULT_PAYLOAD_NOT_AVAILABLE};
use player_state::AvailabilityTracker;

use crate::error::{PlayerError, Result};

pub const DEFAULT_NAME: &str = "MQTT Media Player";
pub const DEFAULT_DEVICE_CLASS: &str = "speaker";

/// Configuration for one bridged media player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Entity name (required)
    pub name: String,

    /// Identity used by the host for deduplication
    #[serde(default)]
    pub unique_id: Option<String>,

    /// Default: "speaker"
    #[serde(default = "default_device_class")]
    pub device_class: String,

    /// Topic carrying JSON state objects from the device
    #[serde(default)]
    pub state_topic: Option<String>,

    /// Topic the JSON commands are published to
    #[serde(default)]
    pub command_topic: Option<String>,

    /// Topic carrying liveness literals
    #[serde(default)]
    pub availability_topic: Option<String>,

    /// Default: "online"
    #[serde(default = "default_payload_available")]
    pub payload_available: String,

    /// Default: "offline"
    #[serde(default = "default_payload_not_available")]
    pub payload_not_available: String,

    /// Device descriptor passed through to the host's device registry
    #[serde(default)]
    pub device: Option<DeviceInfo>,
}

fn default_device_class() -> String {
    DEFAULT_DEVICE_CLASS.to_string()
}

fn default_payload_available() -> String {
    DEFAULT_PAYLOAD_AVAILABLE.to_string()
}

fn default_payload_not_available() -> String {
    DEFAULT_PAYLOAD_NOT_AVAILABLE.to_string()
}

impl PlayerConfig {
    /// Create a config with the given name and all other fields defaulted
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unique_id: None,
            device_class: default_device_class(),
            state_topic: None,
            command_topic: None,
            availability_topic: None,
            payload_available: default_payload_available(),
            payload_not_available: default_payload_not_available(),
            device: None,
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PlayerConfig =
            serde_json::from_str(json).map_err(|e| PlayerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the host schema would enforce
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PlayerError::Config("name must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn with_unique_id(mut self, unique_id: impl Into<String>) -> Self {
        self.unique_id = Some(unique_id.into());
        self
    }

    pub fn with_device_class(mut self, device_class: impl Into<String>) -> Self {
        self.device_class = device_class.into();
        self
    }

    pub fn with_state_topic(mut self, topic: impl Into<String>) -> Self {
        self.state_topic = Some(topic.into());
        self
    }

    pub fn with_command_topic(mut self, topic: impl Into<String>) -> Self {
        self.command_topic = Some(topic.into());
        self
    }

    pub fn with_availability_topic(mut self, topic: impl Into<String>) -> Self {
        self.availability_topic = Some(topic.into());
        self
    }

    /// Override the available / not-available literals
    pub fn with_availability_payloads(
        mut self,
        available: impl Into<String>,
        not_available: impl Into<String>,
    ) -> Self {
        self.payload_available = available.into();
        self.payload_not_available = not_available.into();
        self
    }

    pub fn with_device(mut self, device: DeviceInfo) -> Self {
        self.device = Some(device);
        self
    }

    /// Availability interpreter for the configured literals
    pub fn availability_tracker(&self) -> AvailabilityTracker {
        AvailabilityTracker::new(&*self.payload_available, &*self.payload_not_available)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_NAME)
    }
}

/// Device descriptor for the host's device registry
///
/// Opaque to the bridge; it is only carried along.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Accepts a single string or a list of strings
    #[serde(default, deserialize_with = "string_or_list")]
    pub identifiers: Vec<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub sw_version: Option<String>,
    /// Identifier of the parent device
    #[serde(default)]
    pub via_device: Option<String>,
}

impl DeviceInfo {
    /// Check if the descriptor carries nothing at all
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
            && self.manufacturer.is_none()
            && self.model.is_none()
            && self.sw_version.is_none()
            && self.via_device.is_none()
    }
}

fn string_or_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(identifier) => vec![identifier],
        OneOrMany::Many(identifiers) => identifiers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlayerConfig::from_json(r#"{"name": "Living Room"}"#).unwrap();
        assert_eq!(config.name, "Living Room");
        assert_eq!(config.unique_id, None);
        assert_eq!(config.device_class, "speaker");
        assert_eq!(config.state_topic, None);
        assert_eq!(config.command_topic, None);
        assert_eq!(config.availability_topic, None);
        assert_eq!(config.payload_available, "online");
        assert_eq!(config.payload_not_available, "offline");
        assert_eq!(config.device, None);
        assert_eq!(config, PlayerConfig::new("Living Room"));
    }

    #[test]
    fn test_name_is_required() {
        let result = PlayerConfig::from_json(r#"{"state_topic": "a/b"}"#);
        assert!(matches!(result, Err(PlayerError::Config(_))));

        let result = PlayerConfig::from_json(r#"{"name": "  "}"#);
        assert!(matches!(result, Err(PlayerError::Config(_))));
    }

    #[test]
    fn test_full_config() {
        let config = PlayerConfig::from_json(
            r#"{
                "name": "Office",
                "unique_id": "office_player",
                "device_class": "tv",
                "state_topic": "office/state",
                "command_topic": "office/set",
                "availability_topic": "office/status",
                "payload_available": "up",
                "payload_not_available": "down",
                "device": {
                    "identifiers": ["office-1", "mac:00:11"],
                    "manufacturer": "Acme",
                    "model": "Box",
                    "sw_version": "1.2.3",
                    "via_device": "hub-1"
                }
            }"#,
        )
        .unwrap();

        let expected = PlayerConfig::new("Office")
            .with_unique_id("office_player")
            .with_device_class("tv")
            .with_state_topic("office/state")
            .with_command_topic("office/set")
            .with_availability_topic("office/status")
            .with_availability_payloads("up", "down")
            .with_device(DeviceInfo {
                identifiers: vec!["office-1".to_string(), "mac:00:11".to_string()],
                manufacturer: Some("Acme".to_string()),
                model: Some("Box".to_string()),
                sw_version: Some("1.2.3".to_string()),
                via_device: Some("hub-1".to_string()),
            });

        assert_eq!(config, expected);
        assert!(config.availability_tracker().evaluate(b"up"));
    }

    #[test]
    fn test_single_identifier() {
        let config =
            PlayerConfig::from_json(r#"{"name": "x", "device": {"identifiers": "abc"}}"#).unwrap();
        let device = config.device.unwrap();
        assert_eq!(device.identifiers, vec!["abc".to_string()]);
        assert!(!device.is_empty());
        assert!(DeviceInfo::default().is_empty());
    }

    #[test]
    fn test_default_name() {
        assert_eq!(PlayerConfig::default().name, DEFAULT_NAME);
    }
}
