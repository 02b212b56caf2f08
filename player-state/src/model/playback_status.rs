//! Playback status enumeration

use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized playback status of the bridged player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    /// Device is switched off (initial status)
    #[default]
    Off,
    /// Device is on but nothing is playing
    Idle,
    /// Currently playing media
    Playing,
    /// Playback is paused
    Paused,
    /// Device reported a status we don't recognize
    Unknown,
}

impl PlaybackStatus {
    /// Resolve a device-reported status string
    ///
    /// Matching is case-insensitive:
    /// - "playing" -> Playing
    /// - "paused" -> Paused
    /// - "stopped" -> Idle
    /// - "off" -> Off
    ///
    /// Anything else, including the empty string, resolves to `Unknown`.
    pub fn from_device_state(state: &str) -> Self {
        match state.to_lowercase().as_str() {
            "playing" => PlaybackStatus::Playing,
            "paused" => PlaybackStatus::Paused,
            "stopped" => PlaybackStatus::Idle,
            "off" => PlaybackStatus::Off,
            _ => PlaybackStatus::Unknown,
        }
    }

    /// Host-facing state string
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackStatus::Off => "off",
            PlaybackStatus::Idle => "idle",
            PlaybackStatus::Playing => "playing",
            PlaybackStatus::Paused => "paused",
            PlaybackStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
