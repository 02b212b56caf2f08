//! Authoritative snapshot of the bridged player

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PlaybackStatus;

/// Current state of the remote media player
///
/// A fresh `PlayerState` is what the entity reports before the device has
/// published anything: switched off, silent, unmuted, no media and available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Playback status
    pub playback_status: PlaybackStatus,
    /// Volume level (0.0 to 1.0)
    pub volume_level: f64,
    /// Whether the volume is muted
    pub is_muted: bool,
    pub media_title: Option<String>,
    pub media_artist: Option<String>,
    pub media_album: Option<String>,
    pub media_content_type: Option<String>,
    /// Duration of the current media in seconds
    pub media_duration: Option<u64>,
    /// Position within the current media in seconds
    pub media_position: Option<u64>,
    /// When `media_position` last changed (wall-clock UTC)
    pub media_position_updated_at: Option<DateTime<Utc>>,
    /// Liveness as reported on the availability topic
    pub available: bool,
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            playback_status: PlaybackStatus::Off,
            volume_level: 0.0,
            is_muted: false,
            media_title: None,
            media_artist: None,
            media_album: None,
            media_content_type: None,
            media_duration: None,
            media_position: None,
            media_position_updated_at: None,
            available: true,
        }
    }

    /// Get a display string for the current media
    pub fn display(&self) -> Option<String> {
        match (&self.media_artist, &self.media_title) {
            (Some(artist), Some(title)) => Some(format!("{} - {}", artist, title)),
            (None, Some(title)) => Some(title.clone()),
            (Some(artist), None) => Some(artist.clone()),
            (None, None) => None,
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = PlayerState::default();
        assert_eq!(state.playback_status, PlaybackStatus::Off);
        assert_eq!(state.volume_level, 0.0);
        assert!(!state.is_muted);
        assert!(state.media_title.is_none());
        assert!(state.media_artist.is_none());
        assert!(state.media_album.is_none());
        assert!(state.media_content_type.is_none());
        assert!(state.media_duration.is_none());
        assert!(state.media_position.is_none());
        assert!(state.media_position_updated_at.is_none());
        assert!(state.available);
    }

    #[test]
    fn test_display() {
        let mut state = PlayerState::new();
        assert_eq!(state.display(), None);

        state.media_title = Some("Song".to_string());
        assert_eq!(state.display().as_deref(), Some("Song"));

        state.media_artist = Some("Artist".to_string());
        assert_eq!(state.display().as_deref(), Some("Artist - Song"));
    }
}
