//! Read-only access to a player's state
//!
//! Host entity layers depend on this trait instead of a concrete entity type.
//! Implementors only need to hand out a snapshot; the accessors follow.

use chrono::{DateTime, Utc};

use crate::model::{PlaybackStatus, PlayerState};
use crate::store::PlayerStateStore;

/// Capability to expose a `PlayerState` read-only
pub trait PlayerStateProvider {
    /// Current state snapshot
    fn state(&self) -> PlayerState;

    fn playback_status(&self) -> PlaybackStatus {
        self.state().playback_status
    }

    /// Volume level of the media player (0..1)
    fn volume_level(&self) -> f64 {
        self.state().volume_level
    }

    fn is_muted(&self) -> bool {
        self.state().is_muted
    }

    fn media_title(&self) -> Option<String> {
        self.state().media_title
    }

    fn media_artist(&self) -> Option<String> {
        self.state().media_artist
    }

    fn media_album(&self) -> Option<String> {
        self.state().media_album
    }

    fn media_content_type(&self) -> Option<String> {
        self.state().media_content_type
    }

    /// Duration of current media in seconds
    fn media_duration(&self) -> Option<u64> {
        self.state().media_duration
    }

    /// Position of current media in seconds
    fn media_position(&self) -> Option<u64> {
        self.state().media_position
    }

    /// When the position of the current media was last reported
    fn media_position_updated_at(&self) -> Option<DateTime<Utc>> {
        self.state().media_position_updated_at
    }

    fn available(&self) -> bool {
        self.state().available
    }
}

impl PlayerStateProvider for PlayerStateStore {
    fn state(&self) -> PlayerState {
        self.snapshot()
    }

    fn playback_status(&self) -> PlaybackStatus {
        self.read(|state| state.playback_status)
    }

    fn volume_level(&self) -> f64 {
        self.read(|state| state.volume_level)
    }

    fn is_muted(&self) -> bool {
        self.read(|state| state.is_muted)
    }

    fn available(&self) -> bool {
        self.read(|state| state.available)
    }
}
