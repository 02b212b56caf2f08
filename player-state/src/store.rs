//! Player state store with reactive watchers
//!
//! The store owns the single `PlayerState` of a bridged entity. All mutation
//! goes through two paths, the decode-merge path ([`PlayerStateStore::apply`])
//! and the availability path ([`PlayerStateStore::set_available`]). Both run to
//! completion under the exclusive write lock of a `tokio::sync::watch`
//! channel, so observers only ever see fully merged messages. The
//! `StateChange` broadcast is sent while that lock is held, so change events
//! arrive in the same order the messages were merged.
//!
//! # Architecture
//!
//! ```text
//! PlayerStateStore
//! ├── state_tx: watch::Sender<PlayerState>       (snapshot + reactive reads)
//! └── changes_tx: broadcast::Sender<StateChange> (one event per message)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let store = PlayerStateStore::new();
//!
//! // Query current value (instant)
//! println!("Volume: {}", store.snapshot().volume_level);
//!
//! // Watch for changes (reactive)
//! let mut rx = store.watch();
//! tokio::spawn(async move {
//!     while rx.changed().await.is_ok() {
//!         println!("Status: {}", rx.borrow().playback_status);
//!     }
//! });
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::trace;

use crate::decoder::{FieldUpdate, PartialStateUpdate};
use crate::model::{PlayerState, StateChange};

/// Capacity of the change broadcast channel
const CHANGE_BUFFER_SIZE: usize = 1024;

/// Reactive store for one bridged player
///
/// Cloning the store yields another handle to the same state.
pub struct PlayerStateStore {
    /// Current state, exclusively locked while a message is merged
    state_tx: Arc<watch::Sender<PlayerState>>,

    /// Broadcast channel for per-message notifications
    changes_tx: broadcast::Sender<StateChange>,
}

impl PlayerStateStore {
    /// Create a store holding the default `PlayerState`
    pub fn new() -> Self {
        Self::with_state(PlayerState::default())
    }

    /// Create a store with a specific initial state
    pub fn with_state(initial: PlayerState) -> Self {
        let (state_tx, _) = watch::channel(initial);
        let (changes_tx, _) = broadcast::channel(CHANGE_BUFFER_SIZE);

        Self {
            state_tx: Arc::new(state_tx),
            changes_tx,
        }
    }

    // ========================================================================
    // Reading
    // ========================================================================

    /// Get a copy of the current state
    pub fn snapshot(&self) -> PlayerState {
        self.state_tx.borrow().clone()
    }

    /// Read the current state without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&PlayerState) -> R) -> R {
        f(&self.state_tx.borrow())
    }

    /// Get a watch receiver for the whole state
    ///
    /// The receiver is marked changed once per applied message.
    pub fn watch(&self) -> watch::Receiver<PlayerState> {
        self.state_tx.subscribe()
    }

    /// Subscribe to per-message change notifications
    pub fn subscribe_changes(&self) -> broadcast::Receiver<StateChange> {
        self.changes_tx.subscribe()
    }

    // ========================================================================
    // Writing
    // ========================================================================

    /// Merge a decoded state message, stamping position changes with now
    ///
    /// Returns the keys of the fields whose value changed.
    pub fn apply(&self, update: &PartialStateUpdate) -> Vec<&'static str> {
        self.apply_at(update, Utc::now())
    }

    /// Merge a decoded state message using an explicit timestamp
    ///
    /// Fields absent from `update` are left untouched. If `media_position`
    /// changes, `media_position_updated_at` is set to `now`; no other field
    /// touches the stamp. Exactly one notification is emitted, even when
    /// nothing changed.
    pub fn apply_at(&self, update: &PartialStateUpdate, now: DateTime<Utc>) -> Vec<&'static str> {
        let mut changed = Vec::new();

        self.state_tx.send_modify(|state| {
            for change in &update.changes {
                if change.apply_to(state) {
                    changed.push(change.key());

                    if matches!(change, FieldUpdate::MediaPosition(_)) {
                        state.media_position_updated_at = Some(now);
                    }
                }
            }

            // Broadcast under the lock so events keep the order of the merges
            let _ = self.changes_tx.send(StateChange::StateUpdated {
                changed: changed.clone(),
            });
        });

        trace!(?changed, "Applied state update");

        changed
    }

    /// Set availability, notifying observers even if the value is unchanged
    ///
    /// Returns true if the value changed.
    pub fn set_available(&self, available: bool) -> bool {
        let mut changed = false;

        self.state_tx.send_modify(|state| {
            changed = state.available != available;
            state.available = available;

            let _ = self
                .changes_tx
                .send(StateChange::AvailabilityUpdated { available, changed });
        });

        changed
    }
}

impl Default for PlayerStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PlayerStateStore {
    fn clone(&self) -> Self {
        Self {
            state_tx: self.state_tx.clone(),
            changes_tx: self.changes_tx.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
