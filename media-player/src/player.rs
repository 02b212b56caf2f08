//! The bridged media player entity
//!
//! Ties the pieces together: inbound payloads go through the decoder into the
//! state store, host commands go through the command client to the publisher.
//!
//! ```text
//! state topic        → on_state_message        → PlayerStateStore → observers
//! availability topic → on_availability_message ↗
//! host command call  → CommandIntent → encode_command → Publisher
//! ```

use std::sync::{Arc, Weak};

use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

use player_api::{
    CommandClient, CommandIntent, CommandOutcome, MessageHandler, Publisher, Subscriber,
};
use player_state::{
    decode_state_message, AvailabilityTracker, DecodeError, PlaybackStatus, PlayerState,
    PlayerStateProvider, PlayerStateStore, StateChange,
};

use crate::config::{DeviceInfo, PlayerConfig};
use crate::error::Result;
use crate::features::MediaPlayerFeatures;

/// A remote media player represented through MQTT
///
/// State resets to [`PlayerState::default`] on construction; nothing is
/// persisted. The entity exposes its state read-only through
/// [`PlayerStateProvider`].
///
/// # Example
///
/// ```rust,ignore
/// let player = Arc::new(MqttMediaPlayer::new(config, publisher)?);
/// player.attach(&subscriber).await?;
///
/// player.media_play().await?;
/// println!("Status: {}", player.playback_status());
/// ```
pub struct MqttMediaPlayer {
    config: PlayerConfig,
    store: PlayerStateStore,
    availability: AvailabilityTracker,
    commands: CommandClient,
}

impl MqttMediaPlayer {
    /// Create a player entity from a validated config
    pub fn new(config: PlayerConfig, publisher: Arc<dyn Publisher>) -> Result<Self> {
        config.validate()?;

        let availability = config.availability_tracker();
        let commands = CommandClient::new(config.command_topic.clone(), publisher);

        Ok(Self {
            config,
            store: PlayerStateStore::new(),
            availability,
            commands,
        })
    }

    /// Subscribe the inbound handlers to the configured topics
    ///
    /// Topics that are not configured are skipped. Handlers hold a weak
    /// reference, so dropping the entity stops processing.
    pub async fn attach(self: &Arc<Self>, subscriber: &dyn Subscriber) -> Result<()> {
        if let Some(topic) = self.config.state_topic.as_deref() {
            let player = Arc::downgrade(self);
            let handler: MessageHandler = Arc::new(move |payload: &[u8]| {
                if let Some(player) = Weak::upgrade(&player) {
                    // Failures are logged inside; nothing propagates to the subscriber
                    let _ = player.on_state_message(payload);
                }
            });
            subscriber.subscribe(topic, handler).await?;
            debug!(entity = %self.config.name, topic, "Subscribed to state topic");
        }

        if let Some(topic) = self.config.availability_topic.as_deref() {
            let player = Arc::downgrade(self);
            let handler: MessageHandler = Arc::new(move |payload: &[u8]| {
                if let Some(player) = Weak::upgrade(&player) {
                    player.on_availability_message(payload);
                }
            });
            subscriber.subscribe(topic, handler).await?;
            debug!(entity = %self.config.name, topic, "Subscribed to availability topic");
        }

        Ok(())
    }

    // ========================================================================
    // Inbound handlers
    // ========================================================================

    /// Handle a message from the state topic
    ///
    /// Malformed payloads are logged and leave the state untouched. On success
    /// returns the keys of the fields that changed; observers are notified
    /// once either way.
    pub fn on_state_message(
        &self,
        payload: &[u8],
    ) -> std::result::Result<Vec<&'static str>, DecodeError> {
        let update = decode_state_message(payload).map_err(|e| {
            warn!(
                entity = %self.config.name,
                payload = %String::from_utf8_lossy(payload),
                error = %e,
                "Invalid JSON payload received"
            );
            e
        })?;

        Ok(self.store.apply(&update))
    }

    /// Handle a message from the availability topic, returns the new availability
    pub fn on_availability_message(&self, payload: &[u8]) -> bool {
        let available = self.availability.evaluate(payload);
        if self.store.set_available(available) {
            debug!(entity = %self.config.name, available, "Availability changed");
        }
        available
    }

    // ========================================================================
    // Host commands
    // ========================================================================

    /// Set volume level, range 0..1
    pub async fn set_volume_level(&self, volume: f64) -> Result<CommandOutcome> {
        self.send(CommandIntent::SetVolume(volume.clamp(0.0, 1.0)))
            .await
    }

    pub async fn mute_volume(&self, mute: bool) -> Result<CommandOutcome> {
        self.send(CommandIntent::SetMute(mute)).await
    }

    pub async fn media_play(&self) -> Result<CommandOutcome> {
        self.send(CommandIntent::Play).await
    }

    pub async fn media_pause(&self) -> Result<CommandOutcome> {
        self.send(CommandIntent::Pause).await
    }

    pub async fn media_stop(&self) -> Result<CommandOutcome> {
        self.send(CommandIntent::Stop).await
    }

    /// Seek to a position in seconds, negative positions seek to the start
    pub async fn media_seek(&self, position: f64) -> Result<CommandOutcome> {
        self.send(CommandIntent::Seek(position.max(0.0).round() as u64))
            .await
    }

    /// Play a piece of media
    pub async fn play_media(&self, media_type: &str, media_id: &str) -> Result<CommandOutcome> {
        self.send(CommandIntent::play_media(media_type, media_id))
            .await
    }

    async fn send(&self, intent: CommandIntent) -> Result<CommandOutcome> {
        Ok(self.commands.send(&intent).await?)
    }

    // ========================================================================
    // Entity metadata
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn unique_id(&self) -> Option<&str> {
        self.config.unique_id.as_deref()
    }

    pub fn device_class(&self) -> &str {
        &self.config.device_class
    }

    /// Device descriptor, `None` unless a non-empty one was configured
    pub fn device_info(&self) -> Option<&DeviceInfo> {
        self.config.device.as_ref().filter(|device| !device.is_empty())
    }

    pub fn supported_features(&self) -> MediaPlayerFeatures {
        MediaPlayerFeatures::MQTT_PLAYER
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    // ========================================================================
    // Observing
    // ========================================================================

    /// Get a watch receiver for the whole state
    pub fn watch(&self) -> watch::Receiver<PlayerState> {
        self.store.watch()
    }

    /// Subscribe to one notification per processed inbound message
    pub fn subscribe_changes(&self) -> broadcast::Receiver<StateChange> {
        self.store.subscribe_changes()
    }
}

impl PlayerStateProvider for MqttMediaPlayer {
    fn state(&self) -> PlayerState {
        self.store.snapshot()
    }

    fn playback_status(&self) -> PlaybackStatus {
        self.store.playback_status()
    }

    fn volume_level(&self) -> f64 {
        self.store.volume_level()
    }

    fn is_muted(&self) -> bool {
        self.store.is_muted()
    }

    fn available(&self) -> bool {
        self.store.available()
    }
}

impl std::fmt::Debug for MqttMediaPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MqttMediaPlayer")
            .field("name", &self.config.name)
            .field("unique_id", &self.config.unique_id)
            .field("state", &self.store.snapshot())
            .finish_non_exhaustive()
    }
}
