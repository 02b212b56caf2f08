//! # MQTT Media Player - a remote player bridged into a host platform
//!
//! Represents a media-playback device that speaks JSON over MQTT:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mqtt_media_player::{MqttMediaPlayer, PlayerConfig, PlayerStateProvider};
//!
//! let config = PlayerConfig::new("Living Room")
//!     .with_state_topic("living_room/player/state")
//!     .with_command_topic("living_room/player/set")
//!     .with_availability_topic("living_room/player/status");
//!
//! // `client` is whatever MQTT client the host runs, implementing
//! // `Publisher` and `Subscriber`
//! let player = Arc::new(MqttMediaPlayer::new(config, client.clone())?);
//! player.attach(&*client).await?;
//!
//! player.set_volume_level(0.4).await?;           // {"volume": 40}
//! println!("{}", player.playback_status());      // read-only state
//! let mut watcher = player.watch();              // reactive updates
//! ```
//!
//! ## Architecture
//!
//! ```text
//! mqtt-media-player (entity, config)
//!     ↓                  ↓
//! player-state        player-api
//! (decode + store)    (encode + publish/subscribe capabilities)
//! ```
//!
//! The bridge owns no network connection. The host's MQTT client provides
//! the `Publisher` / `Subscriber` capabilities, and may also call
//! [`MqttMediaPlayer::on_state_message`] and
//! [`MqttMediaPlayer::on_availability_message`] directly.

// Main exports
pub use config::{DeviceInfo, PlayerConfig, DEFAULT_DEVICE_CLASS, DEFAULT_NAME};
pub use error::{PlayerError, Result};
pub use features::MediaPlayerFeatures;
pub use player::MqttMediaPlayer;

// Re-export commonly used types from the layers below
pub use player_api::{
    encode_command, ApiError, CommandIntent, CommandOutcome, MessageHandler, Publisher, Subscriber,
};
pub use player_state::{
    decode_state_message, DecodeError, PartialStateUpdate, PlaybackStatus, PlayerState,
    PlayerStateProvider, StateChange,
};
pub use player_state::{init_logging, init_logging_from_env, LoggingError, LoggingMode};

mod config;
mod error;
mod features;
mod player;
