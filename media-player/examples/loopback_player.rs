//! Drive an MQTT media player against an in-process loopback broker
//!
//! The loopback routes every publish straight to the subscribed handlers and
//! plays the part of the remote device: commands it receives are echoed back
//! as state reports.
//!
//! Run with: cargo run -p mqtt-media-player --example loopback_player
//! Set MQTT_PLAYER_LOG_MODE=debug to see the bridge's tracing output.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use mqtt_media_player::{
    init_logging_from_env, ApiError, MessageHandler, MqttMediaPlayer, PlayerConfig,
    PlayerStateProvider, Publisher, StateChange, Subscriber,
};

const STATE_TOPIC: &str = "den/player/state";
const COMMAND_TOPIC: &str = "den/player/set";
const AVAILABILITY_TOPIC: &str = "den/player/status";

#[derive(Default)]
struct LoopbackBroker {
    handlers: Mutex<HashMap<String, MessageHandler>>,
}

impl LoopbackBroker {
    fn deliver(&self, topic: &str, payload: &[u8]) {
        let handler = self.handlers.lock().unwrap().get(topic).cloned();
        if let Some(handler) = handler {
            handler(payload);
        }
    }

    /// Turn a command payload into the state report a real device would send
    fn device_reply(command: &Value) -> Value {
        match command.get("command").and_then(Value::as_str) {
            Some("play") => json!({ "state": "playing" }),
            Some("pause") => json!({ "state": "paused" }),
            Some("stop") => json!({ "state": "stopped", "media_position": 0 }),
            Some("seek") => json!({ "media_position": command["position"] }),
            Some(_) => json!({}),
            None => command.clone(),
        }
    }
}

#[async_trait]
impl Publisher for LoopbackBroker {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), ApiError> {
        println!("   -> {} {}", topic, String::from_utf8_lossy(&payload));

        if topic == COMMAND_TOPIC {
            let command: Value = serde_json::from_slice(&payload)
                .map_err(|e| ApiError::publish_failure(topic, e.to_string()))?;
            let reply = Self::device_reply(&command).to_string();
            self.deliver(STATE_TOPIC, reply.as_bytes());
        } else {
            self.deliver(topic, &payload);
        }
        Ok(())
    }
}

#[async_trait]
impl Subscriber for LoopbackBroker {
    async fn subscribe(&self, topic: &str, handler: MessageHandler) -> Result<(), ApiError> {
        println!("   subscribed to {}", topic);
        self.handlers
            .lock()
            .unwrap()
            .insert(topic.to_string(), handler);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging_from_env()?;

    println!("MQTT Media Player - Loopback Example");
    println!("====================================");

    let broker = Arc::new(LoopbackBroker::default());
    let config = PlayerConfig::new("Den Speaker")
        .with_unique_id("den_speaker")
        .with_state_topic(STATE_TOPIC)
        .with_command_topic(COMMAND_TOPIC)
        .with_availability_topic(AVAILABILITY_TOPIC);

    let player = Arc::new(MqttMediaPlayer::new(config, broker.clone())?);
    player.attach(&*broker).await?;

    let mut changes = player.subscribe_changes();

    println!("\nDevice comes online:");
    broker.publish(AVAILABILITY_TOPIC, b"online".to_vec()).await?;
    broker
        .publish(
            STATE_TOPIC,
            json!({
                "state": "stopped",
                "volume": 20,
                "media_title": "Blue in Green",
                "media_artist": "Miles Davis",
                "media_album": "Kind of Blue",
                "media_duration": 337
            })
            .to_string()
            .into_bytes(),
        )
        .await?;

    println!("\nHost commands:");
    player.set_volume_level(0.45).await?;
    player.media_play().await?;
    player.media_seek(90.0).await?;

    println!("\nChanges observed:");
    while let Ok(change) = changes.try_recv() {
        match change {
            StateChange::StateUpdated { changed } => println!("   state: {:?}", changed),
            StateChange::AvailabilityUpdated { available, .. } => {
                println!("   available: {}", available)
            }
        }
    }

    let state = player.state();
    println!("\nFinal state:");
    if let Some(now_playing) = state.display() {
        println!("   {}", now_playing);
    }
    println!("   status:    {}", state.playback_status);
    println!("   volume:    {:.2}", state.volume_level);
    println!("   available: {}", state.available);

    Ok(())
}
