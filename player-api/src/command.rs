//! Outbound command intents and their JSON wire format
//!
//! Each host command call becomes one [`CommandIntent`], which
//! [`encode_command`] turns into the payload published on the command topic:
//!
//! | Intent | Payload |
//! |---|---|
//! | `SetVolume(v)` | `{"volume": round(v*100)}` |
//! | `SetMute(m)` | `{"muted": m}` |
//! | `Play` / `Pause` / `Stop` | `{"command": "play"}` etc. |
//! | `Seek(p)` | `{"command": "seek", "position": p}` |
//! | `PlayMedia` | `{"command": "play_media", "media_type": t, "media_id": id}` |

use std::fmt;

use serde::Serialize;

/// A single host-issued command, prior to encoding
#[derive(Debug, Clone, PartialEq)]
pub enum CommandIntent {
    /// Set volume level (0.0 to 1.0, clamped by the caller)
    SetVolume(f64),
    SetMute(bool),
    Play,
    Pause,
    Stop,
    /// Seek to a position in seconds
    Seek(u64),
    PlayMedia {
        media_type: String,
        media_id: String,
    },
}

impl CommandIntent {
    /// Short name used for logging
    pub fn name(&self) -> &'static str {
        match self {
            CommandIntent::SetVolume(_) => "set_volume",
            CommandIntent::SetMute(_) => "set_mute",
            CommandIntent::Play => "play",
            CommandIntent::Pause => "pause",
            CommandIntent::Stop => "stop",
            CommandIntent::Seek(_) => "seek",
            CommandIntent::PlayMedia { .. } => "play_media",
        }
    }

    /// Build a play-media intent
    pub fn play_media(media_type: impl Into<String>, media_id: impl Into<String>) -> Self {
        CommandIntent::PlayMedia {
            media_type: media_type.into(),
            media_id: media_id.into(),
        }
    }
}

impl fmt::Display for CommandIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandIntent::SetVolume(v) => write!(f, "set_volume({})", v),
            CommandIntent::SetMute(m) => write!(f, "set_mute({})", m),
            CommandIntent::Seek(p) => write!(f, "seek({})", p),
            CommandIntent::PlayMedia {
                media_type,
                media_id,
            } => write!(f, "play_media({}, {})", media_type, media_id),
            other => f.write_str(other.name()),
        }
    }
}

/// Wire shape of a command payload, fields serialize in declaration order
#[derive(Serialize)]
#[serde(untagged)]
enum CommandPayload<'a> {
    Volume {
        volume: i64,
    },
    Muted {
        muted: bool,
    },
    Transport {
        command: &'static str,
    },
    Seek {
        command: &'static str,
        position: u64,
    },
    PlayMedia {
        command: &'static str,
        media_type: &'a str,
        media_id: &'a str,
    },
}

impl<'a> From<&'a CommandIntent> for CommandPayload<'a> {
    fn from(intent: &'a CommandIntent) -> Self {
        match intent {
            CommandIntent::SetVolume(level) => CommandPayload::Volume {
                volume: (level * 100.0).round() as i64,
            },
            CommandIntent::SetMute(muted) => CommandPayload::Muted { muted: *muted },
            CommandIntent::Play => CommandPayload::Transport { command: "play" },
            CommandIntent::Pause => CommandPayload::Transport { command: "pause" },
            CommandIntent::Stop => CommandPayload::Transport { command: "stop" },
            CommandIntent::Seek(position) => CommandPayload::Seek {
                command: "seek",
                position: *position,
            },
            CommandIntent::PlayMedia {
                media_type,
                media_id,
            } => CommandPayload::PlayMedia {
                command: "play_media",
                media_type: media_type.as_str(),
                media_id: media_id.as_str(),
            },
        }
    }
}

/// Encode a command intent as a JSON payload
///
/// Never fails: every intent maps onto plain JSON scalars. No range checks are
/// performed beyond rounding the volume to an integer percentage.
pub fn encode_command(intent: &CommandIntent) -> Vec<u8> {
    serde_json::to_vec(&CommandPayload::from(intent))
        .expect("serializing command payload")
}
