use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Media player capabilities advertised to the host
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct MediaPlayerFeatures: u32 {
        const PAUSE = 1;
        const SEEK = 1 << 1;
        const VOLUME_SET = 1 << 2;
        const VOLUME_MUTE = 1 << 3;
        const PLAY_MEDIA = 1 << 9;
        const STOP = 1 << 12;
        const PLAY = 1 << 14;
    }
}

impl MediaPlayerFeatures {
    /// Everything the MQTT command schema can express
    pub const MQTT_PLAYER: Self = Self::VOLUME_SET
        .union(Self::VOLUME_MUTE)
        .union(Self::PLAY)
        .union(Self::PAUSE)
        .union(Self::STOP)
        .union(Self::PLAY_MEDIA)
        .union(Self::SEEK);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mqtt_player_features() {
        let features = MediaPlayerFeatures::MQTT_PLAYER;
        assert!(features.contains(MediaPlayerFeatures::PLAY | MediaPlayerFeatures::PAUSE));
        assert!(features.contains(MediaPlayerFeatures::SEEK));
        assert_eq!(features.iter().count(), 7);
    }
}
