//! State message decoder - converts raw state-topic payloads to field updates
//!
//! The device publishes a JSON object on its state topic. Every recognized key
//! is decoded on its own: a bad value for one key is recorded as a
//! [`FieldCoercionFailure`] and never prevents the other keys from applying.
//!
//! ```text
//! raw bytes → JSON object → PartialStateUpdate { changes, failures }
//! ```
//!
//! Only a payload that is not a JSON object at all is rejected as a whole.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{DecodeError, FieldCoercionFailure, Result};
use crate::model::{PlaybackStatus, PlayerState};

/// Payload keys understood on the state topic
pub mod keys {
    pub const STATE: &str = "state";
    pub const VOLUME: &str = "volume";
    pub const MUTED: &str = "muted";
    pub const MEDIA_TITLE: &str = "media_title";
    pub const MEDIA_ARTIST: &str = "media_artist";
    pub const MEDIA_ALBUM: &str = "media_album";
    pub const MEDIA_CONTENT_TYPE: &str = "media_content_type";
    pub const MEDIA_DURATION: &str = "media_duration";
    pub const MEDIA_POSITION: &str = "media_position";
}

/// Upper bound of the device volume scale
const VOLUME_SCALE: f64 = 100.0;

/// A single decoded field, ready to be merged onto a `PlayerState`
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    PlaybackStatus(PlaybackStatus),
    /// Already scaled to 0.0..=1.0
    VolumeLevel(f64),
    Muted(bool),
    MediaTitle(Option<String>),
    MediaArtist(Option<String>),
    MediaAlbum(Option<String>),
    MediaContentType(Option<String>),
    MediaDuration(u64),
    MediaPosition(u64),
}

impl FieldUpdate {
    /// Get the payload key this update was decoded from
    pub fn key(&self) -> &'static str {
        match self {
            FieldUpdate::PlaybackStatus(_) => keys::STATE,
            FieldUpdate::VolumeLevel(_) => keys::VOLUME,
            FieldUpdate::Muted(_) => keys::MUTED,
            FieldUpdate::MediaTitle(_) => keys::MEDIA_TITLE,
            FieldUpdate::MediaArtist(_) => keys::MEDIA_ARTIST,
            FieldUpdate::MediaAlbum(_) => keys::MEDIA_ALBUM,
            FieldUpdate::MediaContentType(_) => keys::MEDIA_CONTENT_TYPE,
            FieldUpdate::MediaDuration(_) => keys::MEDIA_DURATION,
            FieldUpdate::MediaPosition(_) => keys::MEDIA_POSITION,
        }
    }

    /// Write this update into `state`, returns true if the value changed
    pub fn apply_to(&self, state: &mut PlayerState) -> bool {
        match self {
            FieldUpdate::PlaybackStatus(status) => replace(&mut state.playback_status, *status),
            FieldUpdate::VolumeLevel(level) => replace(&mut state.volume_level, *level),
            FieldUpdate::Muted(muted) => replace(&mut state.is_muted, *muted),
            FieldUpdate::MediaTitle(title) => replace(&mut state.media_title, title.clone()),
            FieldUpdate::MediaArtist(artist) => replace(&mut state.media_artist, artist.clone()),
            FieldUpdate::MediaAlbum(album) => replace(&mut state.media_album, album.clone()),
            FieldUpdate::MediaContentType(content_type) => {
                replace(&mut state.media_content_type, content_type.clone())
            }
            FieldUpdate::MediaDuration(duration) => {
                replace(&mut state.media_duration, Some(*duration))
            }
            FieldUpdate::MediaPosition(position) => {
                replace(&mut state.media_position, Some(*position))
            }
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot != value {
        *slot = value;
        true
    } else {
        false
    }
}

/// Recognized and valid fields extracted from one state message
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialStateUpdate {
    /// Field updates in payload-key order
    pub changes: Vec<FieldUpdate>,
    /// Recognized keys whose value was rejected
    pub failures: Vec<FieldCoercionFailure>,
}

impl PartialStateUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the message carried no applicable field
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Check if a field update for `key` is present
    pub fn contains(&self, key: &str) -> bool {
        self.changes.iter().any(|change| change.key() == key)
    }
}

/// Decode a raw state-topic payload
///
/// Fails with [`DecodeError::MalformedPayload`] only when the payload is not a
/// UTF-8 JSON object. Per-key problems end up in
/// [`PartialStateUpdate::failures`].
pub fn decode_state_message(payload: &[u8]) -> Result<PartialStateUpdate> {
    let value: Value = serde_json::from_slice(payload)
        .map_err(|e| DecodeError::MalformedPayload(e.to_string()))?;

    let Value::Object(object) = value else {
        return Err(DecodeError::MalformedPayload(format!(
            "expected a JSON object, got {}",
            json_type(&value)
        )));
    };

    Ok(decode_object(&object))
}

/// Decode an already parsed JSON object
pub fn decode_object(object: &Map<String, Value>) -> PartialStateUpdate {
    let mut update = PartialStateUpdate::new();

    let mut record = |result: std::result::Result<FieldUpdate, FieldCoercionFailure>| match result {
        Ok(change) => update.changes.push(change),
        Err(failure) => {
            debug!(key = failure.key, reason = %failure.reason, "Skipping state field");
            update.failures.push(failure);
        }
    };

    if let Some(value) = object.get(keys::STATE) {
        record(decode_status(value));
    }

    if let Some(value) = object.get(keys::VOLUME) {
        record(decode_volume(value));
    }

    if let Some(value) = object.get(keys::MUTED) {
        record(Ok(FieldUpdate::Muted(coerce_bool(value))));
    }

    if let Some(value) = object.get(keys::MEDIA_TITLE) {
        record(Ok(FieldUpdate::MediaTitle(coerce_text(value))));
    }

    if let Some(value) = object.get(keys::MEDIA_ARTIST) {
        record(Ok(FieldUpdate::MediaArtist(coerce_text(value))));
    }

    if let Some(value) = object.get(keys::MEDIA_ALBUM) {
        record(Ok(FieldUpdate::MediaAlbum(coerce_text(value))));
    }

    if let Some(value) = object.get(keys::MEDIA_CONTENT_TYPE) {
        record(Ok(FieldUpdate::MediaContentType(coerce_text(value))));
    }

    if let Some(value) = object.get(keys::MEDIA_DURATION) {
        record(parse_seconds(keys::MEDIA_DURATION, value).map(FieldUpdate::MediaDuration));
    }

    if let Some(value) = object.get(keys::MEDIA_POSITION) {
        record(parse_seconds(keys::MEDIA_POSITION, value).map(FieldUpdate::MediaPosition));
    }

    update
}

fn decode_status(value: &Value) -> std::result::Result<FieldUpdate, FieldCoercionFailure> {
    match value {
        Value::String(state) => Ok(FieldUpdate::PlaybackStatus(
            PlaybackStatus::from_device_state(state),
        )),
        other => Err(FieldCoercionFailure::new(
            keys::STATE,
            format!("expected a string, got {}", json_type(other)),
        )),
    }
}

fn decode_volume(value: &Value) -> std::result::Result<FieldUpdate, FieldCoercionFailure> {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
    .ok_or_else(|| {
        FieldCoercionFailure::new(keys::VOLUME, format!("not a number: {}", value))
    })?;

    if !(0.0..=VOLUME_SCALE).contains(&raw) {
        return Err(FieldCoercionFailure::new(
            keys::VOLUME,
            format!("{} is out of range [0, {}]", raw, VOLUME_SCALE),
        ));
    }

    Ok(FieldUpdate::VolumeLevel(raw / VOLUME_SCALE))
}

/// Parse a non-negative whole number of seconds
///
/// Accepts integers, non-negative floats (truncated toward zero) and integer
/// strings.
fn parse_seconds(
    key: &'static str,
    value: &Value,
) -> std::result::Result<u64, FieldCoercionFailure> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && *f < u64::MAX as f64)
                .map(|f| f.trunc() as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| {
        FieldCoercionFailure::new(key, format!("not a non-negative integer: {}", value))
    })
}

/// Lossy boolean coercion, never fails
///
/// Follows truthiness: any non-empty string is true, whatever it says.
fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Null => false,
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Metadata passes through verbatim; `null` clears the field
fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(payload: &str) -> PartialStateUpdate {
        decode_state_message(payload.as_bytes()).unwrap()
    }

    #[test]
    fn test_decode_full_message() {
        let update = decode(
            r#"{
                "state": "playing",
                "volume": 55,
                "muted": false,
                "media_title": "Song",
                "media_artist": "Artist",
                "media_album": "Album",
                "media_content_type": "music",
                "media_duration": 240,
                "media_position": 42
            }"#,
        );

        assert!(update.failures.is_empty());
        assert_eq!(
            update.changes,
            vec![
                FieldUpdate::PlaybackStatus(PlaybackStatus::Playing),
                FieldUpdate::VolumeLevel(0.55),
                FieldUpdate::Muted(false),
                FieldUpdate::MediaTitle(Some("Song".to_string())),
                FieldUpdate::MediaArtist(Some("Artist".to_string())),
                FieldUpdate::MediaAlbum(Some("Album".to_string())),
                FieldUpdate::MediaContentType(Some("music".to_string())),
                FieldUpdate::MediaDuration(240),
                FieldUpdate::MediaPosition(42),
            ]
        );
    }

    #[test]
    fn test_state_any_case() {
        let update = decode(r#"{"state": "Playing"}"#);
        assert_eq!(
            update.changes,
            vec![FieldUpdate::PlaybackStatus(PlaybackStatus::Playing)]
        );

        let update = decode(r#"{"state": "STOPPED"}"#);
        assert_eq!(
            update.changes,
            vec![FieldUpdate::PlaybackStatus(PlaybackStatus::Idle)]
        );
    }

    #[test]
    fn test_state_unrecognized_is_unknown() {
        let update = decode(r#"{"state": "bogus"}"#);
        assert_eq!(
            update.changes,
            vec![FieldUpdate::PlaybackStatus(PlaybackStatus::Unknown)]
        );
        assert!(update.failures.is_empty());
    }

    #[test]
    fn test_state_non_string_is_skipped() {
        let update = decode(r#"{"state": 3, "volume": 10}"#);
        assert!(!update.contains(keys::STATE));
        assert!(update.contains(keys::VOLUME));
        assert_eq!(update.failures.len(), 1);
        assert_eq!(update.failures[0].key, keys::STATE);
    }

    #[test]
    fn test_volume_scaling() {
        assert_eq!(
            decode(r#"{"volume": 55}"#).changes,
            vec![FieldUpdate::VolumeLevel(0.55)]
        );
        assert_eq!(
            decode(r#"{"volume": 12.5}"#).changes,
            vec![FieldUpdate::VolumeLevel(0.125)]
        );
        assert_eq!(
            decode(r#"{"volume": "40"}"#).changes,
            vec![FieldUpdate::VolumeLevel(0.4)]
        );
        assert_eq!(
            decode(r#"{"volume": 100}"#).changes,
            vec![FieldUpdate::VolumeLevel(1.0)]
        );
    }

    #[test]
    fn test_volume_invalid_is_skipped() {
        for payload in [
            r#"{"volume": "abc"}"#,
            r#"{"volume": null}"#,
            r#"{"volume": true}"#,
            r#"{"volume": 101}"#,
            r#"{"volume": -1}"#,
            r#"{"volume": [50]}"#,
        ] {
            let update = decode(payload);
            assert!(update.is_empty(), "payload {} should not decode", payload);
            assert_eq!(update.failures.len(), 1);
            assert_eq!(update.failures[0].key, keys::VOLUME);
        }
    }

    #[test]
    fn test_muted_coercion() {
        let cases = [
            ("true", true),
            ("false", false),
            ("1", true),
            ("0", false),
            ("0.0", false),
            (r#""true""#, true),
            (r#""false""#, true),
            (r#""0""#, true),
            (r#""off""#, true),
            (r#""no""#, true),
            (r#""yes please""#, true),
            (r#"" ""#, true),
            (r#""""#, false),
            ("null", false),
            ("[]", false),
            ("[1]", true),
            ("{}", false),
        ];

        for (raw, expected) in cases {
            let update = decode(&format!(r#"{{"muted": {}}}"#, raw));
            assert_eq!(
                update.changes,
                vec![FieldUpdate::Muted(expected)],
                "muted: {}",
                raw
            );
        }
    }

    #[test]
    fn test_text_fields_pass_through() {
        let update = decode(r#"{"media_title": "", "media_artist": null, "media_album": 7}"#);
        assert_eq!(
            update.changes,
            vec![
                FieldUpdate::MediaTitle(Some(String::new())),
                FieldUpdate::MediaArtist(None),
                FieldUpdate::MediaAlbum(Some("7".to_string())),
            ]
        );
    }

    #[test]
    fn test_seconds_parsing() {
        assert_eq!(
            decode(r#"{"media_position": "42"}"#).changes,
            vec![FieldUpdate::MediaPosition(42)]
        );
        assert_eq!(
            decode(r#"{"media_duration": 99.9}"#).changes,
            vec![FieldUpdate::MediaDuration(99)]
        );

        for payload in [
            r#"{"media_position": -5}"#,
            r#"{"media_position": "4.2"}"#,
            r#"{"media_position": "soon"}"#,
            r#"{"media_position": false}"#,
        ] {
            let update = decode(payload);
            assert!(update.is_empty(), "payload {} should not decode", payload);
            assert_eq!(update.failures[0].key, keys::MEDIA_POSITION);
        }
    }

    #[test]
    fn test_invalid_field_does_not_block_others() {
        let update = decode(r#"{"volume": "abc", "media_duration": "x", "media_title": "X"}"#);
        assert_eq!(
            update.changes,
            vec![FieldUpdate::MediaTitle(Some("X".to_string()))]
        );
        assert_eq!(update.failures.len(), 2);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let update = decode(r#"{"shuffle": true, "repeat": "all"}"#);
        assert!(update.is_empty());
        assert!(update.failures.is_empty());
    }

    #[test]
    fn test_malformed_payloads() {
        for payload in ["hello", "", "{\"state\":", "[1, 2]", "42", "\"playing\"", "null"] {
            let result = decode_state_message(payload.as_bytes());
            assert!(
                matches!(result, Err(DecodeError::MalformedPayload(_))),
                "payload {:?} should be malformed",
                payload
            );
        }

        let result = decode_state_message(&[0xff, 0xfe, 0x7b]);
        assert!(matches!(result, Err(DecodeError::MalformedPayload(_))));
    }

    #[test]
    fn test_field_update_key() {
        assert_eq!(FieldUpdate::VolumeLevel(0.5).key(), "volume");
        assert_eq!(FieldUpdate::Muted(true).key(), "muted");
        assert_eq!(
            FieldUpdate::PlaybackStatus(PlaybackStatus::Paused).key(),
            "state"
        );
        assert_eq!(FieldUpdate::MediaPosition(1).key(), "media_position");
    }

    #[test]
    fn test_apply_to_reports_changes() {
        let mut state = PlayerState::new();

        assert!(FieldUpdate::VolumeLevel(0.3).apply_to(&mut state));
        assert!(!FieldUpdate::VolumeLevel(0.3).apply_to(&mut state));
        assert_eq!(state.volume_level, 0.3);

        assert!(FieldUpdate::MediaTitle(Some("A".to_string())).apply_to(&mut state));
        assert!(FieldUpdate::MediaTitle(None).apply_to(&mut state));
        assert!(state.media_title.is_none());

        assert!(FieldUpdate::MediaPosition(10).apply_to(&mut state));
        assert_eq!(state.media_position, Some(10));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            /// Arbitrary bytes either decode or fail as malformed, never panic
            #[test]
            fn prop_arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
                match decode_state_message(&bytes) {
                    Ok(_) | Err(DecodeError::MalformedPayload(_)) => {}
                }
            }

            /// Numeric strings decode like the number they spell
            #[test]
            fn prop_volume_string_matches_number(volume in 0u32..=100) {
                let from_number = decode(&format!(r#"{{"volume": {}}}"#, volume));
                let from_string = decode(&format!(r#"{{"volume": "{}"}}"#, volume));
                prop_assert_eq!(from_number, from_string);
            }

            /// Seconds never go negative and fractions are dropped
            #[test]
            fn prop_seconds_truncate(whole in 0u64..1_000_000_000, quarters in 0u8..4) {
                let seconds = whole as f64 + quarters as f64 * 0.25;
                let update = decode(&format!(r#"{{"media_duration": {}}}"#, seconds));
                prop_assert_eq!(update.changes, vec![FieldUpdate::MediaDuration(whole)]);
            }
        }
    }
}
