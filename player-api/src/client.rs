use std::sync::Arc;

use tracing::{debug, warn};

use crate::command::{encode_command, CommandIntent};
use crate::error::Result;
use crate::transport::Publisher;

/// What happened to a command that was handed to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Encoded and accepted by the publisher
    Published,
    /// No command topic configured, nothing was sent
    NoCommandChannel,
}

/// A client for sending command intents to the device's command topic
///
/// Every call encodes one intent and awaits the publisher exactly once.
/// Commands are never queued or retried; a publish failure is returned to
/// the caller as-is.
#[derive(Clone)]
pub struct CommandClient {
    command_topic: Option<String>,
    publisher: Arc<dyn Publisher>,
}

impl CommandClient {
    /// Create a client publishing to `command_topic`
    ///
    /// With `None` every command becomes a successful no-op.
    pub fn new(command_topic: Option<String>, publisher: Arc<dyn Publisher>) -> Self {
        Self {
            command_topic,
            publisher,
        }
    }

    /// Configured command topic, if any
    pub fn command_topic(&self) -> Option<&str> {
        self.command_topic.as_deref()
    }

    /// Encode and publish a single command
    pub async fn send(&self, intent: &CommandIntent) -> Result<CommandOutcome> {
        let Some(topic) = self.command_topic.as_deref() else {
            debug!(command = intent.name(), "No command topic configured, skipping");
            return Ok(CommandOutcome::NoCommandChannel);
        };

        let payload = encode_command(intent);
        debug!(
            command = intent.name(),
            topic,
            payload = %String::from_utf8_lossy(&payload),
            "Publishing command"
        );

        self.publisher.publish(topic, payload).await.map_err(|e| {
            warn!(command = intent.name(), topic, error = %e, "Command publish failed");
            e
        })?;

        Ok(CommandOutcome::Published)
    }
}

impl std::fmt::Debug for CommandClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandClient")
            .field("command_topic", &self.command_topic)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingPublisher {
        sent: Mutex<Vec<(String, Vec<u8>)>>,
        fail: bool,
    }

    #[async_trait]
    impl Publisher for RecordingPublisher {
        async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<()> {
            self.sent.lock().unwrap().push((topic.to_string(), payload));
            if self.fail {
                Err(ApiError::publish_failure(topic, "broker unreachable"))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn test_send_publishes_once() {
        let publisher = Arc::new(RecordingPublisher::default());
        let client = CommandClient::new(Some("player/set".to_string()), publisher.clone());

        let outcome = client.send(&CommandIntent::Seek(90)).await.unwrap();
        assert_eq!(outcome, CommandOutcome::Published);

        let sent = publisher.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "player/set");
        assert_eq!(sent[0].1, br#"{"command":"seek","position":90}"#.to_vec());
    }

    #[tokio::test]
    async fn test_no_command_topic_is_noop() {
        let publisher = Arc::new(RecordingPublisher::default());
        let client = CommandClient::new(None, publisher.clone());

        let outcome = client.send(&CommandIntent::Play).await.unwrap();
        assert_eq!(outcome, CommandOutcome::NoCommandChannel);
        assert!(publisher.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_publish_failure_is_not_retried() {
        let publisher = Arc::new(RecordingPublisher {
            fail: true,
            ..Default::default()
        });
        let client = CommandClient::new(Some("player/set".to_string()), publisher.clone());

        let result = client.send(&CommandIntent::Stop).await;
        assert!(matches!(result, Err(ApiError::PublishFailure { .. })));
        assert_eq!(publisher.sent.lock().unwrap().len(), 1);
    }
}
