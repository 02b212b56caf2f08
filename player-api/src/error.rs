use thiserror::Error;

/// Errors reported by the publish/subscribe capabilities
///
/// The core never retries; these are surfaced to whoever issued the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The external publish capability reported failure
    ///
    /// Returned as the outcome of the host command call that produced the
    /// message. Nothing was retried.
    #[error("Publish to '{topic}' failed: {reason}")]
    PublishFailure { topic: String, reason: String },

    /// The external subscription manager refused a subscription
    #[error("Subscribe to '{topic}' failed: {reason}")]
    SubscribeFailure { topic: String, reason: String },
}

impl ApiError {
    pub fn publish_failure(topic: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PublishFailure {
            topic: topic.into(),
            reason: reason.into(),
        }
    }

    pub fn subscribe_failure(topic: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SubscribeFailure {
            topic: topic.into(),
            reason: reason.into(),
        }
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;
