//! Capabilities borrowed from the external MQTT client
//!
//! The bridge owns no connection. Whatever MQTT client the host runs provides
//! these two traits: [`Publisher`] for outbound command payloads and
//! [`Subscriber`] for routing inbound topics to message handlers.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

/// Callback invoked with the raw payload of every message on a topic
///
/// The subscription manager must not invoke handlers for the same entity
/// concurrently, or the handler has to serialize itself.
pub type MessageHandler = Arc<dyn Fn(&[u8]) + Send + Sync>;

/// Capability to publish one payload to one topic
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish `payload` to `topic`
    ///
    /// Resolves once the client has accepted or rejected the message. Timeouts,
    /// QoS and reconnection are the client's business.
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<()>;
}

/// Capability to register a handler for a topic
#[async_trait]
pub trait Subscriber: Send + Sync {
    /// Route every message on `topic` to `handler`
    async fn subscribe(&self, topic: &str, handler: MessageHandler) -> Result<()>;
}

#[async_trait]
impl<T: Publisher + ?Sized> Publisher for Arc<T> {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<()> {
        (**self).publish(topic, payload).await
    }
}

#[async_trait]
impl<T: Subscriber + ?Sized> Subscriber for Arc<T> {
    async fn subscribe(&self, topic: &str, handler: MessageHandler) -> Result<()> {
        (**self).subscribe(topic, handler).await
    }
}
