//! Content bridge into the overlay's isolated content context
//!
//! Only allow-listed channels cross the boundary, and only the payload
//! does: the sender envelope never reaches overlay content.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The single channel the call overlay listens on
pub const CALL_PAYLOAD_CHANNEL: &str = "call-payload";

/// Bridge errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("Channel '{0}' is not reachable from overlay content")]
    ChannelNotAllowed(String),

    #[error("Failed to encode bridge payload: {0}")]
    Encode(String),
}

/// Transport metadata attached by whoever sends a bridge message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderMeta {
    pub process: String,
    pub frame_id: Option<u64>,
}

/// A message as produced on the sending side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub sender: SenderMeta,
    pub channel: String,
    pub payload: Value,
}

impl Envelope {
    /// Wrap a serializable payload for `channel`
    pub fn new<T: Serialize>(
        sender: SenderMeta,
        channel: &str,
        payload: &T,
    ) -> Result<Self, BridgeError> {
        let payload =
            serde_json::to_value(payload).map_err(|e| BridgeError::Encode(e.to_string()))?;
        Ok(Self {
            sender,
            channel: channel.to_string(),
            payload,
        })
    }
}

/// What overlay content actually receives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeMessage {
    pub channel: String,
    pub payload: Value,
}

/// Allow-list gate between the main process and overlay content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBridge {
    allowed: Vec<String>,
}

impl ContentBridge {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Bridge used by the call overlay: one channel only
    pub fn call_overlay() -> Self {
        Self::new([CALL_PAYLOAD_CHANNEL])
    }

    pub fn allows(&self, channel: &str) -> bool {
        self.allowed.iter().any(|c| c == channel)
    }

    /// Check the channel and strip the sender envelope
    pub fn deliver(&self, envelope: Envelope) -> Result<BridgeMessage, BridgeError> {
        if !self.allows(&envelope.channel) {
            return Err(BridgeError::ChannelNotAllowed(envelope.channel));
        }
        Ok(BridgeMessage {
            channel: envelope.channel,
            payload: envelope.payload,
        })
    }
}

impl Default for ContentBridge {
    fn default() -> Self {
        Self::call_overlay()
    }
}
