//! Publisher error types.

use thiserror::Error;

/// Errors that can occur while publishing an order.
///
/// `ConnectionLost` is the only recoverable variant: the publisher
/// reconnects and retries once when it sees it. All other variants
/// surface immediately.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The broker closed the connection or the stream was lost.
    #[error("broker connection lost: {0}")]
    ConnectionLost(String),

    /// The broker rejected the publish for a non-connection reason.
    #[error("broker publish failed: {0}")]
    Broker(String),

    /// The order could not be serialized to the message body.
    #[error("message serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PublishError {
    /// Returns true for the recoverable connection-level variant.
    pub fn is_connection_lost(&self) -> bool {
        matches!(self, Self::ConnectionLost(_))
    }
}
