//! Stdio transport errors.

use thiserror::Error;

/// Errors from the transport layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to read from stdin.
    #[error("read error: {0}")]
    Read(#[source] std::io::Error),
    /// Failed to write to stdout.
    #[error("write error: {0}")]
    Write(#[source] std::io::Error),
    /// A response could not be serialized.
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}
