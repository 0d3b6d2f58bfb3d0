//! Tool failures and their JSON-RPC error codes.

use thiserror::Error;

use twin_protocol::error_codes;
use twin_store::StoreError;
use twin_types::{ErrorKind, TwinError};

/// A failed tool call. The `Display` text is the JSON-RPC error message.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Arguments failed validation.
    #[error("{0}")]
    InvalidParams(String),
    /// A collaborator the tool needs was never configured.
    #[error("{0}")]
    Unavailable(String),
    /// The persistence collaborator rejected the write.
    #[error("Failed to save Twin information: {0}")]
    Persistence(#[source] StoreError),
    /// Anything else, including malformed arguments.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// JSON-RPC error code for this failure.
    pub fn code(&self) -> i32 {
        match self {
            ToolError::InvalidParams(_) => error_codes::INVALID_PARAMS,
            ToolError::Unavailable(_) | ToolError::Persistence(_) | ToolError::Internal(_) => {
                error_codes::INTERNAL_ERROR
            }
        }
    }
}

impl From<TwinError> for ToolError {
    fn from(e: TwinError) -> Self {
        match e.kind {
            ErrorKind::InvalidInput => ToolError::InvalidParams(e.message),
            ErrorKind::Unavailable => ToolError::Unavailable(e.message),
            _ => ToolError::Internal(e.message),
        }
    }
}
