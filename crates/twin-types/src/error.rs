//! Unified error types for the Twin domain layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of domain errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Record not found.
    NotFound,
    /// Invalid input data.
    InvalidInput,
    /// A required collaborator is not configured.
    Unavailable,
    /// Internal error.
    Internal,
}

/// Domain-level error with structured context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwinError {
    /// The kind of error.
    pub kind: ErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional context.
    pub context: Option<String>,
}

impl TwinError {
    /// Creates a new `TwinError`.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
        }
    }

    /// Adds context to the error.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Creates an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }
}

impl fmt::Display for TwinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, " ({})", ctx)?;
        }
        Ok(())
    }
}

impl std::error::Error for TwinError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_without_context() {
        let err = TwinError::new(ErrorKind::NotFound, "record not found");
        assert_eq!(err.to_string(), "[NotFound] record not found");
    }

    #[test]
    fn error_display_with_context() {
        let err = TwinError::invalid_input("bad email").with_context("field: email");
        assert!(err.to_string().contains("field: email"));
    }

    #[test]
    fn error_serialization_roundtrip() {
        let err = TwinError::new(ErrorKind::Unavailable, "store offline");
        let json = serde_json::to_string(&err).expect("serialize");
        assert!(json.contains("\"unavailable\""));
        let back: TwinError = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.kind, ErrorKind::Unavailable);
    }
}
