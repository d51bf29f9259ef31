//! Error types for the Staffdeck client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Staffdeck client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum StaffdeckError {
    /// The server rejected a request or was unreachable.
    ///
    /// `status` is the HTTP status code when a response was received,
    /// `None` for transport-level failures. `message` carries the server's
    /// `detail` field when present, otherwise a caller-supplied fallback.
    #[error("API error: {message}")]
    Api { status: Option<u16>, message: String },

    /// Client-side, pre-request form validation failure.
    ///
    /// Carries every failing field so a form can mark all invalid inputs
    /// in a single pass. Never stored in a store's `error` slot.
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Storage read/write failure (serialization, quota, inaccessible path).
    ///
    /// Callers at the store boundary swallow this after logging; in-memory
    /// state stays authoritative regardless.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A single failed validation rule, addressed to a named form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Form field the rule applies to (`name`, `email`, ...)
    pub field: String,
    /// Human-readable message for display next to the field.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl StaffdeckError {
    /// Creates an Api error from a received HTTP status and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates an Api error for a transport-level failure (no response).
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Api {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is an API error
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Normalizes this error to the string a store exposes to the view.
    ///
    /// API errors surface their message (the server's `detail` when it was
    /// present); anything else falls back to the per-operation default, so
    /// internal detail never leaks into the UI.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            Self::Api { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<serde_json::Error> for StaffdeckError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for StaffdeckError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<String> for StaffdeckError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, StaffdeckError>`.
pub type Result<T> = std::result::Result<T, StaffdeckError>;
