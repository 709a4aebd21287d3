//! Error types for the Parley application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pii::PiiError;

/// A shared error type for turn-level failures.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Note that ingestion and
/// search failures are handled at the router boundary and reported to the
/// user directly; only failures the router does not mask end up here.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ParleyError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chat UI delivery error (send/update failed)
    #[error("UI delivery error: {0}")]
    Ui(String),

    /// Model or retrieval generation failure; propagates to the hosting
    /// framework's turn-level error reporting.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Call-time PII detection failure
    #[error(transparent)]
    Pii(#[from] PiiError),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ParleyError {
    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a generation failure (model or retrieval)
    pub fn is_generation(&self) -> bool {
        matches!(self, Self::Generation(_))
    }
}

impl From<std::io::Error> for ParleyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ParleyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ParleyError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Failure of an underlying generation call.
///
/// Raised by the chat model and retrieval chain collaborators. The router
/// deliberately does not catch these; the surrounding framework surfaces
/// them as a failed turn.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationError {
    /// Chat model call failed
    #[error("Model call failed: {0}")]
    Model(String),

    /// Retrieval (embedding or index lookup) failed
    #[error("Retrieval failed: {0}")]
    Retrieval(String),
}

/// A type alias for `Result<T, ParleyError>`.
pub type Result<T> = std::result::Result<T, ParleyError>;
