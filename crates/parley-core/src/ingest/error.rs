//! Ingestion error taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while turning an uploaded file into a document chain.
///
/// All variants are user-visible and never fatal: the router reports
/// them and leaves the session's prior state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IngestError {
    /// File bytes are not valid UTF-8
    #[error("File `{name}` is not valid UTF-8 text")]
    Decode { name: String },

    /// Trimmed file content has zero length
    #[error("File `{name}` is empty")]
    EmptyContent { name: String },

    /// Any other read or indexing failure, with the underlying cause
    #[error("Failed to read file `{name}`: {message}")]
    Read { name: String, message: String },
}

impl IngestError {
    /// The notice shown to the user when this error is reported.
    pub fn user_message(&self) -> String {
        match self {
            Self::Decode { name } => format!(
                "Error: Could not read file `{name}`. Please ensure it's a text file."
            ),
            Self::EmptyContent { name } => format!(
                "Error: File `{name}` is empty. Please upload a file with content."
            ),
            Self::Read { name, message } => {
                format!("Error: Failed to read file `{name}`: {message}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_name_the_file() {
        let err = IngestError::EmptyContent {
            name: "notes.txt".to_string(),
        };
        assert!(err.user_message().contains("`notes.txt`"));

        let err = IngestError::Read {
            name: "notes.txt".to_string(),
            message: "permission denied".to_string(),
        };
        assert!(err.user_message().contains("permission denied"));
    }
}
