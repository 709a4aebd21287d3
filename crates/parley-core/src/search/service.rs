//! Search provider contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::SearchHit;

/// Errors raised by a search provider.
///
/// `NotConfigured` is distinguished from `Failed` so the user knows
/// whether to fix configuration or simply retry. Both are caught at the
/// router boundary and never crash the turn.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchError {
    /// No search credential is configured
    #[error("Search provider is not configured")]
    NotConfigured,

    /// Provider-level failure, tagged with an error category
    #[error("Search failed ({kind}): {message}")]
    Failed { kind: String, message: String },
}

impl SearchError {
    /// Creates a Failed error with a category tag.
    pub fn failed(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// The error's category name, used in the user-facing notice.
    pub fn kind(&self) -> &str {
        match self {
            Self::NotConfigured => "not_configured",
            Self::Failed { kind, .. } => kind,
        }
    }
}

/// Executes a query against a third-party web search API.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns results in rank order; an empty list is a valid outcome,
    /// distinct from any error.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError>;
}
