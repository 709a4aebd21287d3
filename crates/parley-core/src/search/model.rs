//! Search result models.

use serde::{Deserialize, Serialize};

/// A single web search result.
///
/// Hits are rank-ordered as returned by the provider. Missing titles
/// are rendered with a fixed placeholder; missing URLs are rendered
/// without a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Result title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Result URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Short text snippet; may be empty
    #[serde(default)]
    pub snippet: String,
}
