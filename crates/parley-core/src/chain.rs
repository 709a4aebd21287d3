//! Retrieval-augmented chat contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// A document passage cited by a chain answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Passage text
    pub content: String,
    /// Chunk source tag (`"{i}-pl"`)
    pub source: String,
}

/// Answer produced by a document chain, with the passages it cited
/// in retrieval order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainResponse {
    pub answer: String,
    pub source_documents: Vec<SourceDocument>,
}

/// A retrieval index bound to conversational memory, answering
/// questions scoped to one ingested document.
///
/// The chain owns its own message memory, independent of the session's
/// general-chat history.
#[async_trait]
pub trait DocumentChain: Send + Sync {
    async fn answer(&self, query: &str) -> Result<ChainResponse, GenerationError>;
}

impl std::fmt::Debug for dyn DocumentChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DocumentChain")
    }
}
