//! Chat-completion model contract.

use async_trait::async_trait;

use crate::error::GenerationError;
use crate::session::ConversationMessage;

/// Chat-completion model client used by the general-chat fallback and,
/// internally, by retrieval chain implementations.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generates a reply to the full accumulated history.
    async fn complete(
        &self,
        history: &[ConversationMessage],
    ) -> Result<String, GenerationError>;
}
