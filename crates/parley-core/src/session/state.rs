//! Per-session context object.

use std::sync::Arc;

use uuid::Uuid;

use crate::chain::DocumentChain;
use crate::session::message::ConversationMessage;

/// The state owned by one chat session.
///
/// Holds the active document chain (if a file has been ingested), the
/// document's display name, and the general-chat history used by the
/// fallback path. The state is owned by the session's task and passed
/// into the router on every turn; it is never shared across sessions
/// and carries no cross-session persistence.
pub struct SessionState {
    /// Unique identifier, generated at creation and used in log lines.
    id: Uuid,
    /// Retrieval chain for the ingested document; present after a
    /// successful ingestion, never cleared for the session's lifetime.
    document_chain: Option<Arc<dyn DocumentChain>>,
    /// Display name of the ingested document, set alongside the chain.
    document_name: Option<String>,
    /// General-chat history, independent of the chain's own memory.
    general_history: Vec<ConversationMessage>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Creates an empty session state with a fresh identifier.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            document_chain: None,
            document_name: None,
            general_history: Vec::new(),
        }
    }

    /// The session's unique identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Installs a freshly built document chain together with its display
    /// name. Both fields are set in one step so a failed ingestion can
    /// never leave a partial update behind.
    pub fn install_chain(&mut self, chain: Arc<dyn DocumentChain>, name: impl Into<String>) {
        self.document_chain = Some(chain);
        self.document_name = Some(name.into());
    }

    /// Returns true when a document chain is active.
    pub fn has_chain(&self) -> bool {
        self.document_chain.is_some()
    }

    /// Returns the active document chain, if any.
    pub fn document_chain(&self) -> Option<Arc<dyn DocumentChain>> {
        self.document_chain.clone()
    }

    /// Returns the ingested document's display name, if any.
    pub fn document_name(&self) -> Option<&str> {
        self.document_name.as_deref()
    }

    /// Appends a user turn to the general-chat history.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.general_history.push(ConversationMessage::user(content));
    }

    /// Appends an assistant turn to the general-chat history.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.general_history
            .push(ConversationMessage::assistant(content));
    }

    /// The accumulated general-chat history, oldest first.
    pub fn history(&self) -> &[ConversationMessage] {
        &self.general_history
    }
}
