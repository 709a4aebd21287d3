//! Session domain module.
//!
//! This module contains the session-scoped types: conversation messages,
//! the per-session state object, and the event-handler interface the
//! hosting chat UI drives.
//!
//! # Module Structure
//!
//! - `message`: Conversation message types (`MessageRole`, `ConversationMessage`)
//! - `state`: Per-session context object (`SessionState`)
//! - `handler`: UI event interface (`SessionEventHandler`)

mod handler;
mod message;
mod state;

// Re-export public API
pub use handler::SessionEventHandler;
pub use message::{ConversationMessage, MessageRole};
pub use state::SessionState;
