//! Chat-UI boundary types.
//!
//! The hosting chat framework is an external collaborator; these types
//! model the slice of its surface the core depends on: inbound messages
//! with optional attachments, outbound messages with display elements,
//! and the delivery trait used to send and update them.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A file attached to an inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    /// Display name of the uploaded file
    pub name: String,
    /// Local path where the framework staged the upload
    pub path: PathBuf,
}

/// One element carried by an inbound message.
///
/// Kinds other than `File` are deliberately ignored by the router
/// (logged at debug level); they are modeled explicitly rather than
/// dropped at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundElement {
    /// An uploaded file.
    File(FileAttachment),
    /// Any other element kind the core does not handle.
    Other { kind: String },
}

/// An inbound user message: free text plus zero or more elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub content: String,
    #[serde(default)]
    pub elements: Vec<InboundElement>,
}

impl InboundMessage {
    /// Creates a text-only inbound message.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            elements: Vec::new(),
        }
    }

    /// Creates a message carrying a file attachment plus optional text.
    pub fn with_file(content: impl Into<String>, file: FileAttachment) -> Self {
        Self {
            content: content.into(),
            elements: vec![InboundElement::File(file)],
        }
    }

    /// Returns the first file element, if any.
    pub fn first_file(&self) -> Option<&FileAttachment> {
        self.elements.iter().find_map(|element| match element {
            InboundElement::File(file) => Some(file),
            InboundElement::Other { .. } => None,
        })
    }
}

/// One element attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundElement {
    /// A named text panel displayed alongside the message
    /// (used for cited document sources).
    SideText { name: String, content: String },
}

/// An outbound response message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub content: String,
    #[serde(default)]
    pub elements: Vec<OutboundElement>,
}

impl OutboundMessage {
    /// Creates a text-only outbound message.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            elements: Vec::new(),
        }
    }

    /// Creates an outbound message with display elements.
    pub fn with_elements(content: impl Into<String>, elements: Vec<OutboundElement>) -> Self {
        Self {
            content: content.into(),
            elements,
        }
    }
}

/// Identifier of a delivered message, used for in-place updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// A real-time audio chunk event from voice input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioChunk {
    pub is_start: bool,
    pub is_end: bool,
}

/// Outbound delivery surface of the hosting chat UI.
#[async_trait]
pub trait ChatUi: Send + Sync {
    /// Sends a new message to the session and returns its identifier.
    async fn send(&self, message: OutboundMessage) -> Result<MessageId>;

    /// Updates the content of a previously sent message in place.
    async fn update(&self, id: &MessageId, content: &str) -> Result<()>;
}
