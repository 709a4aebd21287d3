//! Session event interface.

use async_trait::async_trait;

use crate::error::Result;
use crate::ui::{AudioChunk, InboundMessage};

/// Interface the hosting chat UI drives for one session.
///
/// The framework delivers session lifecycle and message events through
/// this trait; the application layer implements it on top of the router.
/// Within one session, events are delivered strictly one at a time: a new
/// inbound message is not handled until the previous turn's response has
/// been fully sent.
#[async_trait]
pub trait SessionEventHandler: Send + Sync {
    /// Called once when the session is (re)opened.
    async fn on_session_start(&self) -> Result<()>;

    /// Called for each inbound user message (one turn).
    async fn on_message(&self, message: InboundMessage) -> Result<()>;

    /// Called for real-time audio chunks during voice input.
    async fn on_audio_chunk(&self, chunk: AudioChunk) -> Result<()>;
}
