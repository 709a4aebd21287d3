//! Per-session event handling.
//!
//! Adapts the message router to the session event interface. Each
//! session owns one service instance; the router and its collaborators
//! are shared across sessions.

use std::sync::Arc;

use async_trait::async_trait;
use parley_core::Result;
use parley_core::router::{MessageRouter, notice};
use parley_core::session::{SessionEventHandler, SessionState};
use parley_core::ui::{AudioChunk, ChatUi, InboundMessage, OutboundMessage};
use tokio::sync::Mutex;

/// One chat session: shared router, shared UI handle, private state.
///
/// The state lock is held for the whole turn, so a session never
/// interleaves two message handlers.
pub struct ChatSessionService {
    router: Arc<MessageRouter>,
    ui: Arc<dyn ChatUi>,
    state: Mutex<SessionState>,
}

impl ChatSessionService {
    /// Creates a service with a fresh session state.
    pub fn new(router: Arc<MessageRouter>, ui: Arc<dyn ChatUi>) -> Self {
        Self::with_state(router, ui, SessionState::new())
    }

    /// Creates a service resuming from an existing state, e.g. when a
    /// document chain survived in process memory across a reconnect.
    pub fn with_state(
        router: Arc<MessageRouter>,
        ui: Arc<dyn ChatUi>,
        state: SessionState,
    ) -> Self {
        Self {
            router,
            ui,
            state: Mutex::new(state),
        }
    }
}

#[async_trait]
impl SessionEventHandler for ChatSessionService {
    async fn on_session_start(&self) -> Result<()> {
        let state = self.state.lock().await;
        tracing::info!(session = %state.id(), resumed = state.has_chain(), "session started");
        let greeting = match (state.has_chain(), state.document_name()) {
            (true, Some(name)) => notice::welcome_back(name),
            _ => notice::WELCOME.to_string(),
        };
        drop(state);

        self.ui.send(OutboundMessage::text(greeting)).await?;
        Ok(())
    }

    async fn on_message(&self, message: InboundMessage) -> Result<()> {
        let mut state = self.state.lock().await;
        tracing::debug!(session = %state.id(), "handling message turn");
        self.router
            .handle_turn(&mut state, &message, self.ui.as_ref())
            .await
    }

    async fn on_audio_chunk(&self, chunk: AudioChunk) -> Result<()> {
        if chunk.is_start {
            self.ui
                .send(OutboundMessage::text(notice::LISTENING))
                .await?;
        }
        if chunk.is_end {
            self.ui
                .send(OutboundMessage::text(notice::VOICE_RECEIVED))
                .await?;
        }
        Ok(())
    }
}
