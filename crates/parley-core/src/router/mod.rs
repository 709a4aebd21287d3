//! Message routing.
//!
//! One router turn evaluates its checks in a fixed order: attachment
//! handling, search command, active document chain, then the general
//! chat fallback. The order is a correctness requirement (each check
//! short-circuits the ones after it), and every inbound and outbound
//! text span passes through the PII filter before storage or display.

pub mod decision;
pub mod notice;

use std::collections::HashSet;
use std::sync::Arc;

use crate::chat::ChatModel;
use crate::error::Result;
use crate::ingest::DocumentIngestor;
use crate::pii::PiiFilter;
use crate::search::{SearchError, SearchHit, SearchProvider};
use crate::session::SessionState;
use crate::ui::{
    ChatUi, FileAttachment, InboundElement, InboundMessage, OutboundElement, OutboundMessage,
};

pub use decision::{TextRoute, route_text};

/// Routes one inbound message to the strategy that handles it.
///
/// Collaborators are shared, process-wide clients; all per-session data
/// lives in the [`SessionState`] passed into each turn.
pub struct MessageRouter {
    ingestor: Arc<dyn DocumentIngestor>,
    search: Arc<dyn SearchProvider>,
    model: Arc<dyn ChatModel>,
    pii: Arc<PiiFilter>,
}

impl MessageRouter {
    /// Creates a router over the given collaborators.
    pub fn new(
        ingestor: Arc<dyn DocumentIngestor>,
        search: Arc<dyn SearchProvider>,
        model: Arc<dyn ChatModel>,
        pii: Arc<PiiFilter>,
    ) -> Self {
        Self {
            ingestor,
            search,
            model,
            pii,
        }
    }

    /// Handles one message turn, producing exactly one outbound response
    /// (or two when an attachment is accompanied by free text).
    ///
    /// Ingestion and search failures are reported to the user here;
    /// generation failures propagate to the hosting framework.
    pub async fn handle_turn(
        &self,
        state: &mut SessionState,
        message: &InboundMessage,
        ui: &dyn ChatUi,
    ) -> Result<()> {
        log_ignored_elements(message);

        if let Some(file) = message.first_file() {
            self.ingest_attachment(state, file, ui).await?;
            if message.content.trim().is_empty() {
                return Ok(());
            }
        }

        match route_text(&message.content, state.has_chain()) {
            TextRoute::Search { query } => self.run_search(&query, ui).await,
            TextRoute::DocumentQa => self.answer_from_document(state, &message.content, ui).await,
            TextRoute::GeneralChat => self.general_chat(state, &message.content, ui).await,
        }
    }

    /// Ingests an uploaded file, updating the progress notice in place.
    ///
    /// On success the new chain replaces any previous one; on failure
    /// session state is left untouched.
    async fn ingest_attachment(
        &self,
        state: &mut SessionState,
        file: &FileAttachment,
        ui: &dyn ChatUi,
    ) -> Result<()> {
        let progress = ui
            .send(OutboundMessage::text(notice::processing(&file.name)))
            .await?;

        match self.ingestor.ingest(file).await {
            Ok(chain) => {
                state.install_chain(chain, file.name.clone());
                ui.update(&progress, &notice::processing_done(&file.name))
                    .await
            }
            Err(err) => {
                tracing::warn!("Ingestion of `{}` failed: {}", file.name, err);
                ui.update(&progress, &err.user_message()).await
            }
        }
    }

    /// Runs the web-search path. Adapter errors are caught here and
    /// surfaced as notices; they never crash the turn.
    async fn run_search(&self, query: &str, ui: &dyn ChatUi) -> Result<()> {
        if query.trim().is_empty() {
            ui.send(OutboundMessage::text(notice::SEARCH_USAGE)).await?;
            return Ok(());
        }

        match self.search.search(query).await {
            Ok(hits) if hits.is_empty() => {
                ui.send(OutboundMessage::text(notice::no_results(query)))
                    .await?;
            }
            Ok(hits) => {
                let content = self.render_hits(query, &hits)?;
                ui.send(OutboundMessage::text(content)).await?;
            }
            Err(SearchError::NotConfigured) => {
                ui.send(OutboundMessage::text(notice::SEARCH_NOT_CONFIGURED))
                    .await?;
            }
            Err(err @ SearchError::Failed { .. }) => {
                tracing::warn!("Web search for `{query}` failed: {err}");
                ui.send(OutboundMessage::text(notice::search_failed(err.kind())))
                    .await?;
            }
        }
        Ok(())
    }

    /// Renders search hits in rank order, passing snippets through the
    /// PII filter.
    fn render_hits(&self, query: &str, hits: &[SearchHit]) -> Result<String> {
        let mut lines = vec![notice::results_heading(query)];
        for hit in hits {
            let title = hit
                .title
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or(notice::UNTITLED_RESULT);
            let heading = match &hit.url {
                Some(url) => format!("- [{title}]({url})"),
                None => format!("- {title}"),
            };
            let snippet = self.pii.anonymize(&hit.snippet)?;
            if snippet.trim().is_empty() {
                lines.push(heading);
            } else {
                lines.push(format!("{heading}\n  {snippet}"));
            }
        }
        Ok(lines.join("\n"))
    }

    /// Answers from the active document chain, appending cited source
    /// labels and side-panel passages.
    async fn answer_from_document(
        &self,
        state: &mut SessionState,
        text: &str,
        ui: &dyn ChatUi,
    ) -> Result<()> {
        let Some(chain) = state.document_chain() else {
            return self.general_chat(state, text, ui).await;
        };

        let sanitized = self.pii.anonymize(text)?;
        let response = chain.answer(&sanitized).await?;
        let mut answer = self.pii.anonymize(&response.answer)?;

        let mut seen = HashSet::new();
        let mut labels: Vec<String> = Vec::new();
        let mut elements = Vec::new();
        for doc in &response.source_documents {
            if !seen.insert(doc.source.clone()) {
                continue;
            }
            let label = format!("source_{}", labels.len());
            elements.push(OutboundElement::SideText {
                name: label.clone(),
                content: doc.content.clone(),
            });
            labels.push(label);
        }

        if labels.is_empty() {
            answer.push_str(notice::NO_SOURCES_SUFFIX);
        } else {
            answer.push_str(&notice::sources_suffix(&labels));
        }

        ui.send(OutboundMessage::with_elements(answer, elements))
            .await?;
        Ok(())
    }

    /// Open-domain fallback over the session's general history.
    async fn general_chat(
        &self,
        state: &mut SessionState,
        text: &str,
        ui: &dyn ChatUi,
    ) -> Result<()> {
        if text.trim().is_empty() {
            ui.send(OutboundMessage::text(notice::EMPTY_INPUT_PROMPT))
                .await?;
            return Ok(());
        }

        let sanitized = self.pii.anonymize(text)?;
        state.push_user(sanitized);

        let reply = self.model.complete(state.history()).await?;
        let sanitized_reply = self.pii.anonymize(&reply)?;
        state.push_assistant(sanitized_reply.clone());

        ui.send(OutboundMessage::text(sanitized_reply)).await?;
        Ok(())
    }
}

fn log_ignored_elements(message: &InboundMessage) {
    for element in &message.elements {
        if let InboundElement::Other { kind } = element {
            tracing::debug!("Ignoring unsupported message element kind `{kind}`");
        }
    }
}
