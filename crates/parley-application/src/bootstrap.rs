//! Process bootstrap.
//!
//! Builds the shared, process-wide collaborators from configuration and
//! the environment: tracing, the PII filter, the ingestion pipeline,
//! the chat model, and the search provider.

use std::env;
use std::sync::Arc;

use parley_core::chat::ChatModel;
use parley_core::config::AppConfig;
use parley_core::error::Result;
use parley_core::ingest::{DocumentIngestor, TextChunker};
use parley_core::pii::PiiFilter;
use parley_core::router::MessageRouter;
use parley_core::search::SearchProvider;
use parley_interaction::{
    EmbeddingIngestor, GoogleSearchProvider, OpenAiChatClient, OpenAiEmbeddingsClient,
    PatternRecognizer, UnconfiguredSearch,
};
use tracing_subscriber::EnvFilter;

/// Environment override for the PII configuration flag.
const PII_ENV_FLAG: &str = "PARLEY_ENABLE_PII";

/// Initializes the global tracing subscriber.
///
/// Honors `RUST_LOG`, defaulting to `info`. Safe to call more than
/// once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Interprets an environment flag value as a boolean.
fn env_flag_enabled(value: Option<String>) -> Option<bool> {
    let value = value?;
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

/// Resolves whether PII redaction is on: the `PARLEY_ENABLE_PII`
/// environment variable overrides the config file flag.
fn pii_enabled(config: &AppConfig) -> bool {
    env_flag_enabled(env::var(PII_ENV_FLAG).ok()).unwrap_or(config.pii.enabled)
}

/// Builds the PII filter from configuration.
///
/// When redaction is enabled but the recognition engine fails to
/// initialize, the filter degrades to passthrough with a warning
/// rather than taking the chat down.
pub fn pii_filter_from_config(config: &AppConfig) -> PiiFilter {
    if !pii_enabled(config) {
        return PiiFilter::passthrough();
    }

    match PatternRecognizer::new() {
        Ok(recognizer) => PiiFilter::new(Arc::new(recognizer)),
        Err(err) => {
            tracing::warn!("PII engine failed to initialize, redaction disabled: {err}");
            PiiFilter::passthrough()
        }
    }
}

/// The process-wide collaborators the router is built from.
pub struct Collaborators {
    pub ingestor: Arc<dyn DocumentIngestor>,
    pub search: Arc<dyn SearchProvider>,
    pub model: Arc<dyn ChatModel>,
    pub pii: Arc<PiiFilter>,
}

impl Collaborators {
    /// Assembles the message router over these collaborators.
    pub fn into_router(self) -> MessageRouter {
        MessageRouter::new(self.ingestor, self.search, self.model, self.pii)
    }
}

/// Builds all collaborators from configuration and the environment.
///
/// Fails when the OpenAI credential is missing; a missing search
/// credential only disables the `/search` command.
pub fn build_collaborators(config: &AppConfig) -> Result<Collaborators> {
    let mut chat = OpenAiChatClient::try_from_env()?;
    if let Some(model) = &config.chat.model_name {
        chat = chat.with_model(model);
    }
    let chat: Arc<dyn ChatModel> = Arc::new(chat);

    let embeddings = Arc::new(OpenAiEmbeddingsClient::try_from_env()?);
    let chunker = TextChunker::new(config.ingest.chunk_size, config.ingest.chunk_overlap);
    let ingestor: Arc<dyn DocumentIngestor> = Arc::new(EmbeddingIngestor::new(
        embeddings,
        Arc::clone(&chat),
        chunker,
    ));

    let search: Arc<dyn SearchProvider> = match GoogleSearchProvider::try_from_env() {
        Some(provider) => {
            let provider = match &config.search.model_name {
                Some(model) => provider.with_model(model),
                None => provider,
            };
            Arc::new(provider)
        }
        None => {
            tracing::info!("No Google API key found; `/search` will report as unconfigured");
            Arc::new(UnconfiguredSearch)
        }
    };

    Ok(Collaborators {
        ingestor,
        search,
        model: chat,
        pii: Arc::new(pii_filter_from_config(config)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_flag_truthy_values() {
        for value in ["1", "true", "YES", " on ", "y"] {
            assert_eq!(env_flag_enabled(Some(value.to_string())), Some(true));
        }
    }

    #[test]
    fn test_env_flag_falsy_values() {
        for value in ["0", "false", "NO", "off", "n"] {
            assert_eq!(env_flag_enabled(Some(value.to_string())), Some(false));
        }
    }

    #[test]
    fn test_env_flag_unrecognized_is_none() {
        assert_eq!(env_flag_enabled(Some("maybe".to_string())), None);
        assert_eq!(env_flag_enabled(None), None);
    }

    #[test]
    fn test_disabled_config_yields_passthrough() {
        let config = AppConfig::default();
        // Default config has redaction off.
        let filter = pii_filter_from_config(&config);
        assert!(!filter.is_enabled());
    }

    #[test]
    fn test_enabled_config_yields_active_filter() {
        let mut config = AppConfig::default();
        config.pii.enabled = true;
        // The env override may disagree with the config flag in a shared
        // test environment, so only check when it is unset.
        if env::var(PII_ENV_FLAG).is_err() {
            let filter = pii_filter_from_config(&config);
            assert!(filter.is_enabled());
        }
    }
}
