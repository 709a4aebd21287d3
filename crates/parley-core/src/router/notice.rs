//! User-visible notice texts.

/// Welcome message for a fresh session.
pub const WELCOME: &str = "👋 Welcome! Upload a text file using the file upload button and \
     attach it to your message to begin asking questions about your document.";

/// Welcome message when a document chain survived in process memory.
pub fn welcome_back(document_name: &str) -> String {
    format!("👋 Welcome back! You can continue asking questions about `{document_name}`.")
}

/// Progress notice shown while a file is being ingested.
pub fn processing(name: &str) -> String {
    format!("Processing `{name}`...")
}

/// Replacement for the progress notice once ingestion succeeds.
pub fn processing_done(name: &str) -> String {
    format!("Processing `{name}` done. You can now ask questions!")
}

/// Usage help for a search command given without a query.
pub const SEARCH_USAGE: &str =
    "Usage: `/search <query>`. Example: `/search latest release`.";

/// Notice when no search credential is configured.
pub const SEARCH_NOT_CONFIGURED: &str =
    "Web search is not configured. Add a Google API key to enable `/search`.";

/// Notice when the provider returned zero results.
pub fn no_results(query: &str) -> String {
    format!("No results found for `{query}`.")
}

/// Generic search failure notice carrying the error category.
pub fn search_failed(kind: &str) -> String {
    format!("Search failed ({kind}). Please try again later.")
}

/// Heading line above a list of search results.
pub fn results_heading(query: &str) -> String {
    format!("Results for `{query}`:")
}

/// Placeholder title for results that come without one.
pub const UNTITLED_RESULT: &str = "Untitled result";

/// Prompt returned when the fallback path receives empty input.
pub const EMPTY_INPUT_PROMPT: &str =
    "Please type a message or upload a document to get started.";

/// Suffix listing cited sources of a document answer.
pub fn sources_suffix(labels: &[String]) -> String {
    format!("\nSources: {}", labels.join(", "))
}

/// Suffix when a document answer cites no sources.
pub const NO_SOURCES_SUFFIX: &str = "\nNo sources found";

/// Voice input placeholders.
pub const LISTENING: &str = "🎤 Listening...";
pub const VOICE_RECEIVED: &str =
    "Voice input received. Realtime transcription is not available yet.";
