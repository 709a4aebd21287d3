//! External collaborator clients for Parley.
//!
//! Concrete implementations of the `parley-core` collaborator contracts:
//! OpenAI chat and embedding clients, the in-memory retrieval chain and
//! its ingestor, the Google web-search provider, and the regex pattern
//! entity recognizer.

pub mod config;
pub mod openai_chat;
pub mod openai_embeddings;
pub mod pattern_recognizer;
pub mod retrieval;
pub mod web_search;

pub use openai_chat::OpenAiChatClient;
pub use openai_embeddings::{EmbeddingsClient, OpenAiEmbeddingsClient};
pub use pattern_recognizer::PatternRecognizer;
pub use retrieval::{EmbeddingIngestor, RetrievalChain, VectorIndex};
pub use web_search::{GoogleSearchProvider, UnconfiguredSearch};
