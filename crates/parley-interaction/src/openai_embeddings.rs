//! OpenAI embeddings client.
//!
//! Embeds document chunks and queries through the OpenAI Embeddings API.
//! Configuration priority: ~/.config/parley/secret.json > environment variables

use std::env;

use async_trait::async_trait;
use parley_core::error::{GenerationError, ParleyError};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::load_secret_config;

const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
const BASE_URL: &str = "https://api.openai.com/v1/embeddings";

/// Produces vector embeddings for a batch of texts.
///
/// A successful call returns exactly one vector per input text, in input
/// order.
#[async_trait]
pub trait EmbeddingsClient: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, GenerationError>;
}

/// Embeddings client backed by the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAiEmbeddingsClient {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiEmbeddingsClient {
    /// Creates a new client with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Loads configuration from ~/.config/parley/secret.json or environment variables.
    ///
    /// Uses the same OpenAI credential as the chat client; the embedding
    /// model is fixed to `text-embedding-3-small`.
    pub fn try_from_env() -> Result<Self, ParleyError> {
        if let Ok(config) = load_secret_config() {
            if let Some(openai) = config.openai {
                return Ok(Self::new(openai.api_key, DEFAULT_EMBEDDING_MODEL));
            }
        }

        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            ParleyError::config(
                "OPENAI_API_KEY not found in ~/.config/parley/secret.json or environment variables",
            )
        })?;

        Ok(Self::new(api_key, DEFAULT_EMBEDDING_MODEL))
    }
}

#[async_trait]
impl EmbeddingsClient for OpenAiEmbeddingsClient {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, GenerationError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbeddingRequest {
            model: self.model.clone(),
            input: texts.to_vec(),
        };

        let response = self
            .client
            .post(BASE_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                GenerationError::Retrieval(format!("Embeddings request failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read embeddings error body".to_string());
            return Err(map_http_error(status, body));
        }

        let parsed: EmbeddingResponse = response.json().await.map_err(|err| {
            GenerationError::Retrieval(format!("Failed to parse embeddings response: {err}"))
        })?;

        collect_vectors(parsed, texts.len())
    }
}

#[derive(Serialize)]
struct EmbeddingRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

fn collect_vectors(
    parsed: EmbeddingResponse,
    expected: usize,
) -> Result<Vec<Vec<f32>>, GenerationError> {
    let mut data = parsed.data;
    data.sort_by_key(|item| item.index);

    if data.len() != expected {
        return Err(GenerationError::Retrieval(format!(
            "Embeddings response returned {} vectors for {} inputs",
            data.len(),
            expected
        )));
    }

    Ok(data.into_iter().map(|item| item.embedding).collect())
}

fn map_http_error(status: StatusCode, body: String) -> GenerationError {
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or(body);

    GenerationError::Retrieval(format!("OpenAI API returned {status}: {message}"))
}
