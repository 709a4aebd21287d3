//! Google web search provider backed by Gemini's `google_search` tool.
//!
//! Sends `generateContent` requests with the google_search tool enabled
//! and extracts the grounded references as ranked search hits.

use std::collections::HashSet;
use std::env;

use async_trait::async_trait;
use parley_core::search::{SearchError, SearchHit, SearchProvider};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::config::load_secret_config;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_SEARCH_MODEL: &str = "gemini-2.5-flash";

/// Search provider calling Gemini with the google_search tool.
#[derive(Clone)]
pub struct GoogleSearchProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl GoogleSearchProvider {
    /// Creates a new provider using the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_SEARCH_MODEL.to_string(),
        }
    }

    /// Overrides the Gemini model name if needed.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Loads configuration from ~/.config/parley/secret.json or the
    /// GEMINI_API_KEY environment variable. Returns `None` when no
    /// credential is available; the caller decides how to degrade.
    pub fn try_from_env() -> Option<Self> {
        if let Ok(config) = load_secret_config() {
            if let Some(google) = config.google {
                let provider = Self::new(google.api_key);
                return Some(match google.model_name {
                    Some(model) => provider.with_model(model),
                    None => provider,
                });
            }
        }

        env::var("GEMINI_API_KEY").ok().map(Self::new)
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchProvider {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: query.to_string(),
                }],
            }],
            tools: vec![Tool::default()],
        };

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                SearchError::failed("request", format!("Google Search request failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Google Search error body".to_string());
            return Err(map_http_error(status, body));
        }

        let payload: Value = response.json().await.map_err(|err| {
            SearchError::failed("parse", format!("Failed to parse Google Search response: {err}"))
        })?;

        Ok(extract_hits(&payload))
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    tools: Vec<Tool>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize, Default)]
struct Tool {
    #[serde(rename = "google_search")]
    google_search: GoogleSearchConfig,
}

#[derive(Serialize, Default)]
struct GoogleSearchConfig {}

/// Pulls grounded references out of the grounding metadata, in rank
/// order, deduplicated by URL.
fn extract_hits(root: &Value) -> Vec<SearchHit> {
    let mut seen = HashSet::new();
    let mut hits = Vec::new();

    let candidates = match root.get("candidates").and_then(|c| c.as_array()) {
        Some(list) => list,
        None => return hits,
    };

    for candidate in candidates {
        let chunks = match candidate
            .get("groundingMetadata")
            .and_then(|metadata| metadata.get("groundingChunks"))
            .and_then(|chunks| chunks.as_array())
        {
            Some(list) => list,
            None => continue,
        };

        for chunk in chunks {
            let web = chunk
                .get("web")
                .or_else(|| chunk.get("webSearch"))
                .or_else(|| chunk.get("retrievedReference"));

            let Some(web_obj) = web else {
                continue;
            };

            let url = web_obj
                .get("uri")
                .or_else(|| web_obj.get("url"))
                .and_then(|v| v.as_str());
            let Some(url) = url else {
                continue;
            };

            if !seen.insert(url.to_string()) {
                continue;
            }

            let title = web_obj
                .get("title")
                .or_else(|| web_obj.get("pageTitle"))
                .and_then(|v| v.as_str())
                .map(|s| s.to_string());

            let snippet = web_obj
                .get("snippet")
                .or_else(|| web_obj.get("text"))
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();

            hits.push(SearchHit {
                title,
                url: Some(url.to_string()),
                snippet,
            });
        }
    }

    hits
}

fn map_http_error(status: StatusCode, body: String) -> SearchError {
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or(body);

    SearchError::failed(format!("http_{}", status.as_u16()), message)
}

/// Placeholder provider used when no search credential is configured.
pub struct UnconfiguredSearch;

#[async_trait]
impl SearchProvider for UnconfiguredSearch {
    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, SearchError> {
        Err(SearchError::NotConfigured)
    }
}
