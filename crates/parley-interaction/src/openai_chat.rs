//! OpenAiChatClient - Direct REST API implementation for OpenAI chat.
//!
//! Calls the OpenAI Chat Completions API directly.
//! Configuration priority: ~/.config/parley/secret.json > environment variables

use std::env;

use async_trait::async_trait;
use parley_core::chat::ChatModel;
use parley_core::error::{GenerationError, ParleyError};
use parley_core::session::{ConversationMessage, MessageRole};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::load_secret_config;

const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
const BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Chat model client that talks to the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAiChatClient {
    client: Client,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiChatClient {
    /// Creates a new client with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            temperature: 0.0,
        }
    }

    /// Loads configuration from ~/.config/parley/secret.json or environment variables.
    ///
    /// Priority:
    /// 1. ~/.config/parley/secret.json
    /// 2. Environment variables (OPENAI_API_KEY, OPENAI_MODEL_NAME)
    ///
    /// Model name defaults to `gpt-4o-mini` if not specified.
    pub fn try_from_env() -> Result<Self, ParleyError> {
        if let Ok(config) = load_secret_config() {
            if let Some(openai) = config.openai {
                let model = openai
                    .model_name
                    .unwrap_or_else(|| DEFAULT_CHAT_MODEL.into());
                return Ok(Self::new(openai.api_key, model));
            }
        }

        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            ParleyError::config(
                "OPENAI_API_KEY not found in ~/.config/parley/secret.json or environment variables",
            )
        })?;

        let model = env::var("OPENAI_MODEL_NAME").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.into());
        Ok(Self::new(api_key, model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(BASE_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| GenerationError::Model(format!("OpenAI API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            GenerationError::Model(format!("Failed to parse OpenAI response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl ChatModel for OpenAiChatClient {
    async fn complete(
        &self,
        history: &[ConversationMessage],
    ) -> Result<String, GenerationError> {
        if history.is_empty() {
            return Err(GenerationError::Model("chat history is empty".into()));
        }

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: build_messages(history),
            temperature: self.temperature,
        };

        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ApiMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ApiMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

fn build_messages(history: &[ConversationMessage]) -> Vec<ApiMessage> {
    history
        .iter()
        .map(|message| ApiMessage {
            role: role_name(&message.role),
            content: message.content.clone(),
        })
        .collect()
}

fn role_name(role: &MessageRole) -> &'static str {
    match role {
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
        MessageRole::System => "system",
    }
}

fn extract_text_response(parsed: ChatCompletionResponse) -> Result<String, GenerationError> {
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| {
            GenerationError::Model("OpenAI response contained no message content".into())
        })
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

    GenerationError::Model(format!("OpenAI API returned {status}: {message}"))
}
