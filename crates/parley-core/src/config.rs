//! Application configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Root application configuration, loaded from `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub pii: PiiConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl AppConfig {
    /// Loads configuration from a TOML file, falling back to defaults
    /// when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// PII redaction configuration.
///
/// Redaction is off by default; the `PARLEY_ENABLE_PII` environment
/// variable overrides this flag at bootstrap.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct PiiConfig {
    #[serde(default)]
    pub enabled: bool,
}

/// Document chunking policy.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct IngestConfig {
    /// Maximum chunk length in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Overlap carried between consecutive chunks, in characters
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    100
}

/// Chat model configuration.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ChatConfig {
    /// Model name override; the client's default is used when absent
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Web search configuration.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SearchConfig {
    /// Model name override for the search backend
    #[serde(default)]
    pub model_name: Option<String>,
}
