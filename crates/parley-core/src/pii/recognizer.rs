//! Entity recognition engine contract.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of a detected sensitive span.
///
/// The category's label doubles as the redaction placeholder name,
/// e.g. a `Person` span is replaced by `<PERSON>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityCategory {
    Person,
    EmailAddress,
    PhoneNumber,
    CreditCard,
    IpAddress,
    Ssn,
    /// Engine-specific category not covered by the fixed set.
    Other(String),
}

impl EntityCategory {
    /// Placeholder label used in redacted text.
    pub fn label(&self) -> &str {
        match self {
            Self::Person => "PERSON",
            Self::EmailAddress => "EMAIL_ADDRESS",
            Self::PhoneNumber => "PHONE_NUMBER",
            Self::CreditCard => "CREDIT_CARD",
            Self::IpAddress => "IP_ADDRESS",
            Self::Ssn => "US_SSN",
            Self::Other(label) => label,
        }
    }
}

/// A detected sensitive span, as byte offsets into the analyzed text.
///
/// Offsets must fall on character boundaries; spans that do not are
/// discarded by the filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub start: usize,
    pub end: usize,
    pub category: EntityCategory,
}

/// Errors raised by a recognition engine.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PiiError {
    /// Engine initialization or detection failure
    #[error("PII detection failed: {0}")]
    Detection(String),
}

/// Pluggable entity recognition engine.
///
/// Implementations range from local pattern matching to remote NER
/// models; the engine is constructed once per process and shared
/// read-only across all sessions.
pub trait EntityRecognizer: Send + Sync {
    /// Detects sensitive spans in `text` for the given language code.
    fn detect(&self, text: &str, language: &str) -> Result<Vec<EntitySpan>, PiiError>;
}
