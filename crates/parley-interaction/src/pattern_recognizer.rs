//! Regex-based entity recognition engine.
//!
//! Local, dependency-free alternative to a hosted NER service. Covers
//! the structured categories (emails, card numbers, SSNs, phone
//! numbers, IP addresses); free-text person names are out of reach for
//! pattern matching and left to heavier engines.

use parley_core::pii::{EntityCategory, EntityRecognizer, EntitySpan, PiiError};
use regex::Regex;

const PATTERNS: [(&str, &str); 5] = [
    ("email", r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}"),
    ("credit_card", r"\b\d{4}[ -]?\d{4}[ -]?\d{4}[ -]?\d{4}\b"),
    ("ssn", r"\b\d{3}-\d{2}-\d{4}\b"),
    ("phone", r"\+?\d{1,3}[ .-]?\(?\d{3}\)?[ .-]?\d{3}[ .-]?\d{4}"),
    ("ip", r"\b(?:\d{1,3}\.){3}\d{1,3}\b"),
];

/// Entity recognizer backed by a fixed set of compiled patterns.
pub struct PatternRecognizer {
    patterns: Vec<(EntityCategory, Regex)>,
}

impl PatternRecognizer {
    /// Compiles the pattern set. A compile failure is reported as a
    /// detection error so the caller can fall back to passthrough.
    pub fn new() -> Result<Self, PiiError> {
        let mut patterns = Vec::with_capacity(PATTERNS.len());
        for (name, pattern) in PATTERNS {
            let regex = Regex::new(pattern).map_err(|err| {
                PiiError::Detection(format!("Failed to compile {name} pattern: {err}"))
            })?;
            patterns.push((category_for(name), regex));
        }
        Ok(Self { patterns })
    }
}

fn category_for(name: &str) -> EntityCategory {
    match name {
        "email" => EntityCategory::EmailAddress,
        "credit_card" => EntityCategory::CreditCard,
        "ssn" => EntityCategory::Ssn,
        "phone" => EntityCategory::PhoneNumber,
        "ip" => EntityCategory::IpAddress,
        other => EntityCategory::Other(other.to_uppercase()),
    }
}

impl EntityRecognizer for PatternRecognizer {
    fn detect(&self, text: &str, _language: &str) -> Result<Vec<EntitySpan>, PiiError> {
        let mut spans = Vec::new();
        for (category, regex) in &self.patterns {
            for found in regex.find_iter(text) {
                spans.push(EntitySpan {
                    start: found.start(),
                    end: found.end(),
                    category: category.clone(),
                });
            }
        }
        Ok(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::pii::PiiFilter;
    use std::sync::Arc;

    fn filter() -> PiiFilter {
        PiiFilter::new(Arc::new(PatternRecognizer::new().unwrap()))
    }

    #[test]
    fn test_redacts_email_addresses() {
        let out = filter().anonymize("reach me at jane.doe@example.com please").unwrap();
        assert_eq!(out, "reach me at <EMAIL_ADDRESS> please");
    }

    #[test]
    fn test_redacts_credit_card_numbers() {
        let out = filter().anonymize("card: 4111 1111 1111 1111").unwrap();
        assert_eq!(out, "card: <CREDIT_CARD>");
    }

    #[test]
    fn test_redacts_ssn() {
        let out = filter().anonymize("ssn is 123-45-6789.").unwrap();
        assert_eq!(out, "ssn is <US_SSN>.");
    }

    #[test]
    fn test_redacts_phone_numbers() {
        let out = filter().anonymize("call +1 (555) 123-4567 today").unwrap();
        assert_eq!(out, "call <PHONE_NUMBER> today");
    }

    #[test]
    fn test_redacts_ip_addresses() {
        let out = filter().anonymize("host at 192.168.0.1 is down").unwrap();
        assert_eq!(out, "host at <IP_ADDRESS> is down");
    }

    #[test]
    fn test_plain_text_is_untouched() {
        let out = filter().anonymize("nothing sensitive here").unwrap();
        assert_eq!(out, "nothing sensitive here");
    }

    #[test]
    fn test_redaction_is_idempotent() {
        let filter = filter();
        let once = filter.anonymize("mail bob@example.org or dial 555-123-4567").unwrap();
        let twice = filter.anonymize(&once).unwrap();
        assert_eq!(once, twice);
    }
}
