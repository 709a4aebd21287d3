//! PII redaction filter.

use std::sync::Arc;

use super::recognizer::{EntityRecognizer, EntitySpan, PiiError};

/// Detection is locale-fixed to English.
const DETECTION_LANGUAGE: &str = "en";

/// Detects and redacts sensitive spans in text.
///
/// When disabled (no engine installed) the filter passes text through
/// unchanged. When enabled, every detected span is replaced by its
/// category placeholder (`<PERSON>`, `<EMAIL_ADDRESS>`, ...). Redaction
/// is idempotent and never lengthens or reorders unrelated text.
pub struct PiiFilter {
    engine: Option<Arc<dyn EntityRecognizer>>,
    language: &'static str,
}

impl PiiFilter {
    /// Creates a filter backed by the given recognition engine.
    pub fn new(engine: Arc<dyn EntityRecognizer>) -> Self {
        Self {
            engine: Some(engine),
            language: DETECTION_LANGUAGE,
        }
    }

    /// Creates a disabled filter that returns input unchanged.
    ///
    /// Used when redaction is switched off by configuration or when the
    /// recognition engine failed to initialize.
    pub fn passthrough() -> Self {
        Self {
            engine: None,
            language: DETECTION_LANGUAGE,
        }
    }

    /// Returns true when an engine is installed.
    pub fn is_enabled(&self) -> bool {
        self.engine.is_some()
    }

    /// Detects and redacts sensitive spans in `text`.
    ///
    /// Returns the input unchanged when the filter is disabled, the
    /// input is empty, or detection yields zero findings. Detection
    /// failures propagate to the caller; there is no per-call retry.
    pub fn anonymize(&self, text: &str) -> Result<String, PiiError> {
        let Some(engine) = &self.engine else {
            return Ok(text.to_string());
        };
        if text.is_empty() {
            return Ok(text.to_string());
        }

        let spans = engine.detect(text, self.language)?;
        if spans.is_empty() {
            return Ok(text.to_string());
        }

        Ok(redact(text, spans))
    }
}

/// Replaces every detected span with its category placeholder.
///
/// Spans are sorted by position, overlaps collapsed into the span that
/// starts first (longest match on ties), and replaced back-to-front so
/// earlier offsets stay valid.
fn redact(text: &str, mut spans: Vec<EntitySpan>) -> String {
    spans.retain(|span| {
        let valid = span.start < span.end
            && span.end <= text.len()
            && text.is_char_boundary(span.start)
            && text.is_char_boundary(span.end);
        if !valid {
            tracing::warn!(
                "Discarding invalid entity span {}..{} for {}",
                span.start,
                span.end,
                span.category.label()
            );
        }
        valid
    });
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut merged: Vec<EntitySpan> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last() {
            Some(prev) if span.start < prev.end => continue,
            _ => merged.push(span),
        }
    }

    let mut out = text.to_string();
    for span in merged.iter().rev() {
        let placeholder = format!("<{}>", span.category.label());
        out.replace_range(span.start..span.end, &placeholder);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pii::EntityCategory;

    /// Recognizer that flags every occurrence of fixed needles.
    struct NeedleRecognizer {
        needles: Vec<(String, EntityCategory)>,
    }

    impl NeedleRecognizer {
        fn new(needles: Vec<(&str, EntityCategory)>) -> Self {
            Self {
                needles: needles
                    .into_iter()
                    .map(|(n, c)| (n.to_string(), c))
                    .collect(),
            }
        }
    }

    impl EntityRecognizer for NeedleRecognizer {
        fn detect(&self, text: &str, _language: &str) -> Result<Vec<EntitySpan>, PiiError> {
            let mut spans = Vec::new();
            for (needle, category) in &self.needles {
                let mut offset = 0;
                while let Some(pos) = text[offset..].find(needle.as_str()) {
                    let start = offset + pos;
                    spans.push(EntitySpan {
                        start,
                        end: start + needle.len(),
                        category: category.clone(),
                    });
                    offset = start + needle.len();
                }
            }
            Ok(spans)
        }
    }

    fn email_filter() -> PiiFilter {
        PiiFilter::new(Arc::new(NeedleRecognizer::new(vec![(
            "bob@example.com",
            EntityCategory::EmailAddress,
        )])))
    }

    #[test]
    fn test_passthrough_returns_input_unchanged() {
        let filter = PiiFilter::passthrough();
        assert!(!filter.is_enabled());
        let input = "write to bob@example.com";
        assert_eq!(filter.anonymize(input).unwrap(), input);
    }

    #[test]
    fn test_empty_input_is_passed_through() {
        assert_eq!(email_filter().anonymize("").unwrap(), "");
    }

    #[test]
    fn test_zero_findings_returns_input_unchanged() {
        let input = "nothing sensitive here";
        assert_eq!(email_filter().anonymize(input).unwrap(), input);
    }

    #[test]
    fn test_detected_span_is_replaced_by_placeholder() {
        let out = email_filter()
            .anonymize("write to bob@example.com today")
            .unwrap();
        assert_eq!(out, "write to <EMAIL_ADDRESS> today");
    }

    #[test]
    fn test_anonymize_is_idempotent() {
        let filter = email_filter();
        let once = filter.anonymize("bob@example.com and bob@example.com").unwrap();
        let twice = filter.anonymize(&once).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once, "<EMAIL_ADDRESS> and <EMAIL_ADDRESS>");
    }

    #[test]
    fn test_overlapping_spans_collapse_to_first() {
        let filter = PiiFilter::new(Arc::new(NeedleRecognizer::new(vec![
            ("john smith", EntityCategory::Person),
            ("smith", EntityCategory::Person),
        ])));
        let out = filter.anonymize("ask john smith about it").unwrap();
        assert_eq!(out, "ask <PERSON> about it");
    }

    #[test]
    fn test_invalid_spans_are_discarded() {
        struct BrokenRecognizer;
        impl EntityRecognizer for BrokenRecognizer {
            fn detect(&self, text: &str, _language: &str) -> Result<Vec<EntitySpan>, PiiError> {
                Ok(vec![EntitySpan {
                    start: 0,
                    end: text.len() + 10,
                    category: EntityCategory::Person,
                }])
            }
        }

        let filter = PiiFilter::new(Arc::new(BrokenRecognizer));
        assert_eq!(filter.anonymize("hello").unwrap(), "hello");
    }

    #[test]
    fn test_detection_failure_propagates() {
        struct FailingRecognizer;
        impl EntityRecognizer for FailingRecognizer {
            fn detect(&self, _text: &str, _language: &str) -> Result<Vec<EntitySpan>, PiiError> {
                Err(PiiError::Detection("engine offline".to_string()))
            }
        }

        let filter = PiiFilter::new(Arc::new(FailingRecognizer));
        assert!(filter.anonymize("hello").is_err());
    }
}
