//! PII detection and redaction.
//!
//! The filter pipeline is deterministic text processing; entity
//! detection itself is delegated to a pluggable recognition engine
//! selected once at process start.

mod filter;
mod recognizer;

pub use filter::PiiFilter;
pub use recognizer::{EntityCategory, EntityRecognizer, EntitySpan, PiiError};
