//! Parley core domain.
//!
//! This crate contains the per-session chat orchestration logic: the
//! message router, session state, command classification, the PII
//! redaction pipeline, and the trait contracts for the external
//! collaborators (chat model, retrieval chain, ingestor, web search,
//! entity recognition engine, chat UI).
//!
//! Network clients implementing the collaborator contracts live in
//! `parley-interaction`; session wiring and bootstrap live in
//! `parley-application`.

pub mod chain;
pub mod chat;
pub mod command;
pub mod config;
pub mod error;
pub mod ingest;
pub mod pii;
pub mod router;
pub mod search;
pub mod session;
pub mod ui;

// Re-export common error types
pub use error::{GenerationError, ParleyError, Result};
