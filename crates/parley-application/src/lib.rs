//! Application layer for Parley.
//!
//! Wires the core router to concrete collaborators and adapts it to the
//! session event interface a hosting chat UI drives.

pub mod bootstrap;
pub mod session_service;

pub use bootstrap::{Collaborators, build_collaborators, init_tracing, pii_filter_from_config};
pub use session_service::ChatSessionService;
