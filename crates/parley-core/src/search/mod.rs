//! Web search domain.

mod model;
mod service;

pub use model::SearchHit;
pub use service::{SearchError, SearchProvider};
