//! Text routing decision.
//!
//! The route for a message's free text is a pure function of the text
//! and whether a document chain is active, so the ordering contract can
//! be tested without any collaborators.

use crate::command::extract_search_query;

/// Where a message's free text is routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextRoute {
    /// Search command recognized; the query may be empty (usage help).
    Search { query: String },
    /// An active document chain answers the text.
    DocumentQa,
    /// Open-domain chat over the general history.
    GeneralChat,
}

/// Decides the route for free text.
///
/// Checks run in fixed order: a search command always wins, even when a
/// document chain is active; the chain beats the general fallback.
pub fn route_text(text: &str, has_chain: bool) -> TextRoute {
    if let Some(query) = extract_search_query(text) {
        return TextRoute::Search { query };
    }
    if has_chain {
        return TextRoute::DocumentQa;
    }
    TextRoute::GeneralChat
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_command_wins_over_active_chain() {
        assert_eq!(
            route_text("/search x", true),
            TextRoute::Search {
                query: "x".to_string()
            }
        );
    }

    #[test]
    fn test_empty_search_query_is_still_a_search() {
        assert_eq!(
            route_text("/search", true),
            TextRoute::Search {
                query: String::new()
            }
        );
    }

    #[test]
    fn test_chain_beats_general_fallback() {
        assert_eq!(route_text("what is this about?", true), TextRoute::DocumentQa);
    }

    #[test]
    fn test_no_chain_falls_back_to_general_chat() {
        assert_eq!(route_text("hello there", false), TextRoute::GeneralChat);
    }

    #[test]
    fn test_empty_text_without_chain_is_general_chat() {
        assert_eq!(route_text("", false), TextRoute::GeneralChat);
    }
}
