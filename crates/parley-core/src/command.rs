//! Search command classification.

/// Command tokens followed by a whitespace-separated query.
const COMMAND_TOKENS: [&str; 2] = ["/search", "!search"];

/// Colon prefixes followed directly by the query.
const COLON_PREFIXES: [&str; 3] = ["search:", "web:", "lookup:"];

/// Extracts a web-search query from raw user input.
///
/// Recognized forms, case-insensitive after trimming surrounding
/// whitespace: `/search <query>`, `!search <query>`, `search: <query>`,
/// `web: <query>`, `lookup: <query>`.
///
/// Returns `None` when the input is not a search request at all, and
/// `Some("")` when a command token is given without a query; the router
/// turns the latter into a usage-help response instead of falling
/// through to document or general chat.
pub fn extract_search_query(input: &str) -> Option<String> {
    let trimmed = input.trim();

    for token in COMMAND_TOKENS {
        let Some(rest) = strip_prefix_ignore_case(trimmed, token) else {
            continue;
        };
        if rest.is_empty() {
            return Some(String::new());
        }
        // The token must be a whole word; `/searching` is not a command.
        if rest.starts_with(char::is_whitespace) {
            return Some(rest.trim().to_string());
        }
    }

    for prefix in COLON_PREFIXES {
        if let Some(rest) = strip_prefix_ignore_case(trimmed, prefix) {
            return Some(rest.trim().to_string());
        }
    }

    None
}

/// ASCII-case-insensitive prefix strip that never slices mid-character.
fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slash_command_with_query() {
        assert_eq!(
            extract_search_query("/search latest release"),
            Some("latest release".to_string())
        );
    }

    #[test]
    fn test_slash_command_without_query_is_empty() {
        assert_eq!(extract_search_query("/search"), Some(String::new()));
        assert_eq!(extract_search_query("  /search  "), Some(String::new()));
    }

    #[test]
    fn test_bang_command() {
        assert_eq!(
            extract_search_query("!search rust 1.80 changelog"),
            Some("rust 1.80 changelog".to_string())
        );
    }

    #[test]
    fn test_colon_prefixes() {
        assert_eq!(
            extract_search_query("search: best pizza"),
            Some("best pizza".to_string())
        );
        assert_eq!(
            extract_search_query("  WEB: who won"),
            Some("who won".to_string())
        );
        assert_eq!(
            extract_search_query("lookup:tokio mutex"),
            Some("tokio mutex".to_string())
        );
    }

    #[test]
    fn test_colon_prefix_without_query_is_empty() {
        assert_eq!(extract_search_query("web:"), Some(String::new()));
    }

    #[test]
    fn test_case_insensitive_tokens() {
        assert_eq!(
            extract_search_query("/SEARCH hello"),
            Some("hello".to_string())
        );
        assert_eq!(
            extract_search_query("!Search hello"),
            Some("hello".to_string())
        );
    }

    #[test]
    fn test_plain_text_is_absent() {
        assert_eq!(extract_search_query("hello there"), None);
        assert_eq!(extract_search_query(""), None);
        assert_eq!(extract_search_query("   "), None);
    }

    #[test]
    fn test_token_must_be_whole_word() {
        assert_eq!(extract_search_query("/searching for meaning"), None);
        assert_eq!(extract_search_query("!searches"), None);
    }

    #[test]
    fn test_prefix_mid_sentence_is_not_a_command() {
        assert_eq!(extract_search_query("I like web: design"), None);
    }
}
