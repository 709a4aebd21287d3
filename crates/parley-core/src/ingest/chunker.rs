//! Recursive text chunking.
//!
//! Splits document text into overlapping chunks along structural
//! boundaries: paragraph breaks first, then line breaks, then word
//! boundaries, falling back to raw character windows. Chunk sizes and
//! overlap are measured in characters.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Separators tried in order; the empty string means per-character.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// A chunk of document text tagged with its ordinal source label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// Chunk text
    pub text: String,
    /// Source tag, `"{i}-pl"` for the i-th chunk
    pub source: String,
}

/// Attaches ordinal source tags to a list of chunks.
pub fn tag_chunks(chunks: Vec<String>) -> Vec<DocumentChunk> {
    chunks
        .into_iter()
        .enumerate()
        .map(|(i, text)| DocumentChunk {
            text,
            source: format!("{i}-pl"),
        })
        .collect()
}

/// Recursive character splitter with overlap carry-over.
#[derive(Debug, Clone)]
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new(1000, 100)
    }
}

impl TextChunker {
    /// Creates a chunker with the given maximum chunk length and overlap,
    /// both in characters. The overlap must be smaller than the size.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        debug_assert!(chunk_overlap < chunk_size);
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Splits `text` into chunks of at most `chunk_size` characters,
    /// with `chunk_overlap` characters carried between neighbors.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        if char_len(text) <= self.chunk_size {
            return vec![text.to_string()];
        }
        self.split_text(text, &SEPARATORS)
    }

    fn split_text(&self, text: &str, separators: &[&str]) -> Vec<String> {
        let (separator, remaining) = pick_separator(text, separators);
        let splits = split_with(text, separator);

        let mut final_chunks = Vec::new();
        let mut good: Vec<String> = Vec::new();

        for piece in splits {
            if char_len(&piece) < self.chunk_size {
                good.push(piece);
                continue;
            }
            if !good.is_empty() {
                final_chunks.extend(self.merge_splits(&good, separator));
                good.clear();
            }
            if remaining.is_empty() {
                final_chunks.push(piece);
            } else {
                final_chunks.extend(self.split_text(&piece, remaining));
            }
        }

        if !good.is_empty() {
            final_chunks.extend(self.merge_splits(&good, separator));
        }

        final_chunks
    }

    /// Re-joins small splits into chunks up to `chunk_size`, keeping the
    /// trailing `chunk_overlap` characters of each chunk as the head of
    /// the next.
    fn merge_splits(&self, splits: &[String], separator: &str) -> Vec<String> {
        let sep_len = char_len(separator);
        let mut docs = Vec::new();
        let mut current: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;

        for piece in splits {
            let len = char_len(piece);
            let join_cost = if current.is_empty() { 0 } else { sep_len };

            if total + len + join_cost > self.chunk_size && !current.is_empty() {
                if let Some(doc) = join_pieces(&current, separator) {
                    docs.push(doc);
                }
                // Drop from the front until only the overlap remains.
                while total > self.chunk_overlap
                    || (total + len + if current.is_empty() { 0 } else { sep_len }
                        > self.chunk_size
                        && total > 0)
                {
                    let Some(front) = current.pop_front() else {
                        break;
                    };
                    total -= char_len(front) + if current.is_empty() { 0 } else { sep_len };
                }
            }

            current.push_back(piece);
            total += len + if current.len() > 1 { sep_len } else { 0 };
        }

        if let Some(doc) = join_pieces(&current, separator) {
            docs.push(doc);
        }
        docs
    }
}

/// Picks the first separator that occurs in `text`, returning it along
/// with the finer-grained separators to recurse with.
fn pick_separator<'a>(text: &str, separators: &'a [&'a str]) -> (&'a str, &'a [&'a str]) {
    for (i, sep) in separators.iter().enumerate() {
        if sep.is_empty() || text.contains(sep) {
            return (sep, &separators[i + 1..]);
        }
    }
    ("", &[])
}

fn split_with(text: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        text.chars().map(|c| c.to_string()).collect()
    } else {
        text.split(separator)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn join_pieces(pieces: &VecDeque<&str>, separator: &str) -> Option<String> {
    if pieces.is_empty() {
        return None;
    }
    let joined = pieces
        .iter()
        .copied()
        .collect::<Vec<_>>()
        .join(separator);
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
