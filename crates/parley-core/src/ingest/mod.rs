//! Document ingestion.
//!
//! Converts an uploaded plain-text file into a queryable document chain:
//! read and validate the content, split it into overlapping chunks, and
//! hand the tagged chunks to an index-building ingestor implementation.

mod chunker;
mod error;

use async_trait::async_trait;

use crate::chain::DocumentChain;
use crate::ui::FileAttachment;

pub use chunker::{DocumentChunk, TextChunker, tag_chunks};
pub use error::IngestError;

/// Builds a retrieval chain from an uploaded file.
///
/// Ingestion is embedding-bound work and runs off the session's
/// event-handling path; the router shows a progress message while it is
/// in flight. A failed ingestion must leave session state untouched.
#[async_trait]
pub trait DocumentIngestor: Send + Sync {
    async fn ingest(
        &self,
        file: &FileAttachment,
    ) -> Result<std::sync::Arc<dyn DocumentChain>, IngestError>;
}

/// Reads an uploaded file as UTF-8 text.
///
/// Fails with [`IngestError::Decode`] when the bytes are not valid UTF-8,
/// [`IngestError::EmptyContent`] when the trimmed content has zero
/// length, and [`IngestError::Read`] for any other read failure.
pub async fn read_document(file: &FileAttachment) -> Result<String, IngestError> {
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|err| IngestError::Read {
            name: file.name.clone(),
            message: err.to_string(),
        })?;

    let text = String::from_utf8(bytes).map_err(|_| IngestError::Decode {
        name: file.name.clone(),
    })?;

    if text.trim().is_empty() {
        return Err(IngestError::EmptyContent {
            name: file.name.clone(),
        });
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn attachment(name: &str, path: PathBuf) -> FileAttachment {
        FileAttachment {
            name: name.to_string(),
            path,
        }
    }

    #[tokio::test]
    async fn test_read_document_returns_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "hello document").unwrap();

        let text = read_document(&attachment("doc.txt", file.path().to_path_buf()))
            .await
            .unwrap();
        assert_eq!(text, "hello document");
    }

    #[tokio::test]
    async fn test_read_document_rejects_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0x41]).unwrap();

        let err = read_document(&attachment("doc.bin", file.path().to_path_buf()))
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_read_document_rejects_empty_content() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "   \n\t ").unwrap();

        let err = read_document(&attachment("empty.txt", file.path().to_path_buf()))
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::EmptyContent { .. }));
    }

    #[tokio::test]
    async fn test_read_document_missing_file_is_read_error() {
        let err = read_document(&attachment("gone.txt", PathBuf::from("/nonexistent/gone.txt")))
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::Read { .. }));
    }
}
