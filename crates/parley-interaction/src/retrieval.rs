//! In-memory retrieval chain.
//!
//! Builds a cosine-similarity vector index over a document's chunks and
//! answers questions against it with a chat model, keeping per-document
//! conversational memory across turns.

use std::sync::Arc;

use async_trait::async_trait;
use parley_core::chain::{ChainResponse, DocumentChain, SourceDocument};
use parley_core::chat::ChatModel;
use parley_core::error::GenerationError;
use parley_core::ingest::{
    DocumentChunk, DocumentIngestor, IngestError, TextChunker, read_document, tag_chunks,
};
use parley_core::session::ConversationMessage;
use parley_core::ui::FileAttachment;
use tokio::sync::Mutex;

use crate::openai_embeddings::EmbeddingsClient;

const DEFAULT_TOP_K: usize = 4;

/// A fixed set of embedded chunks, searchable by cosine similarity.
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
}

struct IndexEntry {
    embedding: Vec<f32>,
    chunk: DocumentChunk,
}

impl VectorIndex {
    /// Pairs each chunk with its embedding. The two lists must be the
    /// same length and in the same order.
    pub fn new(embeddings: Vec<Vec<f32>>, chunks: Vec<DocumentChunk>) -> Self {
        debug_assert_eq!(embeddings.len(), chunks.len());
        let entries = embeddings
            .into_iter()
            .zip(chunks)
            .map(|(embedding, chunk)| IndexEntry { embedding, chunk })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns up to `k` chunks ranked by similarity to the query vector.
    pub fn top_k(&self, query: &[f32], k: usize) -> Vec<&DocumentChunk> {
        let mut scored: Vec<(f32, &DocumentChunk)> = self
            .entries
            .iter()
            .map(|entry| (cosine_similarity(query, &entry.embedding), &entry.chunk))
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().take(k).map(|(_, chunk)| chunk).collect()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Document chain over a [`VectorIndex`], with its own message memory.
pub struct RetrievalChain {
    index: VectorIndex,
    embeddings: Arc<dyn EmbeddingsClient>,
    model: Arc<dyn ChatModel>,
    memory: Mutex<Vec<ConversationMessage>>,
    top_k: usize,
}

impl RetrievalChain {
    pub fn new(
        index: VectorIndex,
        embeddings: Arc<dyn EmbeddingsClient>,
        model: Arc<dyn ChatModel>,
    ) -> Self {
        Self {
            index,
            embeddings,
            model,
            memory: Mutex::new(Vec::new()),
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

#[async_trait]
impl DocumentChain for RetrievalChain {
    async fn answer(&self, query: &str) -> Result<ChainResponse, GenerationError> {
        let query_vectors = self.embeddings.embed(&[query.to_string()]).await?;
        let query_vector = query_vectors
            .first()
            .ok_or_else(|| GenerationError::Retrieval("Query embedding was empty".into()))?;

        let retrieved: Vec<DocumentChunk> = self
            .index
            .top_k(query_vector, self.top_k)
            .into_iter()
            .cloned()
            .collect();

        let mut messages = vec![ConversationMessage::system(build_context_prompt(&retrieved))];
        {
            let memory = self.memory.lock().await;
            messages.extend(memory.iter().cloned());
        }
        messages.push(ConversationMessage::user(query));

        let answer = self.model.complete(&messages).await?;

        {
            let mut memory = self.memory.lock().await;
            memory.push(ConversationMessage::user(query));
            memory.push(ConversationMessage::assistant(&answer));
        }

        let source_documents = dedup_sources(retrieved);
        Ok(ChainResponse {
            answer,
            source_documents,
        })
    }
}

fn build_context_prompt(chunks: &[DocumentChunk]) -> String {
    let mut prompt = String::from(
        "Answer the question using only the document excerpts below. \
         If the excerpts do not contain the answer, say so.\n",
    );
    for chunk in chunks {
        prompt.push_str(&format!("\n[{}]\n{}\n", chunk.source, chunk.text));
    }
    prompt
}

/// Drops repeated source tags, keeping the first occurrence in
/// retrieval order.
fn dedup_sources(chunks: Vec<DocumentChunk>) -> Vec<SourceDocument> {
    let mut seen = std::collections::HashSet::new();
    chunks
        .into_iter()
        .filter(|chunk| seen.insert(chunk.source.clone()))
        .map(|chunk| SourceDocument {
            content: chunk.text,
            source: chunk.source,
        })
        .collect()
}

/// [`DocumentIngestor`] that chunks, embeds, and indexes an uploaded
/// file into a [`RetrievalChain`].
pub struct EmbeddingIngestor {
    embeddings: Arc<dyn EmbeddingsClient>,
    model: Arc<dyn ChatModel>,
    chunker: TextChunker,
}

impl EmbeddingIngestor {
    pub fn new(
        embeddings: Arc<dyn EmbeddingsClient>,
        model: Arc<dyn ChatModel>,
        chunker: TextChunker,
    ) -> Self {
        Self {
            embeddings,
            model,
            chunker,
        }
    }
}

#[async_trait]
impl DocumentIngestor for EmbeddingIngestor {
    async fn ingest(
        &self,
        file: &FileAttachment,
    ) -> Result<Arc<dyn DocumentChain>, IngestError> {
        let text = read_document(file).await?;
        let chunks = tag_chunks(self.chunker.chunk(&text));

        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
        let vectors = self
            .embeddings
            .embed(&texts)
            .await
            .map_err(|err| IngestError::Read {
                name: file.name.clone(),
                message: err.to_string(),
            })?;

        let index = VectorIndex::new(vectors, chunks);
        tracing::debug!(file = %file.name, chunks = index.len(), "document indexed");
        Ok(Arc::new(RetrievalChain::new(
            index,
            Arc::clone(&self.embeddings),
            Arc::clone(&self.model),
        )))
    }
}
