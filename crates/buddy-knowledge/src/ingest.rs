//! Document ingestion: chunk, embed in batch, upsert, persist.

use std::path::Path;

use serde::Deserialize;

use buddy_core::error::{BuddyError, Result};

use crate::chunker::chunk_text;
use crate::store::{ChunkMetadata, DocumentChunk, KnowledgeStore};

/// Chunking parameters for one ingestion.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 200,
        }
    }
}

/// Provenance attached to every chunk of one document.
#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    pub source: String,
    pub category: Option<String>,
    pub title: Option<String>,
}

/// Outcome of ingesting a document collection.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub documents_ingested: usize,
    pub documents_skipped: usize,
    pub documents_failed: usize,
    pub chunks_ingested: usize,
}

/// One entry of the knowledge-base JSON file.
#[derive(Debug, Deserialize)]
struct CollectionDocument {
    #[serde(default)]
    content: String,
    #[serde(default)]
    source: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Collection {
    #[serde(default)]
    documents: Vec<CollectionDocument>,
}

/// Ingest one document: split into overlapping chunks, embed them in a
/// single batch call, attach positional metadata, upsert into the store,
/// and persist. Returns the chunk count.
///
/// A batch embedding failure aborts the whole document — chunk ids are
/// positional, so partial ingestion would corrupt the upsert keys.
pub async fn ingest_document(
    store: &KnowledgeStore,
    content: &str,
    metadata: DocumentMetadata,
    options: IngestOptions,
) -> Result<usize> {
    let pieces: Vec<String> = chunk_text(content, options.chunk_size, options.overlap)?
        .into_iter()
        .filter(|c| !c.is_empty())
        .collect();

    if pieces.is_empty() {
        tracing::debug!("document '{}' produced no chunks", metadata.source);
        return Ok(0);
    }

    tracing::info!(
        "ingesting '{}': {} chunk(s)",
        metadata.source,
        pieces.len()
    );

    let embeddings = store.embedder().embed_batch(&pieces).await?;
    if embeddings.len() != pieces.len() {
        return Err(BuddyError::Provider(format!(
            "embedding count mismatch for '{}': {} texts, {} vectors",
            metadata.source,
            pieces.len(),
            embeddings.len()
        )));
    }

    let total = pieces.len();
    let timestamp = chrono::Utc::now().to_rfc3339();
    let chunks: Vec<DocumentChunk> = pieces
        .into_iter()
        .zip(embeddings)
        .enumerate()
        .map(|(index, (content, embedding))| DocumentChunk {
            id: format!("{}-chunk-{}", metadata.source, index),
            content,
            embedding,
            metadata: ChunkMetadata {
                source: metadata.source.clone(),
                category: metadata.category.clone(),
                title: metadata.title.clone(),
                chunk_index: Some(index),
                total_chunks: Some(total),
                timestamp: Some(timestamp.clone()),
            },
        })
        .collect();

    store.add_chunks(chunks).await?;
    store.save().await?;
    Ok(total)
}

/// Ingest a whole knowledge-base file: `{ "documents": [{content, source,
/// category?, title?}, ...] }`. Entries missing content or source are
/// skipped; a failure in one document does not stop the rest.
pub async fn ingest_collection(
    store: &KnowledgeStore,
    path: &Path,
    options: IngestOptions,
) -> Result<IngestReport> {
    let data = std::fs::read_to_string(path)?;
    let collection: Collection = serde_json::from_str(&data)
        .map_err(|e| BuddyError::Config(format!("invalid knowledge base file: {e}")))?;

    let mut report = IngestReport::default();

    for doc in collection.documents {
        if doc.content.trim().is_empty() || doc.source.trim().is_empty() {
            tracing::warn!("skipping document with missing content or source");
            report.documents_skipped += 1;
            continue;
        }

        let metadata = DocumentMetadata {
            source: doc.source.clone(),
            category: doc.category,
            title: doc.title,
        };

        match ingest_document(store, &doc.content, metadata, options).await {
            Ok(count) => {
                report.documents_ingested += 1;
                report.chunks_ingested += count;
            }
            Err(e) => {
                tracing::error!("failed to ingest '{}': {e}", doc.source);
                report.documents_failed += 1;
            }
        }
    }

    Ok(report)
}
