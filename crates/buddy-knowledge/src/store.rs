//! Persisted vector store: chunks with embeddings and source metadata.

use std::cmp::Ordering;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use buddy_core::error::{BuddyError, Result};
use buddy_core::traits::Embedder;

/// Provenance and position of one chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Origin document or channel, e.g. "notion:product-roadmap".
    /// Dedup/delete key for a whole document.
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_chunks: Option<usize>,
    /// RFC 3339 ingestion time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ChunkMetadata {
    pub fn for_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            category: None,
            title: None,
            chunk_index: None,
            total_chunks: None,
            timestamp: None,
        }
    }
}

/// One unit of indexed knowledge. All chunks in an index share the same
/// embedding dimensionality; the chunk `id` is the upsert key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: String,
    pub content: String,
    pub embedding: Vec<f32>,
    pub metadata: ChunkMetadata,
}

/// A search hit: the chunk plus its similarity to the query.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub chunk: DocumentChunk,
    pub similarity: f32,
}

/// Aggregate statistics about the store.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub total_chunks: usize,
    pub sources: Vec<String>,
    pub avg_chunk_length: usize,
}

struct StoreState {
    chunks: Vec<DocumentChunk>,
    loaded: bool,
}

/// Persisted set of content chunks, searched by cosine similarity.
///
/// The chunk collection lives behind a single `RwLock`; the persisted form
/// is one JSON document rewritten wholesale on every save. Loading is lazy
/// and memoized per process — external modification of the backing file
/// while the process runs is not observed (single-writer assumption).
pub struct KnowledgeStore {
    path: PathBuf,
    embedder: Arc<dyn Embedder>,
    state: RwLock<StoreState>,
}

impl KnowledgeStore {
    pub fn new(path: impl Into<PathBuf>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            path: path.into(),
            embedder,
            state: RwLock::new(StoreState {
                chunks: Vec::new(),
                loaded: false,
            }),
        }
    }

    /// The embedder this store was built with, for ingestion to reuse.
    pub fn embedder(&self) -> &Arc<dyn Embedder> {
        &self.embedder
    }

    /// Load the persisted chunks if not already loaded. A missing file
    /// starts an empty index; an unreadable or corrupt file is logged and
    /// also starts empty, so the service can come up cold instead of
    /// crash-looping.
    pub async fn load(&self) -> Result<()> {
        let mut state = self.state.write().await;
        if state.loaded {
            return Ok(());
        }

        match self.read_backing_file() {
            Ok(Some(chunks)) => {
                tracing::info!("loaded {} chunks from {}", chunks.len(), self.path.display());
                state.chunks = chunks;
            }
            Ok(None) => {
                tracing::info!("no knowledge store at {}, starting fresh", self.path.display());
            }
            Err(e) => {
                tracing::warn!("knowledge store unreadable, starting empty: {e}");
            }
        }
        state.loaded = true;
        Ok(())
    }

    fn read_backing_file(&self) -> Result<Option<Vec<DocumentChunk>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&self.path)
            .map_err(|e| BuddyError::IndexCorrupt(e.to_string()))?;
        let chunks: Vec<DocumentChunk> = serde_json::from_str(&data)
            .map_err(|e| BuddyError::IndexCorrupt(e.to_string()))?;
        Ok(Some(chunks))
    }

    /// Persist the full chunk collection, rewriting the backing file.
    pub async fn save(&self) -> Result<()> {
        let state = self.state.read().await;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string(&state.chunks)?;
        std::fs::write(&self.path, data)?;
        tracing::debug!("saved {} chunks to {}", state.chunks.len(), self.path.display());
        Ok(())
    }

    /// Upsert chunks: any existing chunk with the same `id` is replaced.
    /// Re-ingesting a source with the same chunk ids is idempotent.
    pub async fn add_chunks(&self, chunks: Vec<DocumentChunk>) -> Result<()> {
        self.load().await?;
        let mut state = self.state.write().await;
        for chunk in chunks {
            state.chunks.retain(|c| c.id != chunk.id);
            state.chunks.push(chunk);
        }
        Ok(())
    }

    /// Embed the query and rank every stored chunk by cosine similarity.
    ///
    /// Results below `min_similarity` are dropped; at most `top_k` are
    /// returned, highest first. Equal scores keep ingestion order (stable
    /// sort), so tie order is deterministic.
    pub async fn search(
        &self,
        query: &str,
        top_k: usize,
        min_similarity: f32,
    ) -> Result<Vec<SearchResult>> {
        self.load().await?;

        {
            let state = self.state.read().await;
            if state.chunks.is_empty() {
                tracing::debug!("knowledge store is empty, nothing to search");
                return Ok(Vec::new());
            }
        }

        // Embed outside the lock; the remote call is the slow part.
        let query_embedding = self.embedder.embed(query).await?;

        let state = self.state.read().await;
        let mut results = Vec::new();
        for chunk in &state.chunks {
            let similarity =
                crate::similarity::cosine_similarity(&query_embedding, &chunk.embedding)?;
            if similarity >= min_similarity {
                results.push(SearchResult {
                    chunk: chunk.clone(),
                    similarity,
                });
            }
        }

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        results.truncate(top_k);
        Ok(results)
    }

    /// Remove every chunk whose metadata source matches. Persists the
    /// change and returns the number removed.
    pub async fn delete_by_source(&self, source: &str) -> Result<usize> {
        self.load().await?;
        let removed = {
            let mut state = self.state.write().await;
            let before = state.chunks.len();
            state.chunks.retain(|c| c.metadata.source != source);
            before - state.chunks.len()
        };
        self.save().await?;
        Ok(removed)
    }

    /// Drop all chunks and persist the empty index.
    pub async fn clear(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.chunks.clear();
            state.loaded = true;
        }
        self.save().await
    }

    pub async fn stats(&self) -> Result<StoreStats> {
        self.load().await?;
        let state = self.state.read().await;

        let mut sources: Vec<String> = Vec::new();
        for chunk in &state.chunks {
            if !sources.contains(&chunk.metadata.source) {
                sources.push(chunk.metadata.source.clone());
            }
        }

        let avg_chunk_length = if state.chunks.is_empty() {
            0
        } else {
            let total: usize = state.chunks.iter().map(|c| c.content.chars().count()).sum();
            total / state.chunks.len()
        };

        Ok(StoreStats {
            total_chunks: state.chunks.len(),
            sources,
            avg_chunk_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Deterministic embedder: maps known words onto axes of a 4-dim space.
    struct StubEmbedder;

    fn axis_vector(text: &str) -> Vec<f32> {
        let t = text.to_lowercase();
        let axes = ["alpha", "beta", "gamma", "delta"];
        let mut v: Vec<f32> = axes
            .iter()
            .map(|a| if t.contains(a) { 1.0 } else { 0.0 })
            .collect();
        if v.iter().all(|x| *x == 0.0) {
            v[3] = 0.1;
        }
        v
    }

    #[async_trait]
    impl Embedder for StubEmbedder {
        async fn embed(&self, text: &str) -> buddy_core::error::Result<Vec<f32>> {
            Ok(axis_vector(text))
        }

        async fn embed_batch(
            &self,
            texts: &[String],
        ) -> buddy_core::error::Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|t| axis_vector(t)).collect())
        }
    }

    fn chunk(id: &str, content: &str, source: &str) -> DocumentChunk {
        DocumentChunk {
            id: id.into(),
            content: content.into(),
            embedding: axis_vector(content),
            metadata: ChunkMetadata::for_source(source),
        }
    }

    fn scratch_store(name: &str) -> (KnowledgeStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("buddy-store-test-{name}"));
        std::fs::create_dir_all(&dir).ok();
        let path = dir.join("knowledge.json");
        std::fs::remove_file(&path).ok();
        (KnowledgeStore::new(&path, Arc::new(StubEmbedder)), dir)
    }

    #[tokio::test]
    async fn test_upsert_replaces_same_id() {
        let (store, dir) = scratch_store("upsert");
        store
            .add_chunks(vec![chunk("doc-chunk-0", "alpha", "doc")])
            .await
            .unwrap();
        store
            .add_chunks(vec![chunk("doc-chunk-0", "alpha beta", "doc")])
            .await
            .unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total_chunks, 1);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_search_respects_top_k_and_min_similarity() {
        let (store, dir) = scratch_store("search");
        store
            .add_chunks(vec![
                chunk("a-chunk-0", "alpha", "a"),
                chunk("a-chunk-1", "alpha alpha", "a"),
                chunk("b-chunk-0", "beta", "b"),
                chunk("c-chunk-0", "gamma", "c"),
            ])
            .await
            .unwrap();

        let results = store.search("alpha", 10, 0.9).await.unwrap();
        assert_eq!(results.len(), 2);
        for r in &results {
            assert!(r.similarity >= 0.9);
        }

        let capped = store.search("alpha", 1, 0.0).await.unwrap();
        assert_eq!(capped.len(), 1);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_search_ties_keep_ingestion_order() {
        let (store, dir) = scratch_store("ties");
        store
            .add_chunks(vec![
                chunk("x-chunk-0", "alpha first", "x"),
                chunk("y-chunk-0", "alpha second", "y"),
            ])
            .await
            .unwrap();

        let results = store.search("alpha", 5, 0.5).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk.id, "x-chunk-0");
        assert_eq!(results[1].chunk.id, "y-chunk-0");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_search_empty_store_returns_nothing() {
        let (store, dir) = scratch_store("empty");
        let results = store.search("alpha", 5, 0.0).await.unwrap();
        assert!(results.is_empty());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_delete_by_source_returns_count() {
        let (store, dir) = scratch_store("delete");
        store
            .add_chunks(vec![
                chunk("a-chunk-0", "alpha", "a"),
                chunk("a-chunk-1", "beta", "a"),
                chunk("b-chunk-0", "gamma", "b"),
            ])
            .await
            .unwrap();

        let removed = store.delete_by_source("a").await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.stats().await.unwrap().total_chunks, 1);

        let removed_again = store.delete_by_source("a").await.unwrap();
        assert_eq!(removed_again, 0);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_save_and_reload_round_trip() {
        let (store, dir) = scratch_store("roundtrip");
        store
            .add_chunks(vec![chunk("a-chunk-0", "alpha", "a")])
            .await
            .unwrap();
        store.save().await.unwrap();

        let reopened =
            KnowledgeStore::new(dir.join("knowledge.json"), Arc::new(StubEmbedder));
        let stats = reopened.stats().await.unwrap();
        assert_eq!(stats.total_chunks, 1);
        assert_eq!(stats.sources, vec!["a".to_string()]);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_corrupt_backing_file_starts_empty() {
        let dir = std::env::temp_dir().join("buddy-store-test-corrupt");
        std::fs::create_dir_all(&dir).ok();
        let path = dir.join("knowledge.json");
        std::fs::write(&path, "{ this is not json").unwrap();

        let store = KnowledgeStore::new(&path, Arc::new(StubEmbedder));
        store.load().await.unwrap();
        assert_eq!(store.stats().await.unwrap().total_chunks, 0);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_stats_average_length() {
        let (store, dir) = scratch_store("stats");
        store
            .add_chunks(vec![
                chunk("a-chunk-0", "alpha", "a"),   // 5 chars
                chunk("b-chunk-0", "beta note", "b"), // 9 chars
            ])
            .await
            .unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total_chunks, 2);
        assert_eq!(stats.avg_chunk_length, 7);
        assert_eq!(stats.sources.len(), 2);
        std::fs::remove_dir_all(&dir).ok();
    }
}
