//! # Buddy Knowledge
//!
//! The semantic knowledge engine: character chunking with overlap, remote
//! embeddings, and a persisted vector index searched by cosine similarity.
//!
//! ## How it works
//! ```text
//! ingest: document → chunk_text → embed_batch → upsert → save (full rewrite)
//! query:  "how does the capstone work?"
//!   ↓ embed
//! linear scan over every stored chunk (cosine similarity)
//!   ↓ filter >= min_similarity, sort descending, take top_k
//! excerpts handed to the agent as tool output
//! ```
//!
//! The index is a single JSON document, loaded lazily once per process and
//! rewritten wholesale on every save. Search is a linear scan; an ANN
//! structure could replace it behind the same `search` contract if the
//! corpus outgrows that.

pub mod chunker;
pub mod ingest;
pub mod similarity;
pub mod store;

pub use chunker::chunk_text;
pub use ingest::{DocumentMetadata, IngestOptions, IngestReport, ingest_collection, ingest_document};
pub use similarity::cosine_similarity;
pub use store::{ChunkMetadata, DocumentChunk, KnowledgeStore, SearchResult, StoreStats};
