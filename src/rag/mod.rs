//! Retrieval Augmented Generation (RAG) pipeline.
//!
//! # Module Structure
//!
//! - [`chunker`] - Greedy word-wrap text chunking
//! - [`cache`] - LRU cache for computed embeddings
//! - [`session`] - Ingestion pipeline and retriever
//! - [`prompt`] - Grounding prompt assembly
//!
//! # Pipeline
//!
//! 1. **Ingestion** - Documents are chunked in order; chunk position is
//!    retrieval identity
//! 2. **Embedding** - Each chunk is embedded; the dimension is pinned by
//!    a probe call at startup
//! 3. **Indexing** - All vectors are batch-built into an exact
//!    nearest-neighbor index (grail-vector)
//! 4. **Retrieval** - The query is embedded and the nearest chunks are
//!    returned in distance order
//! 5. **Generation** - Retrieved chunks ground the completion prompt
//!
//! # Example
//!
//! ```ignore
//! use grail::rag::session::{RagSession, SessionOptions};
//! use grail::rag::prompt::compose_prompt;
//!
//! let session = RagSession::build(docs, embedder, SessionOptions::default()).await?;
//! let retrieved = session.retrieve("what payment methods exist?", 3).await?;
//! let prompt = compose_prompt("what payment methods exist?", &retrieved);
//! ```

pub mod cache;
pub mod chunker;
pub mod prompt;
pub mod session;

pub use cache::{CacheConfig, CacheStats, LruEmbeddingCache};
pub use chunker::TextChunker;
pub use prompt::{compose_prompt, FALLBACK_ANSWER};
pub use session::{RagSession, SessionOptions};
