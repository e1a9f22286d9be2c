//! Retrieval session: owns the chunk sequence, embeddings, and index.
//!
//! The session object replaces ambient globals: everything the retriever
//! needs (chunks, the established embedding dimension, the built index,
//! the embedding cache) lives here and is passed around explicitly.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::{stream, StreamExt, TryStreamExt};
use grail_vector::{IndexStats, VectorIndex};
use tracing::{debug, info, instrument};

use crate::llm::EmbeddingClient;
use crate::rag::cache::{CacheConfig, CacheStats, LruEmbeddingCache};
use crate::rag::chunker::TextChunker;
use crate::types::{AppError, Chunk, Document, Result, RetrievedChunk};

/// Probe text embedded once at startup to establish the model's dimension.
const DIMENSION_PROBE: &str = "dimension probe";

/// Options controlling session construction.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// How many embedding requests may be in flight at once.
    pub embed_concurrency: usize,
    /// Embedding cache configuration.
    pub cache: CacheConfig,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            chunk_size: 200,
            embed_concurrency: 4,
            cache: CacheConfig::default(),
        }
    }
}

/// A fully-ingested corpus ready to answer retrieval queries.
///
/// Built once from the document set; immutable afterwards, so concurrent
/// [`RagSession::retrieve`] calls are safe without locking. Invariant:
/// vector `i` of the index corresponds to `chunks[i]`, established at
/// build time and never mutated.
pub struct RagSession {
    chunks: Vec<Chunk>,
    index: VectorIndex,
    dimensions: usize,
    embedder: Arc<dyn EmbeddingClient>,
    cache: LruEmbeddingCache,
}

impl RagSession {
    /// Ingest `docs` and build the retrieval index.
    ///
    /// Chunks every document in order, establishes the embedding
    /// dimension from a probe call, embeds all chunks (concurrently,
    /// order-preserving), and builds the index once every vector is
    /// available.
    ///
    /// # Errors
    ///
    /// - [`AppError::Index`] with `EmptyIndex` if the documents produce
    ///   zero chunks.
    /// - [`AppError::Embedding`] if any embedding call fails or returns a
    ///   vector whose length differs from the probe-established
    ///   dimension. The whole build aborts; a failed call is never
    ///   silently skipped, as a gap would break the position
    ///   correspondence between chunks and vectors.
    #[instrument(skip_all, fields(documents = docs.len()))]
    pub async fn build(
        docs: Vec<Document>,
        embedder: Arc<dyn EmbeddingClient>,
        options: SessionOptions,
    ) -> Result<Self> {
        let chunker = TextChunker::new(options.chunk_size);

        let mut chunks: Vec<Chunk> = Vec::new();
        for doc in &docs {
            for text in chunker.chunk(&doc.text) {
                chunks.push(Chunk {
                    position: chunks.len(),
                    label: doc.label.clone(),
                    text,
                });
            }
        }

        if chunks.is_empty() {
            return Err(grail_vector::Error::EmptyIndex.into());
        }
        info!(
            documents = docs.len(),
            chunks = chunks.len(),
            chunk_size = options.chunk_size,
            "Chunked documents"
        );

        let probe = embedder.embed(DIMENSION_PROBE).await?;
        let dimensions = probe.len();
        info!(
            dimensions,
            model = embedder.model_name(),
            "Established embedding dimension"
        );

        let cache = LruEmbeddingCache::new(options.cache.clone());
        let total = chunks.len();
        let completed = AtomicUsize::new(0);
        let embedder_ref = embedder.as_ref();

        let vectors: Vec<Vec<f32>> = stream::iter(chunks.iter())
            .map(|chunk| {
                let cache = &cache;
                let completed = &completed;
                async move {
                    let vector = embed_cached(embedder_ref, cache, &chunk.text).await?;
                    if vector.len() != dimensions {
                        return Err(AppError::Embedding(format!(
                            "chunk {} ({}) embedded to dimension {}, expected {}",
                            chunk.position,
                            chunk.label,
                            vector.len(),
                            dimensions
                        )));
                    }
                    let finished = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    if finished % 10 == 0 || finished == total {
                        debug!(finished, total, "Embedding progress");
                    }
                    Ok(vector)
                }
            })
            .buffered(options.embed_concurrency.max(1))
            .try_collect()
            .await?;

        // Join barrier: the index only exists once all vectors are in,
        // in chunk order.
        let index = VectorIndex::build(vectors)?;
        info!(
            vectors = index.len(),
            memory_bytes = index.memory_usage(),
            "Built vector index"
        );

        Ok(Self {
            chunks,
            index,
            dimensions,
            embedder,
            cache,
        })
    }

    /// Retrieve the `top_k` chunks most similar to `query`, best first.
    ///
    /// Embeds the query (through the cache), searches the index, and maps
    /// each hit back to its chunk. Embedding and index errors propagate
    /// unchanged.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedChunk>> {
        let vector = embed_cached(self.embedder.as_ref(), &self.cache, query).await?;
        if vector.len() != self.dimensions {
            return Err(AppError::Embedding(format!(
                "query embedded to dimension {}, expected {}",
                vector.len(),
                self.dimensions
            )));
        }

        let hits = self.index.search(&vector, top_k)?;
        Ok(hits
            .into_iter()
            .map(|hit| {
                // In range by the build-time 1:1 correspondence
                let chunk = &self.chunks[hit.position];
                RetrievedChunk {
                    position: hit.position,
                    label: chunk.label.clone(),
                    text: chunk.text.clone(),
                    distance: hit.distance,
                }
            })
            .collect())
    }

    /// Number of chunks in the session.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// The embedding dimension established at build time.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// All chunks, in position order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Index statistics.
    pub fn index_stats(&self) -> IndexStats {
        self.index.stats()
    }

    /// Embedding cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

/// Embed `text`, consulting the cache first.
async fn embed_cached(
    embedder: &dyn EmbeddingClient,
    cache: &LruEmbeddingCache,
    text: &str,
) -> Result<Vec<f32>> {
    let key = cache.compute_key(text, embedder.model_name());
    if let Some(vector) = cache.get(&key) {
        return Ok(vector);
    }

    let vector = embedder.embed(text).await?;
    cache.set(&key, vector.clone());
    Ok(vector)
}
