//! Mock implementations for testing.
//!
//! Deterministic stand-ins for the embedding and completion clients so
//! pipeline tests run without a model server.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::stream;
use grail::llm::{CompletionClient, CompletionStream, EmbeddingClient};
use grail::types::{AppError, Result};
use parking_lot::Mutex;

/// Embedding client backed by a fixed text → vector table.
///
/// Texts missing from the table (the dimension probe, unexpected queries)
/// embed to the zero vector of `default_dim`. Counts its calls so tests
/// can assert on cache behavior.
pub struct StubEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    default_dim: usize,
    calls: AtomicUsize,
}

impl StubEmbedder {
    pub fn new(default_dim: usize) -> Self {
        Self {
            vectors: HashMap::new(),
            default_dim,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_vector(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.to_string(), vector);
        self
    }

    /// Number of embed calls that reached this client (cache misses).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl EmbeddingClient for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| vec![0.0; self.default_dim]))
    }

    fn model_name(&self) -> &str {
        "stub-embedder"
    }
}

/// Embedding client that replays a scripted sequence of vectors, one per
/// call, in order. Used to simulate a model whose output dimension drifts
/// mid-ingestion.
pub struct SequenceEmbedder {
    responses: Mutex<VecDeque<Vec<f32>>>,
}

impl SequenceEmbedder {
    pub fn new(responses: Vec<Vec<f32>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl EmbeddingClient for SequenceEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        self.responses
            .lock()
            .pop_front()
            .ok_or_else(|| AppError::Embedding("SequenceEmbedder exhausted".to_string()))
    }

    fn model_name(&self) -> &str {
        "sequence-embedder"
    }
}

/// Embedding client that always fails.
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingClient for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(AppError::Embedding("mock embedding failure".to_string()))
    }

    fn model_name(&self) -> &str {
        "failing-embedder"
    }
}

/// Completion client that returns a fixed response.
pub struct StubCompleter {
    response: String,
}

impl StubCompleter {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

#[async_trait]
impl CompletionClient for StubCompleter {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Ok(self.response.clone())
    }

    async fn complete_stream(&self, _prompt: &str) -> Result<CompletionStream> {
        let fragments: Vec<Result<String>> = self
            .response
            .split_inclusive(' ')
            .map(|s| Ok(s.to_string()))
            .collect();
        Ok(Box::new(Box::pin(stream::iter(fragments))))
    }

    fn model_name(&self) -> &str {
        "stub-completer"
    }
}
