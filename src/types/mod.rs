//! Core types (documents, chunks, retrieval results, errors).

use serde::{Deserialize, Serialize};

// ============= Ingestion Types =============

/// A raw input document: its text plus an identifying label (file name,
/// URL, or a sample-corpus tag). Documents are consumed during ingestion
/// and discarded; only their chunks survive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Where the text came from (file name, URL, sample tag).
    pub label: String,
    /// The document's full text.
    pub text: String,
}

impl Document {
    /// Create a document from a label and its text.
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// A bounded-length fragment of a document's normalized text, the unit of
/// embedding and retrieval.
///
/// `position` is the chunk's 0-based index in the global chunk sequence
/// (insertion order across all documents) and is its identity for
/// retrieval: vector `position` in the session's index always corresponds
/// to this chunk. Chunks are immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Index in the global chunk sequence.
    pub position: usize,
    /// Label of the originating document.
    pub label: String,
    /// Chunk text; never empty.
    pub text: String,
}

// ============= Retrieval Types =============

/// A chunk returned from retrieval, paired with its distance score.
///
/// Lower distance means more similar; results are ordered best-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    /// Index of the chunk in the session's chunk sequence.
    pub position: usize,
    /// Label of the originating document.
    pub label: String,
    /// Chunk text.
    pub text: String,
    /// Squared Euclidean distance between the query and chunk embeddings.
    pub distance: f32,
}

// ============= Error Types =============

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Embedding call failed: transport error, malformed response, or a
    /// vector whose length differs from the session's established
    /// dimension.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Completion (chat) call failed.
    #[error("LLM error: {0}")]
    Llm(String),

    /// Vector index error (empty index, dimension mismatch, invalid
    /// vector).
    #[error("Index error: {0}")]
    Index(#[from] grail_vector::Error),

    /// Document source unreachable or unreadable.
    #[error("Document source error: {0}")]
    Source(String),

    /// Invalid or unloadable configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_error_conversion() {
        let err: AppError = grail_vector::Error::EmptyIndex.into();
        assert!(matches!(
            err,
            AppError::Index(grail_vector::Error::EmptyIndex)
        ));
    }

    #[test]
    fn test_error_display() {
        let err = AppError::Embedding("connection refused".to_string());
        assert_eq!(err.to_string(), "Embedding error: connection refused");
    }
}
