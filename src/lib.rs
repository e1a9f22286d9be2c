//! # GRAIL - Grounded Retrieval Augmented Inference Loop
//!
//! A local-first RAG question-answering pipeline: documents are chunked,
//! embedded via a local Ollama server, and indexed in an embedded exact
//! nearest-neighbor index; at query time the nearest chunks ground the
//! generated answer, with a fixed fallback when the context is
//! insufficient.
//!
//! ## Overview
//!
//! GRAIL can be used in two ways:
//!
//! 1. **As a CLI** - Run the `grail` binary for an interactive
//!    question-answering loop over your documents
//! 2. **As a library** - Import the pipeline components into your own
//!    Rust project
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use grail::llm::OllamaClient;
//! use grail::rag::{compose_prompt, RagSession, SessionOptions};
//! use grail::sources::{DocumentSource, StaticSource};
//!
//! #[tokio::main]
//! async fn main() -> grail::Result<()> {
//!     let embedder = Arc::new(OllamaClient::new(
//!         "http://localhost:11434",
//!         "nomic-embed-text",
//!         Duration::from_secs(120),
//!     ));
//!
//!     let docs = StaticSource::samples().list().await?;
//!     let session = RagSession::build(docs, embedder, SessionOptions::default()).await?;
//!
//!     let retrieved = session.retrieve("How do I reset my password?", 3).await?;
//!     let prompt = compose_prompt("How do I reset my password?", &retrieved);
//!     println!("{prompt}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`rag`] - Chunking, embedding cache, retrieval session, prompt
//!   assembly
//! - [`llm`] - Embedding/completion client traits and the Ollama
//!   implementation
//! - [`sources`] - Document sources (static list, web page, directory)
//! - [`cli`] - Command-line parsing and terminal output
//! - [`types`] - Core types and error handling
//! - [`utils`] - Configuration
//!
//! ## Architecture
//!
//! ```text
//! DocumentSource ──► Documents ──► TextChunker ──► Chunks
//!                                                    │
//!                              EmbeddingClient ◄─────┤ (probe pins the dimension)
//!                                                    ▼
//!                                    grail_vector::VectorIndex (exact L2)
//!                                                    │
//! Query ──► EmbeddingClient ──► VectorIndex.search ──► RetrievedChunks
//!                                                    │
//!                     compose_prompt ◄───────────────┘
//!                           │
//!                  CompletionClient ──► grounded answer
//! ```
//!
//! The chunk sequence and the index's vectors stay in 1:1 positional
//! correspondence for the lifetime of a [`rag::RagSession`]; the session
//! is immutable once built, so concurrent retrieval needs no locking.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// Command-line interface and terminal output.
pub mod cli;
/// LLM provider clients and abstractions.
pub mod llm;
/// Retrieval Augmented Generation (RAG) pipeline.
pub mod rag;
/// Document sources (static list, web page, directory tree).
pub mod sources;
/// Core types (documents, chunks, retrieval results, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use llm::{CompletionClient, EmbeddingClient, OllamaClient};
pub use rag::{compose_prompt, RagSession, SessionOptions, TextChunker, FALLBACK_ANSWER};
pub use sources::{DocumentSource, SourceProvider};
pub use types::{AppError, Chunk, Document, Result, RetrievedChunk};
pub use utils::config::GrailConfig;
