//! LLM provider clients and abstractions.

pub mod client;
pub mod ollama;

pub use client::{CompletionClient, CompletionStream, EmbeddingClient};
pub use ollama::OllamaClient;
