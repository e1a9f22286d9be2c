//! LLM client abstractions.
//!
//! The pipeline talks to the model service through two narrow capability
//! traits so the core stays testable with deterministic fakes:
//!
//! - [`EmbeddingClient`] - text in, fixed-dimension vector out
//! - [`CompletionClient`] - prompt in, generated text out (optionally
//!   streamed)
//!
//! The shipped implementation is [`crate::llm::OllamaClient`]; tests use
//! in-process stubs.

use crate::types::Result;
use async_trait::async_trait;
use futures::Stream;

/// A boxed stream of generated text fragments.
pub type CompletionStream = Box<dyn Stream<Item = Result<String>> + Send + Unpin>;

/// Maps text to a fixed-dimension embedding vector.
///
/// The dimension is a property of the model and is established once per
/// session by embedding a probe string; implementations report transport
/// failures and malformed responses as [`crate::AppError::Embedding`].
/// Dimension consistency across calls is enforced by the session layer.
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Get the embedding model name/identifier.
    fn model_name(&self) -> &str;
}

/// Generates text completions from a prompt.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generate a completion from a prompt.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Stream a completion as it is generated.
    async fn complete_stream(&self, prompt: &str) -> Result<CompletionStream>;

    /// Get the completion model name/identifier.
    fn model_name(&self) -> &str;
}
