//! Ollama client implementing the embedding and completion capabilities.

use std::time::Duration;

use crate::llm::client::{CompletionClient, CompletionStream, EmbeddingClient};
use crate::types::{AppError, Result};
use async_stream::stream;
use async_trait::async_trait;
use futures::StreamExt;
use ollama_rs::{
    generation::chat::{request::ChatMessageRequest, ChatMessage},
    generation::embeddings::request::{EmbeddingsInput, GenerateEmbeddingsRequest},
    Ollama,
};
use tokio::time::timeout;

/// Client for a local Ollama server.
///
/// One instance serves one model; construct separate instances for the
/// embedding and chat models. Every request is wrapped in the configured
/// timeout so an unreachable server surfaces as an error instead of an
/// indefinite block.
pub struct OllamaClient {
    client: Ollama,
    model: String,
    request_timeout: Duration,
}

impl OllamaClient {
    /// Create a client for `model` behind `base_url`
    /// (e.g. `http://localhost:11434`).
    pub fn new(base_url: &str, model: impl Into<String>, request_timeout: Duration) -> Self {
        let (host, port) = parse_base_url(base_url);
        let client = Ollama::new(host, port);

        Self {
            client,
            model: model.into(),
            request_timeout,
        }
    }

    fn timeout_error(&self, what: &str) -> String {
        format!(
            "{} request to Ollama timed out after {:?}",
            what, self.request_timeout
        )
    }
}

/// Split a base URL into the scheme+host and port parts Ollama expects.
/// Defaults to `http://localhost:11434` for anything unparseable.
fn parse_base_url(base_url: &str) -> (String, u16) {
    let (scheme, rest) = match base_url.split_once("://") {
        Some((scheme, rest)) => (scheme, rest),
        None => ("http", base_url),
    };

    let rest = rest.trim_end_matches('/');
    if rest.is_empty() {
        return ("http://localhost".to_string(), 11434);
    }

    let (host, port) = match rest.split_once(':') {
        Some((host, port)) => (host, port.parse().unwrap_or(11434)),
        None => (rest, 11434),
    };

    (format!("{}://{}", scheme, host), port)
}

#[async_trait]
impl EmbeddingClient for OllamaClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = GenerateEmbeddingsRequest::new(
            self.model.clone(),
            EmbeddingsInput::Single(text.to_string()),
        );

        let response = timeout(self.request_timeout, self.client.generate_embeddings(request))
            .await
            .map_err(|_| AppError::Embedding(self.timeout_error("embedding")))?
            .map_err(|e| AppError::Embedding(format!("Ollama error: {}", e)))?;

        let embedding = response
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Embedding("Ollama returned no embedding".to_string()))?;

        if embedding.is_empty() {
            return Err(AppError::Embedding(
                "Ollama returned an empty embedding vector".to_string(),
            ));
        }

        Ok(embedding)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionClient for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let messages = vec![ChatMessage::user(prompt.to_string())];
        let request = ChatMessageRequest::new(self.model.clone(), messages);

        let response = timeout(self.request_timeout, self.client.send_chat_messages(request))
            .await
            .map_err(|_| AppError::Llm(self.timeout_error("chat")))?
            .map_err(|e| AppError::Llm(format!("Ollama error: {}", e)))?;

        Ok(response.message.content)
    }

    async fn complete_stream(&self, prompt: &str) -> Result<CompletionStream> {
        let messages = vec![ChatMessage::user(prompt.to_string())];
        let request = ChatMessageRequest::new(self.model.clone(), messages);

        let mut stream_response = timeout(
            self.request_timeout,
            self.client.send_chat_messages_stream(request),
        )
        .await
        .map_err(|_| AppError::Llm(self.timeout_error("chat")))?
        .map_err(|e| AppError::Llm(format!("Ollama stream error: {}", e)))?;

        // Re-yield only the content fragments of each chunk
        let output_stream = stream! {
            while let Some(chunk_result) = stream_response.next().await {
                match chunk_result {
                    Ok(chunk) => {
                        let content = chunk.message.content;
                        if !content.is_empty() {
                            yield Ok(content);
                        }
                    }
                    Err(_) => {
                        yield Err(AppError::Llm("Stream chunk error".to_string()));
                        break;
                    }
                }
            }
        };

        Ok(Box::new(Box::pin(output_stream)))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
