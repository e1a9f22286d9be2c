//! Configuration loaded from `grail.toml`, the environment, and CLI flags.
//!
//! Precedence, lowest to highest: built-in defaults, `grail.toml`,
//! `GRAIL_*` environment variables (a `.env` file is honored), CLI flag
//! overrides (applied by the binary).

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::rag::cache::CacheConfig;
use crate::sources::SourceProvider;
use crate::types::{AppError, Result};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrailConfig {
    /// Ollama server and model selection.
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Chunking and retrieval parameters.
    #[serde(default)]
    pub rag: RagConfig,

    /// Where documents come from.
    #[serde(default)]
    pub source: SourceConfig,
}

// ============= Ollama Configuration =============

/// Ollama connection and model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server.
    #[serde(default = "default_ollama_url")]
    pub url: String,

    /// Embedding model name.
    #[serde(default = "default_embed_model")]
    pub embed_model: String,

    /// Chat (completion) model name.
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Stream answers token-by-token in the interactive loop.
    #[serde(default = "default_stream")]
    pub stream: bool,
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_embed_model() -> String {
    "nomic-embed-text".to_string()
}

fn default_chat_model() -> String {
    "llama3.2".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_stream() -> bool {
    true
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: default_ollama_url(),
            embed_model: default_embed_model(),
            chat_model: default_chat_model(),
            request_timeout_secs: default_request_timeout_secs(),
            stream: default_stream(),
        }
    }
}

// ============= RAG Configuration =============

/// Chunking and retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagConfig {
    /// Maximum chunk length in characters.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Number of chunks retrieved per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Concurrent embedding requests during ingestion.
    #[serde(default = "default_embed_concurrency")]
    pub embed_concurrency: usize,

    /// Embedding cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
}

fn default_chunk_size() -> usize {
    200
}

fn default_top_k() -> usize {
    3
}

fn default_embed_concurrency() -> usize {
    4
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            top_k: default_top_k(),
            embed_concurrency: default_embed_concurrency(),
            cache: CacheConfig::default(),
        }
    }
}

// ============= Source Configuration =============

/// Which document source to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Built-in sample corpus.
    #[default]
    Samples,
    /// Fetch a single web page.
    Url,
    /// Walk a directory of text files.
    Dir,
}

/// Document source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Source kind.
    #[serde(default)]
    pub kind: SourceKind,

    /// Page URL (required when `kind = "url"`).
    #[serde(default)]
    pub url: Option<String>,

    /// Directory root (required when `kind = "dir"`).
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// File name prefixes to keep for the directory source (empty = all).
    #[serde(default)]
    pub prefixes: Vec<String>,

    /// File extension to keep for the directory source.
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    "md".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            url: None,
            dir: None,
            prefixes: Vec::new(),
            extension: default_extension(),
        }
    }
}

// ============= Loading & Validation =============

impl GrailConfig {
    /// Load configuration from `path` (if it exists) and apply `GRAIL_*`
    /// environment overrides on top. A missing file is not an error: the
    /// defaults apply.
    pub fn load(path: &Path) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            toml::from_str(&raw)
                .map_err(|e| AppError::Config(format!("cannot parse {}: {}", path.display(), e)))?
        } else {
            Self::default()
        };

        config.apply_env()?;
        Ok(config)
    }

    /// Apply `GRAIL_*` environment variable overrides.
    fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = env::var("GRAIL_OLLAMA_URL") {
            self.ollama.url = url;
        }
        if let Ok(model) = env::var("GRAIL_EMBED_MODEL") {
            self.ollama.embed_model = model;
        }
        if let Ok(model) = env::var("GRAIL_CHAT_MODEL") {
            self.ollama.chat_model = model;
        }
        if let Ok(value) = env::var("GRAIL_CHUNK_SIZE") {
            self.rag.chunk_size = parse_env("GRAIL_CHUNK_SIZE", &value)?;
        }
        if let Ok(value) = env::var("GRAIL_TOP_K") {
            self.rag.top_k = parse_env("GRAIL_TOP_K", &value)?;
        }
        if let Ok(url) = env::var("GRAIL_DOCS_URL") {
            self.source.kind = SourceKind::Url;
            self.source.url = Some(url);
        }
        if let Ok(dir) = env::var("GRAIL_DOCS_DIR") {
            self.source.kind = SourceKind::Dir;
            self.source.dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    /// Validate the configuration before use.
    pub fn validate(&self) -> Result<()> {
        if self.rag.chunk_size == 0 {
            return Err(AppError::Config("rag.chunk_size must be >= 1".to_string()));
        }
        if self.rag.top_k == 0 {
            return Err(AppError::Config("rag.top_k must be >= 1".to_string()));
        }
        if self.rag.embed_concurrency == 0 {
            return Err(AppError::Config(
                "rag.embed_concurrency must be >= 1".to_string(),
            ));
        }
        if self.ollama.request_timeout_secs == 0 {
            return Err(AppError::Config(
                "ollama.request_timeout_secs must be >= 1".to_string(),
            ));
        }
        match self.source.kind {
            SourceKind::Url if self.source.url.is_none() => Err(AppError::Config(
                "source.url is required when source.kind = \"url\"".to_string(),
            )),
            SourceKind::Dir if self.source.dir.is_none() => Err(AppError::Config(
                "source.dir is required when source.kind = \"dir\"".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Resolve the configured document source provider.
    ///
    /// Call [`GrailConfig::validate`] first; this only fails on the same
    /// missing-field conditions.
    pub fn source_provider(&self) -> Result<SourceProvider> {
        match self.source.kind {
            SourceKind::Samples => Ok(SourceProvider::Samples),
            SourceKind::Url => {
                let url = self.source.url.clone().ok_or_else(|| {
                    AppError::Config("source.url is required when source.kind = \"url\"".to_string())
                })?;
                Ok(SourceProvider::Url { url })
            }
            SourceKind::Dir => {
                let root = self.source.dir.clone().ok_or_else(|| {
                    AppError::Config("source.dir is required when source.kind = \"dir\"".to_string())
                })?;
                Ok(SourceProvider::Dir {
                    root,
                    prefixes: self.source.prefixes.clone(),
                    extension: self.source.extension.clone(),
                })
            }
        }
    }
}

fn parse_env(name: &str, value: &str) -> Result<usize> {
    value
        .parse()
        .map_err(|e| AppError::Config(format!("invalid {}={}: {}", name, value, e)))
}
