//! Configuration utilities.

pub mod config;

pub use config::{GrailConfig, OllamaConfig, RagConfig, SourceConfig, SourceKind};
