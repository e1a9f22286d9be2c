//! Document sources.
//!
//! Everything upstream of the pipeline is abstracted behind a single
//! capability: a source produces labeled UTF-8 documents. Three
//! interchangeable implementations cover the supported acquisition modes:
//!
//! - [`StaticSource`] - a fixed in-memory list (ships a sample corpus)
//! - [`WebSource`] - fetch one URL and convert its HTML to plain text
//! - [`DirSource`] - walk a directory tree and read matching files
//!
//! # Example
//!
//! ```rust,ignore
//! use grail::sources::{DocumentSource, SourceProvider};
//!
//! let source = SourceProvider::Dir {
//!     root: "./notes".into(),
//!     prefixes: vec!["2025".to_string()],
//!     extension: "md".to_string(),
//! }
//! .create_source();
//!
//! let docs = source.list().await?;
//! ```

pub mod dir;
pub mod memory;
pub mod web;

pub use dir::DirSource;
pub use memory::StaticSource;
pub use web::WebSource;

use crate::types::{Document, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// A producer of labeled documents.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Produce all documents from this source.
    ///
    /// Fails with [`crate::AppError::Source`] when the source itself is
    /// unreachable or unreadable.
    async fn list(&self) -> Result<Vec<Document>>;

    /// Human-readable description of the source, for logs and banners.
    fn describe(&self) -> String;
}

/// Source provider configuration.
///
/// Each variant carries what its [`DocumentSource`] implementation needs.
#[derive(Debug, Clone)]
pub enum SourceProvider {
    /// Built-in sample corpus (no external dependencies).
    Samples,
    /// A single web page, converted from HTML to plain text.
    Url {
        /// Page to fetch.
        url: String,
    },
    /// A directory tree of text files.
    Dir {
        /// Root directory to walk.
        root: PathBuf,
        /// Keep only files whose names start with one of these prefixes
        /// (empty = keep all).
        prefixes: Vec<String>,
        /// File extension to keep (without the dot).
        extension: String,
    },
}

impl SourceProvider {
    /// Create a document source from this provider configuration.
    pub fn create_source(&self) -> Box<dyn DocumentSource> {
        match self {
            SourceProvider::Samples => Box::new(StaticSource::samples()),
            SourceProvider::Url { url } => Box::new(WebSource::new(url.clone())),
            SourceProvider::Dir {
                root,
                prefixes,
                extension,
            } => Box::new(DirSource::new(
                root.clone(),
                prefixes.clone(),
                extension.clone(),
            )),
        }
    }
}
