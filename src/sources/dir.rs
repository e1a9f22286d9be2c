//! Directory tree document source.

use std::path::{Path, PathBuf};

use crate::sources::DocumentSource;
use crate::types::{AppError, Document, Result};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Walks a directory tree and reads matching files, one document per file.
///
/// Files are kept when their extension matches and their name starts with
/// one of the configured prefixes (an empty prefix list keeps everything).
/// Matching files are read in sorted path order so document and chunk
/// positions are reproducible across runs.
pub struct DirSource {
    root: PathBuf,
    prefixes: Vec<String>,
    extension: String,
}

impl DirSource {
    /// Create a source walking `root`.
    pub fn new(root: PathBuf, prefixes: Vec<String>, extension: String) -> Self {
        Self {
            root,
            prefixes,
            extension,
        }
    }

    fn matches(&self, path: &Path) -> bool {
        let has_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension));
        if !has_extension {
            return false;
        }

        if self.prefixes.is_empty() {
            return true;
        }
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.prefixes.iter().any(|p| name.starts_with(p.as_str())))
    }
}

#[async_trait]
impl DocumentSource for DirSource {
    async fn list(&self) -> Result<Vec<Document>> {
        let mut files: Vec<PathBuf> = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir).await.map_err(|e| {
                AppError::Source(format!("cannot read directory {}: {}", dir.display(), e))
            })?;

            while let Some(entry) = entries.next_entry().await.map_err(|e| {
                AppError::Source(format!("cannot read directory {}: {}", dir.display(), e))
            })? {
                let path = entry.path();
                let file_type = entry.file_type().await.map_err(|e| {
                    AppError::Source(format!("cannot stat {}: {}", path.display(), e))
                })?;

                if file_type.is_dir() {
                    pending.push(path);
                } else if self.matches(&path) {
                    files.push(path);
                } else {
                    debug!(path = %path.display(), "Skipping non-matching file");
                }
            }
        }

        files.sort();

        let mut documents = Vec::new();
        for path in files {
            // An unreadable individual file is skipped, not fatal; only
            // the root itself is required to be readable.
            match tokio::fs::read_to_string(&path).await {
                Ok(text) => {
                    let label = path
                        .file_name()
                        .and_then(|name| name.to_str())
                        .unwrap_or("unnamed")
                        .to_string();
                    documents.push(Document::new(label, text));
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable file");
                }
            }
        }

        Ok(documents)
    }

    fn describe(&self) -> String {
        if self.prefixes.is_empty() {
            format!("directory {} (*.{})", self.root.display(), self.extension)
        } else {
            format!(
                "directory {} (*.{}, prefixes {:?})",
                self.root.display(),
                self.extension,
                self.prefixes
            )
        }
    }
}
