//! Web page document source.

use std::time::Duration;

use crate::sources::DocumentSource;
use crate::types::{AppError, Document, Result};
use async_trait::async_trait;
use scraper::{Html, Node};
use tracing::info;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Elements whose text content is markup plumbing, not document text.
const SKIPPED_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Fetches a single URL and converts its HTML body to plain text.
pub struct WebSource {
    url: String,
}

impl WebSource {
    /// Create a source for the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl DocumentSource for WebSource {
    async fn list(&self) -> Result<Vec<Document>> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| AppError::Source(format!("cannot build HTTP client: {}", e)))?;

        let body = client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| AppError::Source(format!("failed to fetch {}: {}", self.url, e)))?
            .text()
            .await
            .map_err(|e| AppError::Source(format!("failed to read {}: {}", self.url, e)))?;

        let text = html_to_text(&body);
        info!(url = %self.url, bytes = body.len(), chars = text.len(), "Fetched document");

        Ok(vec![Document::new(self.url.clone(), text)])
    }

    fn describe(&self) -> String {
        format!("web page {}", self.url)
    }
}

/// Convert an HTML document to whitespace-normalized plain text.
///
/// Takes the text nodes of the parsed document, dropping the contents of
/// `script`/`style`/`noscript` elements. Entity decoding is done by the
/// HTML parser itself.
fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut out = String::new();
    for node in document.tree.nodes() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let skipped = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|el| el.name()))
            .is_some_and(|name| SKIPPED_ELEMENTS.contains(&name));
        if skipped {
            continue;
        }

        out.push_str(text);
        out.push(' ');
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
