//! In-memory document source.

use crate::sources::DocumentSource;
use crate::types::{Document, Result};
use async_trait::async_trait;

/// A fixed list of documents held in memory.
pub struct StaticSource {
    documents: Vec<Document>,
}

impl StaticSource {
    /// Create a source from an explicit document list.
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// The built-in sample corpus, useful for trying the pipeline without
    /// any external documents.
    pub fn samples() -> Self {
        Self::new(vec![
            Document::new(
                "samples/payments",
                "Our platform supports several payment methods, including bank \
                 cards, PayPal and direct bank transfer.\n\
                 If you run into a problem during payment, contact customer \
                 support for assistance.",
            ),
            Document::new(
                "samples/password-reset",
                "Users can click \"Forgot password\" on the login page and \
                 verify with their registered email address or phone number \
                 to reset their password.",
            ),
            Document::new(
                "samples/invoices",
                "After completing an order, you can request an electronic \
                 invoice from the \"Account - Order management\" page.\n\
                 The system issues the invoice automatically and sends it to \
                 your email address.",
            ),
        ])
    }
}

#[async_trait]
impl DocumentSource for StaticSource {
    async fn list(&self) -> Result<Vec<Document>> {
        Ok(self.documents.clone())
    }

    fn describe(&self) -> String {
        format!("static list ({} documents)", self.documents.len())
    }
}
