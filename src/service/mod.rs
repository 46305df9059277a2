//! Content-understanding service boundary
//!
//! The crawler never reads page content itself. It hands a document URI and a
//! prompt to a [`ContentService`] and receives generated text back. The trait is
//! the injection seam; [`GeminiClient`] is the production implementation.

mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a content service call
///
/// These stay distinguishable from an explicit empty answer, which is `Ok("")`.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing project, location or other client settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection failed or the transport gave up
    #[error("Network error: {0}")]
    Network(String),

    /// The call did not finish within its deadline
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Non-2xx answer from the service (auth, quota, unreadable document ...)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),
}

/// One "prompt about a document" request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    pub prompt: String,
    pub document_uri: String,
    pub mime_type: String,
}

impl ContentRequest {
    pub fn new(
        prompt: impl Into<String>,
        document_uri: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            document_uri: document_uri.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// Text-in, text-out content understanding
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Answers `request.prompt` about the document at `request.document_uri`
    async fn generate(&self, request: ContentRequest) -> Result<String, ServiceError>;
}
