//! URL handling module for Menu-Scout
//!
//! This module provides authority comparison for the same-domain rule and
//! content kind inference from URL suffixes.

mod domain;
mod kind;

// Re-export main functions
pub use domain::{extract_authority, same_authority};
pub use kind::{infer_content_kind, infer_from_path, ContentKind};

use url::Url;

/// A discovered link queued for classification
///
/// Immutable once constructed; consumed once by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    url: Url,
    kind: ContentKind,
    depth: u32,
}

impl CrawlTarget {
    /// Creates a target, inferring its content kind from the URL
    pub fn new(url: Url, depth: u32) -> Self {
        let kind = infer_content_kind(&url);
        Self { url, kind, depth }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// Hops from the root page
    pub fn depth(&self) -> u32 {
        self.depth
    }
}
