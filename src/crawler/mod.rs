//! Crawler module for menu discovery
//!
//! This module contains the discovery pipeline, including:
//! - HTTP fetching of the root page
//! - HTML parsing and same-host link extraction
//! - Two-stage menu classification against the content service
//! - Overall discovery coordination on a bounded worker pool

mod classifier;
mod coordinator;
mod fetcher;
mod parser;

pub use classifier::{
    is_negative_answer, ClassificationResult, MenuClassifier, EXTRACTION_PROMPT, RELEVANCE_PROMPT,
};
pub use coordinator::{Coordinator, MAX_DEPTH};
pub use fetcher::{build_http_client, FetchError, FetchedPage, PageFetcher};
pub use parser::{extract_links, LinkSet};
