//! Two-stage menu classification
//!
//! Each target is first put to the content service as a yes/no relevance question.
//! Only a non-negative answer triggers the second, extraction request.

use crate::service::{ContentRequest, ContentService, ServiceError};
use crate::url::CrawlTarget;
use std::sync::Arc;
use std::time::Duration;

/// Relevance question asked about every target
pub const RELEVANCE_PROMPT: &str =
    "does this content contain restaurant menu items? please only respond with yes or no";

/// Extraction request sent to relevant targets
pub const EXTRACTION_PROMPT: &str =
    "please return a list of menu items and their prices from the url";

/// Characters of extracted text echoed to the log
const LOG_PREVIEW_CHARS: usize = 250;

/// Outcome of classifying one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationResult {
    /// The relevance stage said no (or answered nothing)
    NotRelevant,

    /// Menu text extracted from `url`
    Relevant { text: String, url: String },

    /// The target could not be read or the service call failed
    FetchError { url: String, diagnostic: String },
}

impl ClassificationResult {
    /// Text this result adds to the report; empty unless relevant
    pub fn text(&self) -> &str {
        match self {
            Self::Relevant { text, .. } => text,
            _ => "",
        }
    }

    /// Source URL this result adds to the report; empty unless relevant
    pub fn source_url(&self) -> &str {
        match self {
            Self::Relevant { url, .. } => url,
            _ => "",
        }
    }
}

/// Decides whether a relevance-stage answer is negative
///
/// The rule is a literal, case-insensitive search for "no" anywhere in the answer,
/// so "No", "nope" and "no problem, here is the menu" are all negative while an
/// empty answer is not. Callers handle empty answers separately.
pub fn is_negative_answer(answer: &str) -> bool {
    answer.to_lowercase().contains("no")
}

/// Runs the relevance and extraction stages against a content service
#[derive(Clone)]
pub struct MenuClassifier {
    service: Arc<dyn ContentService>,
    call_timeout: Duration,
}

impl MenuClassifier {
    /// Creates a classifier; every service call is bounded by `call_timeout`
    pub fn new(service: Arc<dyn ContentService>, call_timeout: Duration) -> Self {
        Self {
            service,
            call_timeout,
        }
    }

    /// Classifies one target and extracts its menu if relevant
    ///
    /// Never fails: service errors become [`ClassificationResult::FetchError`].
    pub async fn classify_and_extract(&self, target: &CrawlTarget) -> ClassificationResult {
        let url = target.url().as_str();
        let mime_type = target.kind().mime_type();
        tracing::debug!("Checking {} for menu content ({})", url, target.kind());

        let answer = match self.ask(RELEVANCE_PROMPT, url, mime_type).await {
            Ok(answer) => answer,
            Err(e) => return self.failed(url, "relevance check", e),
        };
        tracing::info!("Initial menu check for {} returned: '{}'", url, answer.trim());

        if answer.trim().is_empty() || is_negative_answer(&answer) {
            tracing::debug!("No menu found on {}", url);
            return ClassificationResult::NotRelevant;
        }

        tracing::debug!("Menu content detected on {}, extracting items", url);
        let text = match self.ask(EXTRACTION_PROMPT, url, mime_type).await {
            Ok(text) => text,
            Err(e) => return self.failed(url, "menu extraction", e),
        };

        if text.trim().is_empty() {
            tracing::debug!("Extraction for {} came back empty", url);
            return ClassificationResult::NotRelevant;
        }

        tracing::info!(
            "Extracted menu items from {}: {}...",
            url,
            text.chars().take(LOG_PREVIEW_CHARS).collect::<String>()
        );

        ClassificationResult::Relevant {
            text,
            url: url.to_string(),
        }
    }

    async fn ask(&self, prompt: &str, url: &str, mime_type: &str) -> Result<String, ServiceError> {
        let request = ContentRequest::new(prompt, url, mime_type);
        match tokio::time::timeout(self.call_timeout, self.service.generate(request)).await {
            Ok(result) => result,
            Err(_) => Err(ServiceError::Timeout(self.call_timeout.as_secs())),
        }
    }

    fn failed(&self, url: &str, stage: &str, error: ServiceError) -> ClassificationResult {
        tracing::warn!("{} failed for {}: {}", stage, url, error);
        ClassificationResult::FetchError {
            url: url.to_string(),
            diagnostic: format!("{} failed for {}: {}", stage, url, error),
        }
    }
}
