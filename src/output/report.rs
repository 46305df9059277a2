use crate::crawler::ClassificationResult;
use std::fmt;

/// Final result of one menu discovery run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuReport {
    /// Extracted menu text and the pages it came from
    Menu {
        /// Concatenation of every relevant page's text, in completion order
        text: String,
        /// Source URL of every relevant page, parallel to `text`
        source_urls: Vec<String>,
    },

    /// The root page could not be fetched; nothing was classified
    Unreachable { url: String, diagnostic: String },
}

impl MenuReport {
    /// Builds the report for a root page that failed to fetch
    pub fn unreachable(url: &str, cause: impl fmt::Display) -> Self {
        Self::Unreachable {
            url: url.to_string(),
            diagnostic: format!("An error occurred while fetching {}: {}", url, cause),
        }
    }

    /// Menu text, or the diagnostic sentence for an unreachable root
    pub fn text(&self) -> &str {
        match self {
            Self::Menu { text, .. } => text,
            Self::Unreachable { diagnostic, .. } => diagnostic,
        }
    }

    /// Pages that contributed menu text
    pub fn source_urls(&self) -> &[String] {
        match self {
            Self::Menu { source_urls, .. } => source_urls,
            Self::Unreachable { .. } => &[],
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }

    /// Returns true when no page contributed menu text
    pub fn is_empty(&self) -> bool {
        self.source_urls().is_empty()
    }
}

/// Renders the single string handed back to callers
///
/// A menu renders as `text + "\n" + urls` with URLs newline-joined; an unreachable
/// root renders as its diagnostic sentence.
impl fmt::Display for MenuReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Menu { text, source_urls } => {
                write!(f, "{}\n{}", text, source_urls.join("\n"))
            }
            Self::Unreachable { diagnostic, .. } => f.write_str(diagnostic),
        }
    }
}

/// Merges classification results into a report
///
/// Texts are concatenated in iteration order and the URLs of relevant results are
/// collected in the same order. Nothing is deduplicated, sorted or trimmed.
///
/// # Example
///
/// ```
/// use menu_scout::crawler::ClassificationResult;
/// use menu_scout::output::aggregate;
///
/// let report = aggregate(vec![
///     ClassificationResult::NotRelevant,
///     ClassificationResult::Relevant {
///         text: "Pizza $10".to_string(),
///         url: "https://trattoria.example/menu".to_string(),
///     },
/// ]);
/// assert_eq!(report.to_string(), "Pizza $10\nhttps://trattoria.example/menu");
/// ```
pub fn aggregate<I>(results: I) -> MenuReport
where
    I: IntoIterator<Item = ClassificationResult>,
{
    let mut text = String::new();
    let mut source_urls = Vec::new();

    for result in results {
        text.push_str(result.text());
        if let ClassificationResult::Relevant { url, .. } = result {
            source_urls.push(url);
        }
    }

    MenuReport::Menu { text, source_urls }
}
