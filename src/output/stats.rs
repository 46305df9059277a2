//! Statistics over one crawl's classification results

use crate::crawler::ClassificationResult;
use std::fmt;

/// Per-outcome counts for one discovery run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Same-host links that were classified
    pub links_classified: usize,

    /// Links that produced menu text
    pub relevant: usize,

    /// Links the relevance stage rejected
    pub not_relevant: usize,

    /// Links whose service calls failed
    pub failed: usize,
}

impl CrawlStatistics {
    /// Counts outcomes in a result set
    pub fn from_results(results: &[ClassificationResult]) -> Self {
        let mut stats = Self {
            links_classified: results.len(),
            ..Self::default()
        };

        for result in results {
            match result {
                ClassificationResult::Relevant { .. } => stats.relevant += 1,
                ClassificationResult::NotRelevant => stats.not_relevant += 1,
                ClassificationResult::FetchError { .. } => stats.failed += 1,
            }
        }

        stats
    }
}

impl fmt::Display for CrawlStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} links classified: {} with menus, {} without, {} failed",
            self.links_classified, self.relevant, self.not_relevant, self.failed
        )
    }
}
