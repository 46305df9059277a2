//! Crawler coordinator - menu discovery orchestration
//!
//! This module contains the discovery run that coordinates:
//! - Fetching the root page
//! - Extracting same-host links
//! - Classifying every link on a bounded worker pool
//! - Aggregating results into the final report

use crate::config::{validate, Config};
use crate::crawler::classifier::{ClassificationResult, MenuClassifier};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::{extract_links, LinkSet};
use crate::output::{aggregate, CrawlStatistics, MenuReport};
use crate::service::ContentService;
use crate::url::CrawlTarget;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Hops followed from the root page
///
/// Links are collected from the root page only; pages found there are classified
/// but never scanned for further links.
pub const MAX_DEPTH: u32 = 1;

const ROOT_DEPTH: u32 = 0;

/// Main discovery coordinator
///
/// Holds only injected collaborators and settings; every call to
/// [`Coordinator::discover_menu`] is an independent, stateless run.
pub struct Coordinator {
    fetcher: PageFetcher,
    classifier: MenuClassifier,
    max_concurrent: usize,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - Crawler, user agent and timeout settings
    /// * `service` - The content-understanding service used for classification
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(MenuScoutError)` - The configuration is invalid or the HTTP client could not
    ///   be built
    pub fn new(config: &Config, service: Arc<dyn ContentService>) -> crate::Result<Self> {
        validate(config)?;
        let fetcher = PageFetcher::from_config(config)?;
        let classifier = MenuClassifier::new(
            service,
            Duration::from_secs(config.crawler.classify_timeout_secs),
        );

        Ok(Self {
            fetcher,
            classifier,
            max_concurrent: config.crawler.max_concurrent_classifications as usize,
        })
    }

    /// Bound on classifications in flight
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Discovers the menu published under `root_url`
    ///
    /// 1. Fetch the root page; on failure return [`MenuReport::Unreachable`]
    /// 2. Extract same-host links from it
    /// 3. Classify every link concurrently, at most `max_concurrent` at a time
    /// 4. Wait for all of them, then aggregate in completion order
    ///
    /// Per-link failures never abort the run; they contribute nothing to the report.
    /// The report's `Display` form is the single string handed back to callers.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use menu_scout::config::Config;
    /// use menu_scout::crawler::Coordinator;
    /// use menu_scout::service::GeminiClient;
    /// use std::sync::Arc;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = Config::default();
    /// let service = Arc::new(GeminiClient::from_config(&config.content_service)?);
    /// let coordinator = Coordinator::new(&config, service)?;
    /// let menu = coordinator.discover_menu("https://trattoria.example/").await.to_string();
    /// println!("{}", menu);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn discover_menu(&self, root_url: &str) -> MenuReport {
        tracing::info!("Finding internal links for URL: {}", root_url);

        let root = match Url::parse(root_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Invalid root URL {}: {}", root_url, e);
                return MenuReport::unreachable(root_url, format!("invalid URL: {}", e));
            }
        };

        let page = match self.fetcher.fetch(&root).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("Request failed for {}: {}", e.url(), e);
                return MenuReport::unreachable(root_url, e);
            }
        };

        if !page.is_html() {
            tracing::debug!(
                "Root page {} is labelled {:?}; scanning for links anyway",
                root_url,
                page.content_type
            );
        }

        // Links resolve against the requested URL, not the post-redirect one
        let links = extract_links(&page.text(), &root);
        tracing::info!("Found {} internal links for {}.", links.len(), root_url);

        let targets = plan_targets(links, ROOT_DEPTH + 1);
        let results = self.classify_all(targets).await;

        tracing::info!("{}: {}", root_url, CrawlStatistics::from_results(&results));
        aggregate(results)
    }

    /// Classifies every target on the worker pool and waits for all of them
    async fn classify_all(&self, targets: Vec<CrawlTarget>) -> Vec<ClassificationResult> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks = JoinSet::new();
        let total = targets.len();

        for target in targets {
            let classifier = self.classifier.clone();
            let semaphore = semaphore.clone();

            tasks.spawn(async move {
                // The semaphore is never closed, so acquisition only fails on shutdown
                let _permit = semaphore.acquire_owned().await.ok();
                classifier.classify_and_extract(&target).await
            });
        }

        let mut results = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                // A panicked task contributes nothing, like any other failed link
                Err(e) => tracing::warn!("Classification task aborted: {}", e),
            }
        }

        tracing::debug!("{} of {} classifications completed", results.len(), total);
        results
    }
}

/// Turns a link set into crawl targets at `depth`
///
/// Links beyond [`MAX_DEPTH`] are dropped.
fn plan_targets(links: LinkSet, depth: u32) -> Vec<CrawlTarget> {
    if depth > MAX_DEPTH {
        tracing::debug!("Not following {} links at depth {}", links.len(), depth);
        return Vec::new();
    }

    links
        .into_iter()
        .map(|url| CrawlTarget::new(url, depth))
        .collect()
}
