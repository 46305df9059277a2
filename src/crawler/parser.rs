//! HTML parser for same-host link extraction
//!
//! This module parses a fetched page and yields the set of `<a href>` targets
//! that stay on the page's own network authority.

use crate::url::same_authority;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Deduplicated absolute URLs sharing the base page's authority
pub type LinkSet = HashSet<Url>;

/// Extracts all same-host links from an HTML document
///
/// # Link Extraction Rules
///
/// - Every `<a href="...">` is resolved against `base_url`; relative,
///   protocol-relative and absolute forms are all accepted
/// - A resolved URL is kept only if its host (and explicit port) equals the base URL's
/// - Anchors whose href cannot be resolved are skipped without affecting the others
/// - Fragments and queries are kept as written
///
/// A page with no anchors, or one the parser cannot make sense of, yields an empty set.
///
/// # Example
///
/// ```
/// use menu_scout::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/menu">Menu</a><a href="https://other.example/">Elsewhere</a>"#;
/// let base_url = Url::parse("https://trattoria.example/").unwrap();
/// let links = extract_links(html, &base_url);
/// assert_eq!(links.len(), 1);
/// assert!(links.contains(&Url::parse("https://trattoria.example/menu").unwrap()));
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> LinkSet {
    let document = Html::parse_document(html);
    let mut links = LinkSet::new();

    let a_selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return links,
    };

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        match resolve_link(href, base_url) {
            Some(absolute_url) if same_authority(&absolute_url, base_url) => {
                links.insert(absolute_url);
            }
            Some(absolute_url) => {
                tracing::trace!("Skipping off-site link {}", absolute_url);
            }
            None => {
                tracing::trace!("Skipping unresolvable href '{}'", href);
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL
///
/// Returns None when the href cannot be joined onto the base URL.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    base_url.join(href.trim()).ok()
}
