//! HTTP fetcher implementation
//!
//! This module retrieves raw page content for the crawler:
//! - Building the HTTP client with a browser user agent and per-call timeouts
//! - GET requests that follow redirects
//! - Mapping transport failures and non-2xx statuses to [`FetchError`]

use crate::config::Config;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Why a page could not be retrieved
///
/// The display text describes the cause only; the URL is kept as a field so callers
/// can word their own diagnostics.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not complete within the fetch timeout
    #[error("request timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    /// The server answered with a non-2xx status
    #[error("HTTP status {status}")]
    Status { url: String, status: u16 },

    /// Connection, TLS, DNS, redirect or body read failure
    #[error("{message}")]
    Network { url: String, message: String },
}

impl FetchError {
    /// The URL that failed
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url, .. } | Self::Status { url, .. } | Self::Network { url, .. } => {
                url
            }
        }
    }
}

/// A successfully retrieved page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Content-Type header value, if any
    pub content_type: Option<String>,
    /// Raw body bytes
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Returns true when the server labelled the body as HTML (or gave no label)
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.to_ascii_lowercase().contains("html"))
            .unwrap_or(true)
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The User-Agent header sent with every request
/// * `timeout` - Overall timeout for one request
///
/// # Example
///
/// ```no_run
/// use menu_scout::config::DEFAULT_USER_AGENT;
/// use menu_scout::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(DEFAULT_USER_AGENT, Duration::from_secs(20)).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Retrieves pages over plain HTTP(S); holds no state besides its client
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
    timeout_secs: u64,
}

impl PageFetcher {
    /// Creates a fetcher with the given user agent and per-request timeout
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent, timeout)?,
            timeout_secs: timeout.as_secs(),
        })
    }

    /// Creates a fetcher from the `[user-agent]` and `[crawler]` sections
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            &config.user_agent.value,
            Duration::from_secs(config.crawler.fetch_timeout_secs),
        )
    }

    /// Fetches a URL with a single GET
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx | `Ok(FetchedPage)` |
    /// | Any other status | `FetchError::Status` |
    /// | Timeout | `FetchError::Timeout` |
    /// | Connection, TLS, redirect or body error | `FetchError::Network` |
    ///
    /// No retries are attempted.
    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.classify_error(url, e))?;

        let status = response.status();

        if !status.is_success() {
            tracing::debug!("{} returned HTTP {}", url, status);
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| self.classify_error(url, e))?;

        Ok(FetchedPage {
            content_type,
            body: body.to_vec(),
        })
    }

    fn classify_error(&self, url: &Url, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                secs: self.timeout_secs,
            }
        } else if e.is_connect() {
            FetchError::Network {
                url: url.to_string(),
                message: format!("connection failed: {}", e),
            }
        } else {
            FetchError::Network {
                url: url.to_string(),
                message: e.to_string(),
            }
        }
    }
}
