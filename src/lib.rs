//! Menu-Scout: restaurant menu discovery
//!
//! This crate fetches a restaurant's home page, collects the links that stay on the
//! same host, asks a content-understanding service whether each linked page holds
//! menu items, and aggregates the extracted menus into one report.

pub mod config;
pub mod crawler;
pub mod output;
pub mod service;
pub mod url;

use thiserror::Error;

/// Main error type for Menu-Scout operations
#[derive(Debug, Error)]
pub enum MenuScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Menu-Scout operations
pub type Result<T> = std::result::Result<T, MenuScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::Coordinator;
pub use output::{aggregate, MenuReport};
pub use service::{ContentRequest, ContentService, GeminiClient};
pub use crate::url::{infer_content_kind, same_authority, ContentKind, CrawlTarget};
