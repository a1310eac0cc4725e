//! wiki-lexicon: topic word-frequency profiles from an encyclopedia link graph
//!
//! This crate crawls MediaWiki articles depth-first from a starting article,
//! collects the words of every visited article, and turns them into word
//! counts and percentage frequencies, optionally filtered by an ignore list
//! and a percentile cutoff.

pub mod api;
pub mod article;
pub mod config;
pub mod crawler;
pub mod frequency;
pub mod output;
pub mod service;

use thiserror::Error;

/// Main error type for wiki-lexicon operations
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Article '{0}' not found or no content available")]
    ArticleNotFound(String),

    #[error("Traversal cancelled")]
    Cancelled,

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

/// Failures reported by an article source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Article '{id}' not found: {info}")]
    NotFound { id: String, info: String },

    #[error("Unexpected HTTP status {status} fetching '{id}'")]
    Status { id: String, status: u16 },

    #[error("HTTP error fetching '{id}': {source}")]
    Http { id: String, source: reqwest::Error },

    #[error("Unexpected response for '{id}': {message}")]
    UnexpectedResponse { id: String, message: String },
}

impl SourceError {
    /// Returns true when the source positively reported the article missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias for wiki-lexicon operations
pub type Result<T> = std::result::Result<T, LexiconError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use article::ArticleId;
pub use config::Config;
pub use crawler::{ArticleSource, ContentExtractor, CrawlResult, Crawler};
pub use frequency::{aggregate, AggregateOptions, IgnoreList, Percentile, WordProfile};
pub use service::ProfileService;
