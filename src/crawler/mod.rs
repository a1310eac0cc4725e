//! Crawler module for article fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - The article source capability and its MediaWiki HTTP implementation
//! - HTML content extraction (words and article links)
//! - Depth-bounded, cycle-safe traversal of the article graph

mod fetcher;
mod parser;
mod traversal;

pub use fetcher::{build_http_client, user_agent_string, ArticleSource, MediaWikiSource};
pub use parser::{
    article_from_href, tokenize, ContentExtractor, ExtractedArticle, WikiHtmlExtractor,
};
pub use traversal::{CrawlResult, Crawler, TraversalOptions, WordSequence};

use crate::config::{validate, Config};
use crate::Result;

/// Builds a crawler over the configured MediaWiki endpoint
///
/// # Arguments
///
/// * `config` - The full configuration (source, user agent, traversal limits)
///
/// # Returns
///
/// * `Ok(Crawler)` - Ready to traverse
/// * `Err(LexiconError::Config)` - The configuration does not validate
/// * `Err(LexiconError)` - The HTTP client could not be built
pub fn build_crawler(config: &Config) -> Result<Crawler<MediaWikiSource, WikiHtmlExtractor>> {
    validate(config)?;
    let source = MediaWikiSource::new(&config.source, &config.user_agent)?;
    let options = TraversalOptions::with_max_articles(config.traversal.max_articles);
    Ok(Crawler::with_options(source, WikiHtmlExtractor::new(), options))
}
