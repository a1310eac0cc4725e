//! Profile service
//!
//! Ties the traversal engine to the frequency aggregator and exposes the two
//! operations offered to callers:
//! - `word_frequency`: counts over the unfiltered crawl
//! - `keywords`: counts after the ignore list and percentile cutoff
//!
//! Parameters are validated before any fetch happens, and a crawl that
//! produced no articles is reported as [`LexiconError::ArticleNotFound`].

use crate::article::ArticleId;
use crate::config::Config;
use crate::crawler::{
    build_crawler, ArticleSource, ContentExtractor, Crawler, MediaWikiSource, WikiHtmlExtractor,
};
use crate::frequency::{aggregate, AggregateOptions, IgnoreList, Percentile, WordProfile};
use crate::{LexiconError, Result};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Body of a keywords request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordsRequest {
    /// Title of the article to start from
    pub article: String,

    /// Link hops to follow from the start article
    pub depth: u32,

    /// Words to exclude, case-insensitively
    #[serde(default)]
    pub ignore_list: Option<Vec<String>>,

    /// Long-tail cutoff in `0..=100`; `0` keeps every word
    #[serde(default)]
    pub percentile: Option<u32>,
}

/// A validated profile request
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRequest {
    pub article: ArticleId,
    pub depth: u32,
    pub options: AggregateOptions,
}

impl ProfileRequest {
    /// Validates raw request parameters
    ///
    /// # Returns
    ///
    /// * `Ok(ProfileRequest)` - Every parameter is usable
    /// * `Err(LexiconError::InvalidParameter)` - Blank title, blank ignore
    ///   entry, or percentile outside `0..=100`
    pub fn new<I, W>(
        article: &str,
        depth: u32,
        ignore_list: I,
        percentile: u32,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        Ok(Self {
            article: ArticleId::new(article)?,
            depth,
            options: AggregateOptions::new(
                IgnoreList::new(ignore_list)?,
                Percentile::new(percentile)?,
            ),
        })
    }

    /// A request with no filtering
    pub fn unfiltered(article: &str, depth: u32) -> Result<Self> {
        Self::new(article, depth, std::iter::empty::<&str>(), 0)
    }
}

impl TryFrom<&KeywordsRequest> for ProfileRequest {
    type Error = LexiconError;

    fn try_from(request: &KeywordsRequest) -> std::result::Result<Self, Self::Error> {
        Self::new(
            &request.article,
            request.depth,
            request.ignore_list.iter().flatten(),
            request.percentile.unwrap_or(0),
        )
    }
}

/// Builds word profiles by crawling and aggregating
#[derive(Debug, Clone)]
pub struct ProfileService<S, E> {
    crawler: Crawler<S, E>,
    max_depth: Option<u32>,
}

impl ProfileService<MediaWikiSource, WikiHtmlExtractor> {
    /// Creates a service over the configured MediaWiki endpoint
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(build_crawler(config)?, config.traversal.max_depth))
    }
}

impl<S, E> ProfileService<S, E>
where
    S: ArticleSource,
    E: ContentExtractor,
{
    /// Creates a service; requests deeper than a non-zero `max_depth` are rejected
    pub fn new(crawler: Crawler<S, E>, max_depth: u32) -> Self {
        Self {
            crawler,
            max_depth: (max_depth > 0).then_some(max_depth),
        }
    }

    /// Counts and frequencies over every word of the crawl
    pub async fn word_frequency(&self, article: &str, depth: u32) -> Result<WordProfile> {
        let request = ProfileRequest::unfiltered(article, depth)?;
        self.profile(&request, &CancellationToken::new()).await
    }

    /// Counts and frequencies after the ignore list and percentile cutoff
    pub async fn keywords(&self, request: &KeywordsRequest) -> Result<WordProfile> {
        let request = ProfileRequest::try_from(request)?;
        self.profile(&request, &CancellationToken::new()).await
    }

    /// Runs one validated request, honoring `cancel` between fetches
    ///
    /// # Returns
    ///
    /// * `Ok(WordProfile)` - The aggregated profile
    /// * `Err(LexiconError::InvalidParameter)` - Depth above a configured maximum
    /// * `Err(LexiconError::ArticleNotFound)` - The crawl produced no articles
    /// * `Err(LexiconError)` - Cancellation or a start-article source failure
    pub async fn profile(
        &self,
        request: &ProfileRequest,
        cancel: &CancellationToken,
    ) -> Result<WordProfile> {
        if let Some(max) = self.max_depth {
            if request.depth > max {
                return Err(LexiconError::InvalidParameter(format!(
                    "depth must be at most {}, got {}",
                    max, request.depth
                )));
            }
        }

        let started = Instant::now();
        tracing::info!(
            "Profiling {} (depth {}, {} ignored words, percentile {})",
            request.article,
            request.depth,
            request.options.ignore_list.len(),
            request.options.percentile
        );

        let crawl = self
            .crawler
            .traverse_until_cancelled(&request.article, request.depth, cancel)
            .await?;

        if crawl.is_empty() {
            return Err(LexiconError::ArticleNotFound(request.article.to_string()));
        }

        let profile = aggregate(&crawl, &request.options);
        tracing::info!(
            "Profiled {}: {} articles, {} distinct words in {:?}",
            request.article,
            crawl.len(),
            profile.distinct_words(),
            started.elapsed()
        );

        Ok(profile)
    }
}
