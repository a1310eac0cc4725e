//! Depth-bounded article traversal
//!
//! The walk is depth-first and sequential: an article is fetched, its words
//! are recorded, and each of its links is walked to completion before the
//! next sibling is touched. The visited set and the result map live on the
//! stack of one `traverse` call, so concurrent calls never share state.

use crate::article::ArticleId;
use crate::crawler::fetcher::ArticleSource;
use crate::crawler::parser::ContentExtractor;
use crate::{LexiconError, Result, SourceError};
use std::collections::{HashMap, HashSet};
use std::vec::IntoIter;
use tokio_util::sync::CancellationToken;

/// Lowercase words of one article
pub type WordSequence = Vec<String>;

/// Words of every article that was fetched successfully
pub type CrawlResult = HashMap<ArticleId, WordSequence>;

/// Limits applied to a single traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalOptions {
    /// Stop visiting once this many fetches were attempted
    pub max_articles: Option<usize>,
}

impl TraversalOptions {
    /// Builds options from the config convention where `0` means unlimited
    pub fn with_max_articles(max_articles: usize) -> Self {
        Self {
            max_articles: (max_articles > 0).then_some(max_articles),
        }
    }
}

/// Outcome of one attempted visit
enum Visit {
    /// Fetched; carries the links to walk next (empty at the depth limit)
    Fetched(Vec<ArticleId>),
    /// Already in the visited set
    Skipped,
    /// Fetch failed; the article stays visited but has no entry
    Failed(SourceError),
    /// The article budget is spent
    Exhausted,
}

/// Pending links of an article on the current DFS path
struct Frame {
    links: IntoIter<ArticleId>,
    depth: u32,
}

/// Per-call traversal state
#[derive(Default)]
struct Walk {
    visited: HashSet<ArticleId>,
    result: CrawlResult,
    attempts: usize,
}

/// Walks the article graph through an [`ArticleSource`] and a [`ContentExtractor`]
#[derive(Debug, Clone)]
pub struct Crawler<S, E> {
    source: S,
    extractor: E,
    options: TraversalOptions,
}

impl<S, E> Crawler<S, E>
where
    S: ArticleSource,
    E: ContentExtractor,
{
    pub fn new(source: S, extractor: E) -> Self {
        Self::with_options(source, extractor, TraversalOptions::default())
    }

    pub fn with_options(source: S, extractor: E, options: TraversalOptions) -> Self {
        Self {
            source,
            extractor,
            options,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Collects the words of `start` and every article within `depth` hops
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlResult)` - One entry per article fetched; empty when the
    ///   start article does not exist
    /// * `Err(LexiconError::Source)` - The start article failed for a reason
    ///   other than not existing
    ///
    /// Failures below the start article are logged and skipped.
    pub async fn traverse(&self, start: &ArticleId, depth: u32) -> Result<CrawlResult> {
        self.traverse_until_cancelled(start, depth, &CancellationToken::new())
            .await
    }

    /// Like [`Crawler::traverse`], checking `cancel` before every fetch
    ///
    /// Returns `Err(LexiconError::Cancelled)` once the token fires.
    pub async fn traverse_until_cancelled(
        &self,
        start: &ArticleId,
        depth: u32,
        cancel: &CancellationToken,
    ) -> Result<CrawlResult> {
        let mut walk = Walk::default();
        let mut stack: Vec<Frame> = Vec::new();

        match self.visit(start, 0, depth, &mut walk, cancel).await? {
            Visit::Fetched(links) => stack.push(Frame {
                links: links.into_iter(),
                depth: 0,
            }),
            Visit::Failed(err) if err.is_not_found() => {
                tracing::info!("Start article {} not found", start);
                return Ok(CrawlResult::new());
            }
            Visit::Failed(err) => return Err(err.into()),
            Visit::Skipped | Visit::Exhausted => {}
        }

        while let Some(frame) = stack.last_mut() {
            let parent_depth = frame.depth;
            let Some(link) = frame.links.next() else {
                stack.pop();
                continue;
            };

            if walk.visited.contains(&link) {
                continue;
            }

            let child_depth = parent_depth + 1;
            match self.visit(&link, child_depth, depth, &mut walk, cancel).await? {
                Visit::Fetched(links) => stack.push(Frame {
                    links: links.into_iter(),
                    depth: child_depth,
                }),
                Visit::Failed(err) => {
                    tracing::warn!("Skipping {} at depth {}: {}", link, child_depth, err);
                }
                Visit::Skipped => {}
                Visit::Exhausted => {
                    tracing::info!(
                        "Article budget of {} reached, stopping traversal",
                        walk.attempts
                    );
                    break;
                }
            }
        }

        tracing::debug!(
            "Traversal from {} finished: {} visited, {} fetched",
            start,
            walk.visited.len(),
            walk.result.len()
        );

        Ok(walk.result)
    }

    /// Visits one article: marks it, fetches it, records its words
    async fn visit(
        &self,
        id: &ArticleId,
        current_depth: u32,
        depth: u32,
        walk: &mut Walk,
        cancel: &CancellationToken,
    ) -> Result<Visit> {
        if cancel.is_cancelled() {
            return Err(LexiconError::Cancelled);
        }

        if let Some(max) = self.options.max_articles {
            if walk.attempts >= max {
                return Ok(Visit::Exhausted);
            }
        }

        if !walk.visited.insert(id.clone()) {
            return Ok(Visit::Skipped);
        }
        walk.attempts += 1;

        let markup = match self.source.fetch(id).await {
            Ok(markup) => markup,
            Err(err) => return Ok(Visit::Failed(err)),
        };

        let expand = current_depth < depth;
        let extracted = self.extractor.extract(&markup, expand);
        tracing::debug!(
            "Visited {} at depth {}: {} words, {} links",
            id,
            current_depth,
            extracted.words.len(),
            extracted.links.len()
        );

        walk.result.insert(id.clone(), extracted.words);
        Ok(Visit::Fetched(extracted.links))
    }
}
