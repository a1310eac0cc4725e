use crate::crawler::CrawlResult;
use crate::frequency::percentile::{percentile_threshold, Percentile};
use crate::frequency::profile::WordProfile;
use crate::{LexiconError, Result};
use std::collections::{BTreeMap, HashSet};

/// Case-insensitive set of words to drop before counting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList(HashSet<String>);

impl IgnoreList {
    /// Builds an ignore list, lowercasing and trimming every entry
    ///
    /// # Returns
    ///
    /// * `Ok(IgnoreList)` - All entries normalized
    /// * `Err(LexiconError::InvalidParameter)` - An entry is blank
    pub fn new<I, W>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let mut set = HashSet::new();
        for word in words {
            let normalized = word.as_ref().trim().to_lowercase();
            if normalized.is_empty() {
                return Err(LexiconError::InvalidParameter(
                    "ignore_list entries cannot be blank".to_string(),
                ));
            }
            set.insert(normalized);
        }
        Ok(Self(set))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if `word` matches an entry, ignoring case
    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(&word.to_lowercase())
    }
}

/// Filters applied by [`aggregate`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateOptions {
    pub ignore_list: IgnoreList,
    pub percentile: Percentile,
}

impl AggregateOptions {
    pub fn new(ignore_list: IgnoreList, percentile: Percentile) -> Self {
        Self {
            ignore_list,
            percentile,
        }
    }
}

/// Merges the words of a crawl into counts and percentages
///
/// # Steps
///
/// 1. Flatten the word sequences of every article
/// 2. Drop words on the ignore list (before counting)
/// 3. Count occurrences
/// 4. If the percentile is non-zero, keep only words whose count is at least
///    the interpolated percentile of all count values (ties kept)
/// 5. Convert the remaining counts to percentages of their total
///
/// # Example
///
/// ```
/// use wiki_lexicon::{aggregate, AggregateOptions, ArticleId, CrawlResult};
///
/// let mut crawl = CrawlResult::new();
/// crawl.insert(ArticleId::new("A").unwrap(), vec!["x".into(), "y".into(), "x".into()]);
/// crawl.insert(ArticleId::new("B").unwrap(), vec!["y".into(), "z".into()]);
///
/// let profile = aggregate(&crawl, &AggregateOptions::default());
/// assert_eq!(profile.word_count["x"], 2);
/// assert!((profile.word_frequency["z"] - 20.0).abs() < 1e-9);
/// ```
pub fn aggregate(crawl: &CrawlResult, options: &AggregateOptions) -> WordProfile {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();

    let words = crawl.values().flatten();
    for word in words {
        if !options.ignore_list.is_empty() && options.ignore_list.contains(word) {
            continue;
        }
        *counts.entry(word.clone()).or_insert(0) += 1;
    }

    if !options.percentile.is_disabled() {
        let values: Vec<u64> = counts.values().copied().collect();
        if let Some(threshold) = percentile_threshold(&values, options.percentile) {
            counts.retain(|_, count| *count as f64 >= threshold);
        }
    }

    WordProfile::from_counts(counts)
}
