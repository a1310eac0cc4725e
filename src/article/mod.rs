//! Article identifiers
//!
//! Titles arrive from users ("Rust (programming language)") and from hrefs
//! ("Rust_(programming_language)"). Both are folded into one canonical form so
//! the visited set and the crawl result agree on identity.

use crate::{LexiconError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Canonical identifier of an encyclopedia article
///
/// Whitespace runs become a single `_` and surrounding whitespace is dropped.
/// Comparison is exact and case-sensitive after that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ArticleId(String);

impl ArticleId {
    /// Normalizes a raw title into an identifier
    ///
    /// # Returns
    ///
    /// * `Ok(ArticleId)` - The normalized identifier
    /// * `Err(LexiconError::InvalidParameter)` - The title is blank
    ///
    /// # Example
    ///
    /// ```
    /// use wiki_lexicon::ArticleId;
    ///
    /// let id = ArticleId::new("  Rust (programming  language) ").unwrap();
    /// assert_eq!(id.as_str(), "Rust_(programming_language)");
    /// ```
    pub fn new(raw: &str) -> Result<Self> {
        let normalized = normalize_title(raw);
        if normalized.is_empty() {
            return Err(LexiconError::InvalidParameter(
                "article title cannot be empty".to_string(),
            ));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Replaces every whitespace run (and `_` run) with a single underscore
pub fn normalize_title(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArticleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ArticleId {
    type Err = LexiconError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::new(s)
    }
}
