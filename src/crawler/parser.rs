//! HTML content extraction
//!
//! This module turns the rendered HTML of an article into:
//! - The lowercase words of its body text
//! - The encyclopedia articles it links to
//!
//! Markup without a `div.mw-parser-output` content root is treated as
//! malformed and yields no words and no links.

use crate::article::ArticleId;
use percent_encoding::percent_decode_str;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashSet;
use std::sync::OnceLock;

/// Content root produced by the MediaWiki parser
const CONTENT_ROOT: &str = "div.mw-parser-output";

/// Subtrees whose text never counts as article prose
const EXCLUDED_TEXT: &str = "table, .reference, .mw-editsection, .mw-headline, script, style";

/// Path prefix of same-site article links
const ARTICLE_PATH: &str = "/wiki/";

/// Words and outbound links of one article
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedArticle {
    /// Lowercase alphabetic tokens in document order
    pub words: Vec<String>,

    /// Linked articles in document order, without duplicates
    pub links: Vec<ArticleId>,
}

/// Turns raw article markup into words and links
pub trait ContentExtractor: Send + Sync {
    fn extract_words(&self, markup: &str) -> Vec<String>;

    fn extract_links(&self, markup: &str) -> Vec<ArticleId>;

    /// Extracts words, and links only when `with_links` is set
    ///
    /// Implementations that parse markup should override this to parse once.
    fn extract(&self, markup: &str, with_links: bool) -> ExtractedArticle {
        ExtractedArticle {
            words: self.extract_words(markup),
            links: if with_links {
                self.extract_links(markup)
            } else {
                Vec::new()
            },
        }
    }
}

/// Extractor for HTML rendered by the MediaWiki parse API
#[derive(Debug, Clone, Copy, Default)]
pub struct WikiHtmlExtractor;

impl WikiHtmlExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ContentExtractor for WikiHtmlExtractor {
    fn extract_words(&self, markup: &str) -> Vec<String> {
        let document = Html::parse_document(markup);
        content_root(&document)
            .map(words_in)
            .unwrap_or_default()
    }

    fn extract_links(&self, markup: &str) -> Vec<ArticleId> {
        let document = Html::parse_document(markup);
        content_root(&document)
            .map(links_in)
            .unwrap_or_default()
    }

    fn extract(&self, markup: &str, with_links: bool) -> ExtractedArticle {
        let document = Html::parse_document(markup);
        let Some(root) = content_root(&document) else {
            tracing::debug!("No content root in markup, treating article as empty");
            return ExtractedArticle::default();
        };

        ExtractedArticle {
            words: words_in(root),
            links: if with_links { links_in(root) } else { Vec::new() },
        }
    }
}

/// Finds the first content root element
fn content_root(document: &Html) -> Option<ElementRef<'_>> {
    let selector = Selector::parse(CONTENT_ROOT).ok()?;
    document.select(&selector).next()
}

fn citation_marker() -> &'static Regex {
    static CITATION: OnceLock<Regex> = OnceLock::new();
    CITATION.get_or_init(|| Regex::new(r"\[\d+\]").expect("citation pattern is valid"))
}

fn whitespace_run() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

fn word_token() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\b[a-zA-Z]+\b").expect("word pattern is valid"))
}

/// Collects the prose words under `root`
fn words_in(root: ElementRef<'_>) -> Vec<String> {
    let mut text = String::new();
    match Selector::parse(EXCLUDED_TEXT) {
        Ok(excluded) => collect_text(root, &excluded, &mut text),
        Err(_) => text.extend(root.text()),
    }

    tokenize(&text)
}

/// Appends the text below `element`, skipping excluded subtrees
fn collect_text(element: ElementRef<'_>, excluded: &Selector, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    if !excluded.matches(&child_element) {
                        collect_text(child_element, excluded, out);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Splits prose into lowercase alphabetic tokens
///
/// Citation markers are removed first, so `word[1]s` reads as `words`.
/// A letter run glued to digits, `_` or non-ASCII letters is not a word.
pub fn tokenize(text: &str) -> Vec<String> {
    let text = citation_marker().replace_all(text, "");
    let text = whitespace_run().replace_all(&text, " ").to_lowercase();

    word_token()
        .find_iter(&text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Collects the distinct article links under `root`
fn links_in(root: ElementRef<'_>) -> Vec<ArticleId> {
    let Ok(anchor) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    root.select(&anchor)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(article_from_href)
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Maps an href to an article identifier
///
/// Returns None if the link should be excluded:
/// - anything not under `/wiki/` (external, protocol-relative, `/w/index.php`)
/// - namespaced pages (`File:`, `Category:`, `Help:`, ...)
/// - hrefs that do not decode to UTF-8 or decode to a blank title
pub fn article_from_href(href: &str) -> Option<ArticleId> {
    let rest = href.trim().strip_prefix(ARTICLE_PATH)?;
    if rest.contains(':') {
        return None;
    }

    let title = rest.split('#').next().unwrap_or_default();
    let decoded = percent_decode_str(title).decode_utf8().ok()?;
    if decoded.contains(':') {
        return None;
    }

    ArticleId::new(&decoded).ok()
}
