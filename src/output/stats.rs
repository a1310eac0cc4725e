//! Profile summaries for the terminal
//!
//! This module provides functionality for summarizing and displaying
//! a word profile on stdout.

use crate::frequency::WordProfile;
use std::fmt::Write;

/// Summary figures of a word profile
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStatistics {
    /// Number of distinct words kept
    pub distinct_words: usize,

    /// Sum of all kept word counts
    pub total_words: u64,

    /// Share of the single most frequent word
    pub top_share: f64,
}

impl ProfileStatistics {
    pub fn from_profile(profile: &WordProfile) -> Self {
        let top_share = profile
            .word_frequency
            .values()
            .copied()
            .fold(0.0_f64, f64::max);

        Self {
            distinct_words: profile.distinct_words(),
            total_words: profile.total_words(),
            top_share,
        }
    }
}

/// Renders the header and the `top` most frequent words as a table
///
/// # Arguments
///
/// * `article` - The start article, for the header
/// * `profile` - The profile to display
/// * `top` - Maximum number of rows
pub fn render_profile(article: &str, profile: &WordProfile, top: usize) -> String {
    let stats = ProfileStatistics::from_profile(profile);
    let mut out = String::new();

    let _ = writeln!(out, "=== Word Profile: {} ===\n", article);
    let _ = writeln!(out, "Overview:");
    let _ = writeln!(out, "  Distinct words: {}", stats.distinct_words);
    let _ = writeln!(out, "  Total words counted: {}", stats.total_words);
    let _ = writeln!(out, "  Top word share: {:.2}%", stats.top_share);
    let _ = writeln!(out);

    if profile.is_empty() {
        let _ = writeln!(out, "No words left after filtering.");
        return out;
    }

    let rows = profile.top(top);
    let width = rows.iter().map(|r| r.word.len()).max().unwrap_or(4).max(4);

    let _ = writeln!(out, "Top {} words:", rows.len());
    let _ = writeln!(out, "  {:<width$}  {:>8}  {:>8}", "Word", "Count", "Share", width = width);
    for row in rows {
        let _ = writeln!(
            out,
            "  {:<width$}  {:>8}  {:>7.2}%",
            row.word,
            row.count,
            row.frequency,
            width = width
        );
    }

    out
}

/// Prints the profile table to stdout
pub fn print_profile(article: &str, profile: &WordProfile, top: usize) {
    print!("{}", render_profile(article, profile, top));
}
