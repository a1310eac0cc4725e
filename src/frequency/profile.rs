use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Word counts and their percentage share
///
/// Serializes as `{"word_count": {...}, "word_frequency": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordProfile {
    /// Occurrences per word after filtering
    pub word_count: BTreeMap<String, u64>,

    /// Share of each word in percent; sums to 100 unless empty
    pub word_frequency: BTreeMap<String, f64>,
}

/// One row of a ranked profile
#[derive(Debug, Clone, PartialEq)]
pub struct RankedWord<'a> {
    pub word: &'a str,
    pub count: u64,
    pub frequency: f64,
}

impl WordProfile {
    /// Builds a profile from counts, deriving the percentages
    pub fn from_counts(word_count: BTreeMap<String, u64>) -> Self {
        let total: u64 = word_count.values().sum();
        let word_frequency = if total == 0 {
            BTreeMap::new()
        } else {
            word_count
                .iter()
                .map(|(word, &count)| (word.clone(), count as f64 / total as f64 * 100.0))
                .collect()
        };

        Self {
            word_count,
            word_frequency,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.word_count.is_empty()
    }

    /// Number of distinct words
    pub fn distinct_words(&self) -> usize {
        self.word_count.len()
    }

    /// Sum of all counts
    pub fn total_words(&self) -> u64 {
        self.word_count.values().sum()
    }

    /// The `n` most frequent words, ties broken alphabetically
    pub fn top(&self, n: usize) -> Vec<RankedWord<'_>> {
        let mut ranked: Vec<RankedWord<'_>> = self
            .word_count
            .iter()
            .map(|(word, &count)| RankedWord {
                word,
                count,
                frequency: self.word_frequency.get(word).copied().unwrap_or(0.0),
            })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(b.word)));
        ranked.truncate(n);
        ranked
    }
}
