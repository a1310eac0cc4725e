//! Word frequency aggregation
//!
//! Merges the per-article word sequences of a crawl into a [`WordProfile`],
//! applying an ignore list and a percentile cutoff on the way.

mod aggregate;
mod percentile;
mod profile;

pub use aggregate::{aggregate, AggregateOptions, IgnoreList};
pub use percentile::{percentile_threshold, Percentile};
pub use profile::{RankedWord, WordProfile};
