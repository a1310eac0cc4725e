use crate::{LexiconError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A percentile rank in `0..=100`
///
/// `0` disables percentile filtering altogether.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Percentile(u8);

impl Percentile {
    pub const DISABLED: Self = Self(0);

    /// Validates a raw percentile
    ///
    /// # Returns
    ///
    /// * `Ok(Percentile)` - `value` is within `0..=100`
    /// * `Err(LexiconError::InvalidParameter)` - Out of range; never clamped
    pub fn new(value: u32) -> Result<Self> {
        match u8::try_from(value) {
            Ok(rank) if rank <= 100 => Ok(Self(rank)),
            _ => Err(LexiconError::InvalidParameter(format!(
                "percentile must be between 0 and 100, got {}",
                value
            ))),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_disabled(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u32> for Percentile {
    type Error = LexiconError;

    fn try_from(value: u32) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percentile> for u32 {
    fn from(p: Percentile) -> Self {
        u32::from(p.0)
    }
}

impl fmt::Display for Percentile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Percentile of `values` by linear interpolation between closest ranks
///
/// The values are sorted and the result is interpolated at position
/// `p / 100 * (n - 1)`, the conventional definition used by numeric
/// libraries. Returns None when `values` is empty.
pub fn percentile_threshold(values: &[u64], percentile: Percentile) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let position = f64::from(percentile.value()) / 100.0 * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let low = sorted[lower] as f64;
    let high = sorted[upper] as f64;

    Some(low + (high - low) * (position - lower as f64))
}
