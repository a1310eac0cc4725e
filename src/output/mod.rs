//! Output generation for word profiles
//!
//! This module handles presenting profiles to the user:
//! - A ranked table for the terminal
//! - Pretty-printed JSON in the same shape the HTTP API returns

mod stats;

pub use stats::{print_profile, render_profile, ProfileStatistics};

use crate::frequency::WordProfile;

/// Serializes a profile as pretty-printed JSON
pub fn profile_to_json(profile: &WordProfile) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(profile)
}
