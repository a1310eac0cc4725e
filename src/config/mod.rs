//! Configuration module for wiki-lexicon
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section has defaults, so an absent file behaves like an empty one.
//!
//! # Example
//!
//! ```no_run
//! use wiki_lexicon::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("lexicon.toml")).unwrap();
//! println!("Listening on {}:{}", config.server.host, config.server.port);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, ServerConfig, SourceConfig, TraversalConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
