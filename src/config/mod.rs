//! Configuration module for lt24-dump
//!
//! Configuration comes from an optional TOML file, overridden by command line
//! flags, and is validated once both are merged.
//!
//! # Example
//!
//! ```no_run
//! use lt24_dump::config::{load_config, validate};
//! use std::path::Path;
//!
//! let mut config = load_config(Path::new("lt24.toml")).unwrap();
//! config.account.username = "alice".to_string();
//! validate(&config).unwrap();
//! ```

mod parser;
mod types;
pub(crate) mod validation;
mod verbosity;

// Re-export types
pub use types::{
    AccountConfig, Config, CrawlerConfig, OutputConfig, DEFAULT_SERVER_URL, DEFAULT_TRACK_FILE,
};
pub use verbosity::Verbosity;

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
