//! lt24-dump: bulk export of IGC tracks from LiveTrack24
//!
//! This crate enumerates every track id owned by an account by crawling the
//! account's paginated track listing, optionally caches the discovered ids,
//! and downloads one IGC file per id into a local directory.

pub mod config;
pub mod crawler;
pub mod downloader;
pub mod orchestrator;
pub mod output;
pub mod session;
pub mod state;
pub mod storage;
pub mod track;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lt24-dump operations
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Track cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while logging in to the remote service
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Login for '{username}' was rejected: still on {url} after submitting credentials")]
    Rejected { username: String, url: String },

    #[error("Login did not complete within {seconds}s")]
    Timeout { seconds: u64 },

    #[error("No login form found on {url}")]
    FormNotFound { url: String },

    #[error("Failed to load login page: {0}")]
    Fetch(#[from] FetchError),
}

/// Transport-level failures of a page or artifact request
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read response body from {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

/// Per-track download failures; these never abort a run
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors reading or writing the track id cache
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to read track cache {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse track cache {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Track cache {path} contains an invalid track id: {id:?}")]
    InvalidId { path: PathBuf, id: String },

    #[error("Failed to write track cache {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize track cache: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Result type alias for lt24-dump operations
pub type Result<T> = std::result::Result<T, DumpError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use orchestrator::{run_dump, Orchestrator};
pub use output::DumpSummary;
pub use state::{CrawlState, DoneReason};
pub use track::{DownloadTask, TrackId, TrackIdSet};
