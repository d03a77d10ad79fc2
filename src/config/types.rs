use serde::Deserialize;
use std::path::PathBuf;

/// Default LiveTrack24 server
pub const DEFAULT_SERVER_URL: &str = "https://www.livetrack24.com";

/// Default path used when the track file flag is given without a value
pub const DEFAULT_TRACK_FILE: &str = "track_ids.yaml";

/// Main configuration structure for lt24-dump
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub account: AccountConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
}

/// Account whose tracks are dumped
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AccountConfig {
    /// Account name, also used as the output file prefix
    pub username: String,

    /// Password; when present the crawl runs in a logged-in session
    pub password: Option<String>,
}

/// Crawl and HTTP behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Base URL of the tracking service
    pub server_url: String,

    /// Highest listing page that will be fetched (inclusive)
    pub max_pages: u32,

    /// How long to wait for the login submission to land on a new page
    pub login_timeout_secs: u64,

    /// Per-request timeout
    pub request_timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            max_pages: 200,
            login_timeout_secs: 15,
            request_timeout_secs: 30,
            user_agent: format!("lt24-dump/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Where ids and tracks are written
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory receiving the `.igc` files
    pub output_dir: PathBuf,

    /// Track id cache; `None` disables caching
    pub track_file: Option<PathBuf>,

    /// Maximum number of downloads in flight
    pub concurrency: usize,

    /// Show a progress bar during downloads
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("tracks"),
            track_file: None,
            concurrency: 4,
            show_progress: true,
        }
    }
}
