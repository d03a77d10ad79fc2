//! Dump orchestration
//!
//! A dump runs in two phases:
//!
//! 1. Discovery: load the id cache, or open a session (logging in when a
//!    password is configured), crawl the listing and cache the result
//! 2. Download: fetch every id into the output directory, continuing past
//!    individual failures

use crate::config::{validate, Config};
use crate::crawler::{
    CrawlController, CrawlOutcome, RecordExtractor, SessionPageFetcher, TrackGridExtractor,
};
use crate::downloader::Downloader;
use crate::output::{download_progress, DumpSummary};
use crate::session::{HttpSessionProvider, SessionProvider};
use crate::storage::TrackCache;
use crate::url::Endpoints;
use crate::DumpError;

/// Wires session, crawl and downloads together for one account
pub struct Orchestrator<P, E> {
    config: Config,
    endpoints: Endpoints,
    provider: P,
    extractor: E,
    controller: CrawlController,
    downloader: Downloader,
}

impl<P, E> Orchestrator<P, E>
where
    P: SessionProvider,
    E: RecordExtractor,
{
    /// Creates an orchestrator
    ///
    /// The configuration is validated here, before any network activity.
    pub fn new(config: Config, provider: P, extractor: E) -> crate::Result<Self> {
        validate(&config)?;

        let endpoints = Endpoints::new(&config.crawler.server_url)?;
        let downloader = Downloader::new(&config.crawler)?;
        let cache = config.output.track_file.as_ref().map(TrackCache::new);
        let controller = CrawlController::new(config.crawler.max_pages, cache);

        Ok(Self {
            config,
            endpoints,
            provider,
            extractor,
            controller,
            downloader,
        })
    }

    /// Runs discovery and downloads
    ///
    /// # Returns
    ///
    /// * `Ok(DumpSummary)` - Discovery succeeded; individual downloads may
    ///   still have failed (see `DumpSummary::downloads`)
    /// * `Err(DumpError)` - Login, crawl, cache write or output directory
    ///   creation failed
    pub async fn run(&self) -> crate::Result<DumpSummary> {
        let outcome = self.discover().await?;
        tracing::info!("Retrieved {} track ids", outcome.ids.len());

        let output_dir = &self.config.output.output_dir;
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|source| DumpError::Io {
                path: output_dir.clone(),
                source,
            })?;

        let progress = download_progress(
            outcome.ids.len() as u64,
            self.config.output.show_progress,
        );
        let downloads = self
            .downloader
            .download_all(
                output_dir,
                &self.config.account.username,
                &outcome.ids,
                self.config.output.concurrency,
                &progress,
            )
            .await;
        progress.finish_and_clear();

        tracing::info!(
            "Downloaded {} of {} tracks into {}",
            downloads.downloaded.len(),
            outcome.ids.len(),
            output_dir.display()
        );

        Ok(DumpSummary {
            username: self.config.account.username.clone(),
            identifiers: outcome.ids.len(),
            source: outcome.reason,
            pages_fetched: outcome.pages_fetched,
            output_dir: output_dir.clone(),
            downloads,
        })
    }

    /// Obtains the final id set from the cache or a fresh crawl
    ///
    /// A session is only opened when the cache cannot be used, and it is
    /// closed whether or not the crawl succeeds.
    pub async fn discover(&self) -> crate::Result<CrawlOutcome> {
        if let Some(outcome) = self.controller.resume() {
            return Ok(outcome);
        }

        let mut session = self.provider.open().await?;
        let result = self.crawl_in(&mut session).await;
        self.provider.close(session).await;
        result
    }

    async fn crawl_in(&self, session: &mut P::Session) -> crate::Result<CrawlOutcome> {
        let account = &self.config.account;

        match &account.password {
            Some(password) => {
                tracing::info!("Logging in as {}", account.username);
                self.provider
                    .authenticate(session, &account.username, password)
                    .await?;
            }
            None => tracing::info!(
                "No password given, crawling the public track listing of {}",
                account.username
            ),
        }

        let mut fetcher = SessionPageFetcher::new(session, &self.endpoints, &account.username);
        self.controller.crawl(&mut fetcher, &self.extractor).await
    }
}

/// Runs a complete dump against the configured server
///
/// # Example
///
/// ```no_run
/// use lt24_dump::config::Config;
/// use lt24_dump::run_dump;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut config = Config::default();
/// config.account.username = "alice".to_string();
/// let summary = run_dump(config).await?;
/// println!("{} tracks", summary.identifiers);
/// # Ok(())
/// # }
/// ```
pub async fn run_dump(config: Config) -> crate::Result<DumpSummary> {
    let provider = HttpSessionProvider::new(&config.crawler)?;
    let orchestrator = Orchestrator::new(config, provider, TrackGridExtractor::new())?;
    orchestrator.run().await
}
