//! Crawl controller - track id discovery
//!
//! The controller walks an account's listing pages from page 1 upward,
//! unioning the ids found on each page, until a page has no track records
//! or the page limit is passed. The finished set can be cached so later runs
//! skip the crawl entirely.

use crate::crawler::extractor::RecordExtractor;
use crate::crawler::fetcher::PageSource;
use crate::state::{CrawlState, DoneReason};
use crate::storage::TrackCache;
use crate::track::TrackIdSet;
use crate::DumpError;

/// Result of a finished crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOutcome {
    /// Every id discovered (or loaded from cache)
    pub ids: TrackIdSet,

    /// Number of listing pages fetched
    pub pages_fetched: u32,

    /// How the crawl terminated
    pub reason: DoneReason,
}

/// Drives the paginated crawl and the id cache
#[derive(Debug, Clone)]
pub struct CrawlController {
    max_pages: u32,
    cache: Option<TrackCache>,
}

impl CrawlController {
    /// Creates a controller
    ///
    /// # Arguments
    ///
    /// * `max_pages` - Highest page index that will be fetched
    /// * `cache` - Optional id cache, read by `resume` and written by `crawl`
    pub fn new(max_pages: u32, cache: Option<TrackCache>) -> Self {
        Self { max_pages, cache }
    }

    /// Returns the cached id set if a non-empty one can be loaded
    ///
    /// An unreadable or malformed cache is logged and treated as absent.
    pub fn resume(&self) -> Option<CrawlOutcome> {
        let cache = self.cache.as_ref()?;

        match cache.load() {
            Ok(Some(ids)) if !ids.is_empty() => {
                tracing::info!(
                    "Loaded {} track ids from {}, skipping crawl",
                    ids.len(),
                    cache.path().display()
                );
                Some(CrawlOutcome {
                    ids,
                    pages_fetched: 0,
                    reason: DoneReason::Cached,
                })
            }
            Ok(Some(_)) => {
                tracing::info!("Track cache {} is empty, crawling", cache.path().display());
                None
            }
            Ok(None) => {
                tracing::debug!("No track cache at {}", cache.path().display());
                None
            }
            Err(e) => {
                tracing::warn!("Ignoring unusable track cache: {}", e);
                None
            }
        }
    }

    /// Crawls listing pages until the listing ends
    ///
    /// The first fetch error aborts the crawl; nothing is cached in that
    /// case. On success the complete set is written to the cache, if one is
    /// configured.
    pub async fn crawl<S, E>(&self, source: &mut S, extractor: &E) -> Result<CrawlOutcome, DumpError>
    where
        S: PageSource + ?Sized,
        E: RecordExtractor + ?Sized,
    {
        let mut ids = TrackIdSet::new();
        let mut pages_fetched = 0;
        let mut state = CrawlState::start(self.max_pages);

        let reason = loop {
            let page_index = match state {
                CrawlState::Crawling { page_index } => page_index,
                CrawlState::Done(reason) => break reason,
            };

            tracing::debug!(
                "Parsing page {:02}: {} tracks so far",
                page_index,
                ids.len()
            );

            let page = source.fetch_page(page_index).await?;
            pages_fetched += 1;

            let records = extractor.extract(&page);
            let page_was_empty = records.is_empty();
            if !page_was_empty && records.ids.is_empty() {
                tracing::warn!(
                    "Page {} has {} track records but no usable ids",
                    page_index,
                    records.records
                );
            }

            let found = records.ids.len();
            let added = ids.extend_from(records.ids);
            if found > 0 && added == 0 {
                tracing::debug!("Page {} repeated {} known track ids", page_index, found);
            }

            state = state.advance(page_was_empty, self.max_pages);
        };

        if reason == DoneReason::PageLimit {
            tracing::warn!(
                "Stopped at the page limit ({} pages); the listing may be incomplete",
                self.max_pages
            );
        }

        tracing::info!(
            "Crawl {} after {} pages with {} track ids",
            reason,
            pages_fetched,
            ids.len()
        );

        if let Some(cache) = &self.cache {
            tracing::info!("Saving track ids to {}", cache.path().display());
            cache.save(&ids)?;
        }

        Ok(CrawlOutcome {
            ids,
            pages_fetched,
            reason,
        })
    }

    /// Resumes from the cache when possible, otherwise crawls
    pub async fn run<S, E>(&self, source: &mut S, extractor: &E) -> Result<CrawlOutcome, DumpError>
    where
        S: PageSource + ?Sized,
        E: RecordExtractor + ?Sized,
    {
        match self.resume() {
            Some(outcome) => Ok(outcome),
            None => self.crawl(source, extractor).await,
        }
    }
}
