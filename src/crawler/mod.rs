//! Crawler module for track id discovery
//!
//! This module contains the discovery side of a dump:
//! - HTTP client construction and listing page fetching
//! - Track record extraction from listing pages
//! - The paginated crawl loop with its termination rule and id cache

mod controller;
mod extractor;
mod fetcher;

pub use controller::{CrawlController, CrawlOutcome};
pub use extractor::{PageRecords, RecordExtractor, TrackGridExtractor};
pub use fetcher::{build_http_client, PageSource, SessionPageFetcher};
