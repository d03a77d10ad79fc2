//! Storage module for persisting discovered track ids
//!
//! A crawl can be expensive (one request per listing page, possibly behind a
//! login), so the discovered id set may be written to a cache file and reused
//! on later runs instead of crawling again.

mod cache;

pub use cache::TrackCache;
