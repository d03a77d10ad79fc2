//! State module for tracking crawl progress
//!
//! - `CrawlState`: where the paginated crawl currently is
//! - `DoneReason`: how a finished crawl terminated

mod crawl_state;

// Re-export main types
pub use crawl_state::{CrawlState, DoneReason};
