//! Run summary
//!
//! Collects what a dump did and prints it at the end of a run.

use crate::downloader::DownloadReport;
use crate::state::DoneReason;
use std::path::PathBuf;

/// Summary of one dump run
#[derive(Debug)]
pub struct DumpSummary {
    /// Account that was dumped
    pub username: String,

    /// Number of distinct track ids processed
    pub identifiers: usize,

    /// How the id set was obtained
    pub source: DoneReason,

    /// Listing pages fetched (0 when loaded from cache)
    pub pages_fetched: u32,

    /// Directory the tracks were written to
    pub output_dir: PathBuf,

    /// Per-track download results
    pub downloads: DownloadReport,
}

impl DumpSummary {
    pub fn from_cache(&self) -> bool {
        self.source == DoneReason::Cached
    }

    /// Returns true if every track was downloaded
    pub fn is_complete(&self) -> bool {
        self.downloads.failed.is_empty()
    }
}

/// Prints the summary to stdout in a formatted manner
pub fn print_summary(summary: &DumpSummary) {
    println!("=== Track Dump: {} ===\n", summary.username);

    if summary.from_cache() {
        println!("Track ids: {} (from cache)", summary.identifiers);
    } else {
        println!(
            "Track ids: {} ({} listing pages, {})",
            summary.identifiers, summary.pages_fetched, summary.source
        );
    }

    println!(
        "Downloaded: {} / {} into {}",
        summary.downloads.downloaded.len(),
        summary.identifiers,
        summary.output_dir.display()
    );

    if !summary.downloads.failed.is_empty() {
        println!("\nFailed Downloads ({}):", summary.downloads.failed.len());
        for failure in &summary.downloads.failed {
            println!("  - {}: {}", failure.track_id, failure.error);
        }
    }
}
