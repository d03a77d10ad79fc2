//! Output module for reporting dump results
//!
//! This module handles:
//! - The download progress bar
//! - The end-of-run summary

mod progress;
mod summary;

pub use progress::download_progress;
pub use summary::{print_summary, DumpSummary};
