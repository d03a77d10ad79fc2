//! Track identifiers and the files they map to
//!
//! - `TrackId`: one track on the remote service, scoped to an account
//! - `TrackIdSet`: the deduplicated result of a crawl or a cache load
//! - `DownloadTask`: a (username, track id) pair and its output path

mod id;
mod task;

pub use id::{InvalidTrackId, TrackId, TrackIdSet};
pub use task::{DownloadTask, TRACK_EXTENSION};
