use crate::track::TrackId;
use std::path::{Path, PathBuf};

/// File extension of downloaded track files
pub const TRACK_EXTENSION: &str = "igc";

/// One track to download for one account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub username: String,
    pub track_id: TrackId,
}

impl DownloadTask {
    pub fn new(username: impl Into<String>, track_id: TrackId) -> Self {
        Self {
            username: username.into(),
            track_id,
        }
    }

    /// File name of the track, `{username}_{track_id}.igc`
    pub fn file_name(&self) -> String {
        format!("{}_{}.{}", self.username, self.track_id, TRACK_EXTENSION)
    }

    /// Output path of the track inside `output_dir`
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.file_name())
    }
}
