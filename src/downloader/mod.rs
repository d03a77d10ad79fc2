//! Track file downloader
//!
//! Each track id maps to exactly one output file,
//! `{output_dir}/{username}_{id}.igc`, which is overwritten on every run.
//! Downloads do not use the crawl session, and a failed download never
//! affects the others.

use crate::config::CrawlerConfig;
use crate::crawler::build_http_client;
use crate::track::{DownloadTask, TrackId, TrackIdSet};
use crate::url::Endpoints;
use crate::{DownloadError, DumpError, FetchError};
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use reqwest::Client;
use std::path::{Path, PathBuf};

/// A track that could not be downloaded
#[derive(Debug)]
pub struct FailedDownload {
    pub track_id: TrackId,
    pub error: DownloadError,
}

/// Outcome of a bulk download
#[derive(Debug, Default)]
pub struct DownloadReport {
    /// Files written, in completion order
    pub downloaded: Vec<PathBuf>,

    /// Tracks whose download failed
    pub failed: Vec<FailedDownload>,
}

impl DownloadReport {
    pub fn attempted(&self) -> usize {
        self.downloaded.len() + self.failed.len()
    }
}

/// Downloads IGC files for track ids
#[derive(Debug, Clone)]
pub struct Downloader {
    client: Client,
    endpoints: Endpoints,
}

impl Downloader {
    /// Creates a downloader with its own cookie-less client
    pub fn new(config: &CrawlerConfig) -> Result<Self, DumpError> {
        let endpoints = Endpoints::new(&config.server_url)?;
        let client = build_http_client(config, false)?;
        Ok(Self::with_client(client, endpoints))
    }

    pub fn with_client(client: Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// Downloads one track and writes it to its output path
    ///
    /// Missing directories are created and an existing file is replaced.
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - The path written
    /// * `Err(DownloadError)` - The request or the write failed
    pub async fn download(
        &self,
        output_dir: &Path,
        username: &str,
        track_id: &TrackId,
    ) -> Result<PathBuf, DownloadError> {
        let path = DownloadTask::new(username, track_id.clone()).output_path(output_dir);
        let url = self.endpoints.track_file(username, track_id);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let bytes = response.bytes().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| DownloadError::Write {
                    path: path.clone(),
                    source,
                })?;
        }

        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|source| DownloadError::Write {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }

    /// Downloads every id with at most `concurrency` requests in flight
    ///
    /// Failures are logged and collected; they never stop other downloads.
    pub async fn download_all(
        &self,
        output_dir: &Path,
        username: &str,
        ids: &TrackIdSet,
        concurrency: usize,
        progress: &ProgressBar,
    ) -> DownloadReport {
        let results: Vec<(TrackId, Result<PathBuf, DownloadError>)> = stream::iter(ids.iter())
            .map(|track_id| async move {
                let result = self.download(output_dir, username, track_id).await;
                progress.inc(1);
                (track_id.clone(), result)
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

        let mut report = DownloadReport::default();
        for (track_id, result) in results {
            match result {
                Ok(path) => report.downloaded.push(path),
                Err(error) => {
                    tracing::warn!("Failed to download track {}: {}", track_id, error);
                    report.failed.push(FailedDownload { track_id, error });
                }
            }
        }

        report
    }
}
