//! YAML track id cache
//!
//! The cache is a plain YAML sequence of track ids:
//!
//! ```yaml
//! - '10'
//! - '11'
//! ```
//!
//! Numeric entries (`- 10`) are accepted when reading so hand-written
//! files work too.

use crate::track::{TrackId, TrackIdSet};
use crate::CacheError;
use serde::Deserialize;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

/// Track id cache stored at a fixed path
#[derive(Debug, Clone)]
pub struct TrackCache {
    path: PathBuf,
}

impl TrackCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cached id set
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - No cache file exists
    /// * `Ok(Some(set))` - Cache loaded (possibly empty)
    /// * `Err(CacheError)` - The file exists but could not be read or parsed
    pub fn load(&self) -> Result<Option<TrackIdSet>, CacheError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CacheError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let raw: Option<Vec<RawId>> =
            serde_yaml::from_str(&content).map_err(|source| CacheError::Parse {
                path: self.path.clone(),
                source,
            })?;

        let mut ids = TrackIdSet::new();
        for entry in raw.unwrap_or_default() {
            let token = match entry {
                RawId::Text(s) => s,
                RawId::Number(n) => n.to_string(),
            };
            let id = TrackId::parse(&token).map_err(|_| CacheError::InvalidId {
                path: self.path.clone(),
                id: token.clone(),
            })?;
            ids.insert(id);
        }

        Ok(Some(ids))
    }

    /// Writes the complete id set, replacing any existing cache
    ///
    /// The set is written to a temporary file next to the cache and renamed
    /// into place, so readers never observe a partial file.
    pub fn save(&self, ids: &TrackIdSet) -> Result<(), CacheError> {
        let entries: Vec<&str> = ids.iter().map(TrackId::as_str).collect();
        let yaml = serde_yaml::to_string(&entries)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|source| self.write_error(source))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|source| self.write_error(source))?;
        tmp.write_all(yaml.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|source| self.write_error(source))?;
        tmp.persist(&self.path)
            .map_err(|e| self.write_error(e.error))?;

        Ok(())
    }

    fn write_error(&self, source: std::io::Error) -> CacheError {
        CacheError::Write {
            path: self.path.clone(),
            source,
        }
    }
}
