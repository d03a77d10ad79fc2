use std::collections::btree_set::{self, BTreeSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Opaque identifier of one track on the remote service
///
/// Ids end up in file names, so only ASCII alphanumerics, `-` and `_` are
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackId(String);

/// Rejected track id token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid track id {0:?}")]
pub struct InvalidTrackId(pub String);

impl TrackId {
    /// Parses a raw token, trimming surrounding whitespace
    pub fn parse(raw: &str) -> Result<Self, InvalidTrackId> {
        let token = raw.trim();
        let valid = !token.is_empty()
            && token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if valid {
            Ok(Self(token.to_string()))
        } else {
            Err(InvalidTrackId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TrackId {
    type Err = InvalidTrackId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deduplicated set of track ids
///
/// Iteration is sorted, but nothing should depend on that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackIdSet(BTreeSet<TrackId>);

impl TrackIdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an id, returning false if it was already present
    pub fn insert(&mut self, id: TrackId) -> bool {
        self.0.insert(id)
    }

    /// Unions `other` into this set and returns how many ids were new
    pub fn extend_from(&mut self, other: TrackIdSet) -> usize {
        let before = self.0.len();
        self.0.extend(other.0);
        self.0.len() - before
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, TrackId> {
        self.0.iter()
    }
}

impl FromIterator<TrackId> for TrackIdSet {
    fn from_iter<I: IntoIterator<Item = TrackId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for TrackIdSet {
    type Item = TrackId;
    type IntoIter = btree_set::IntoIter<TrackId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TrackIdSet {
    type Item = &'a TrackId;
    type IntoIter = btree_set::Iter<'a, TrackId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
