//! URL building for the tracking service
//!
//! Every request the tool makes targets one of three endpoints below the
//! configured server URL:
//!
//! | Endpoint | Path |
//! |----------|------|
//! | Login form | `/login` |
//! | Track listing | `/user/{username}/tracks/page_num/{page}` |
//! | IGC download | `/leo_live.php?op=igc&user={username}&trackID={id}` |

use crate::config::validation::validate_server_url;
use crate::track::TrackId;
use crate::ConfigError;
use ::url::Url;

/// Endpoint builder rooted at the server base URL
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Creates an endpoint builder, rejecting non-http(s) or non-base URLs
    pub fn new(server_url: &str) -> Result<Self, ConfigError> {
        let base = validate_server_url(server_url)?;
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Login page URL
    pub fn login(&self) -> Url {
        self.with_segments(&["login"])
    }

    /// Track listing page for `username` (pages start at 1)
    pub fn track_page(&self, username: &str, page_index: u32) -> Url {
        let page = page_index.to_string();
        self.with_segments(&["user", username, "tracks", "page_num", &page])
    }

    /// IGC file download URL for one track
    pub fn track_file(&self, username: &str, track_id: &TrackId) -> Url {
        let mut url = self.with_segments(&["leo_live.php"]);
        url.query_pairs_mut()
            .append_pair("op", "igc")
            .append_pair("user", username)
            .append_pair("trackID", track_id.as_str());
        url
    }

    fn with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        // `new` guarantees the base can carry path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
