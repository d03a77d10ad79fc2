//! Session traits
//!
//! The crawl only ever needs to load a URL in a browsing context that may
//! carry a login. These traits keep the crawler independent from how that
//! context is implemented.

use crate::{AuthError, DumpError, FetchError};
use async_trait::async_trait;
use url::Url;

/// Content of a page loaded through a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage {
    /// Final URL after redirects
    pub url: Url,

    /// Page body
    pub body: String,
}

/// A browsing context that remembers its location and login state
#[async_trait]
pub trait Session: Send {
    /// Loads `url`, making it the session's current location
    async fn navigate(&mut self, url: &Url) -> Result<RawPage, FetchError>;

    /// Location of the last successfully loaded page
    fn current_url(&self) -> Option<&Url>;
}

/// Opens, authenticates and closes sessions
#[async_trait]
pub trait SessionProvider: Send + Sync {
    type Session: Session;

    /// Opens an anonymous session
    async fn open(&self) -> Result<Self::Session, DumpError>;

    /// Logs the session in as `username`
    ///
    /// Fails with `AuthError` when the session does not move away from the
    /// login page within the provider's login timeout.
    async fn authenticate(
        &self,
        session: &mut Self::Session,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError>;

    /// Releases the session
    async fn close(&self, session: Self::Session);
}
