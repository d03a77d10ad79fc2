//! Listing page fetcher
//!
//! This module handles:
//! - Building HTTP clients with the configured user agent and timeouts
//! - Loading track listing pages through a session

use crate::config::CrawlerConfig;
use crate::session::{RawPage, Session};
use crate::url::Endpoints;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// Session clients keep cookies so a login carries over to later requests;
/// the download client does not need them.
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `cookies` - Whether the client keeps a cookie jar
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &CrawlerConfig, cookies: bool) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .cookie_store(cookies)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Source of track listing pages, indexed from 1
#[async_trait]
pub trait PageSource: Send {
    async fn fetch_page(&mut self, page_index: u32) -> Result<RawPage, FetchError>;
}

/// Fetches an account's listing pages through a session
///
/// Pages are loaded one at a time: the session navigates on every fetch.
pub struct SessionPageFetcher<'a, S: Session> {
    session: &'a mut S,
    endpoints: &'a Endpoints,
    username: &'a str,
}

impl<'a, S: Session> SessionPageFetcher<'a, S> {
    pub fn new(session: &'a mut S, endpoints: &'a Endpoints, username: &'a str) -> Self {
        Self {
            session,
            endpoints,
            username,
        }
    }
}

#[async_trait]
impl<'a, S: Session> PageSource for SessionPageFetcher<'a, S> {
    async fn fetch_page(&mut self, page_index: u32) -> Result<RawPage, FetchError> {
        let url = self.endpoints.track_page(self.username, page_index);
        tracing::debug!("Fetching {}", url);
        self.session.navigate(&url).await
    }
}
