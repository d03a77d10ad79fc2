//! HTTP session backed by a cookie-keeping reqwest client

use crate::config::CrawlerConfig;
use crate::crawler::build_http_client;
use crate::session::login::{FormMethod, LoginForm};
use crate::session::{RawPage, Session, SessionProvider};
use crate::url::Endpoints;
use crate::{AuthError, DumpError, FetchError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use url::Url;

/// Browsing context: a client with its own cookie jar plus the last location
pub struct HttpSession {
    client: Client,
    current: Option<Url>,
}

impl HttpSession {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            current: None,
        }
    }

    /// Submits a form and follows the resulting redirects
    pub async fn submit_form(
        &mut self,
        form: &LoginForm,
        fields: &[(String, String)],
    ) -> Result<RawPage, FetchError> {
        let request = match form.method {
            FormMethod::Get => self.client.get(form.action.clone()).query(fields),
            FormMethod::Post => self.client.post(form.action.clone()).form(fields),
        };
        self.load(request, &form.action).await
    }

    async fn load(&mut self, request: RequestBuilder, url: &Url) -> Result<RawPage, FetchError> {
        let response = request.send().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let body = response.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        self.current = Some(final_url.clone());
        Ok(RawPage {
            url: final_url,
            body,
        })
    }
}

#[async_trait]
impl Session for HttpSession {
    async fn navigate(&mut self, url: &Url) -> Result<RawPage, FetchError> {
        let request = self.client.get(url.clone());
        self.load(request, url).await
    }

    fn current_url(&self) -> Option<&Url> {
        self.current.as_ref()
    }
}

/// Opens `HttpSession`s against the configured server
pub struct HttpSessionProvider {
    config: CrawlerConfig,
    endpoints: Endpoints,
    login_timeout: Duration,
}

impl HttpSessionProvider {
    pub fn new(config: &CrawlerConfig) -> Result<Self, DumpError> {
        Ok(Self {
            endpoints: Endpoints::new(&config.server_url)?,
            login_timeout: Duration::from_secs(config.login_timeout_secs),
            config: config.clone(),
        })
    }
}

#[async_trait]
impl SessionProvider for HttpSessionProvider {
    type Session = HttpSession;

    async fn open(&self) -> Result<HttpSession, DumpError> {
        // A fresh client per session keeps cookie jars apart
        let client = build_http_client(&self.config, true)?;
        tracing::debug!("Opened session against {}", self.endpoints.base());
        Ok(HttpSession::new(client))
    }

    async fn authenticate(
        &self,
        session: &mut HttpSession,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let login_url = self.endpoints.login();
        tracing::debug!("Loading login page {}", login_url);
        let page = session.navigate(&login_url).await?;

        let form = LoginForm::parse(&page.body, &page.url).ok_or_else(|| AuthError::FormNotFound {
            url: page.url.to_string(),
        })?;
        let fields = form.fields(username, password);

        let submitted = tokio::time::timeout(self.login_timeout, session.submit_form(&form, &fields))
            .await
            .map_err(|_| AuthError::Timeout {
                seconds: self.login_timeout.as_secs(),
            })??;

        if submitted.url == page.url {
            return Err(AuthError::Rejected {
                username: username.to_string(),
                url: page.url.to_string(),
            });
        }

        tracing::info!("Logged in as {} (now at {})", username, submitted.url);
        Ok(())
    }

    async fn close(&self, session: HttpSession) {
        if let Some(url) = session.current_url() {
            tracing::debug!("Closing session (last page: {})", url);
        }
        drop(session);
    }
}
