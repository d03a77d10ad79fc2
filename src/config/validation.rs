use crate::config::types::{AccountConfig, Config, CrawlerConfig, OutputConfig};
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_account_config(&config.account)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the account section
fn validate_account_config(config: &AccountConfig) -> ConfigResult<()> {
    if config.username.is_empty() {
        return Err(ConfigError::Validation(
            "username is required".to_string(),
        ));
    }

    // The username is both a URL path segment and a file name prefix
    if config
        .username
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_whitespace() || c.is_control())
    {
        return Err(ConfigError::Validation(format!(
            "username must not contain slashes or whitespace, got '{}'",
            config.username
        )));
    }

    if config.username == "." || config.username == ".." {
        return Err(ConfigError::Validation(format!(
            "invalid username '{}'",
            config.username
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> ConfigResult<()> {
    validate_server_url(&config.server_url)?;

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(
            "max-pages must be >= 1, got 0".to_string(),
        ));
    }

    if config.login_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "login-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the server base URL
pub(crate) fn validate_server_url(server_url: &str) -> ConfigResult<Url> {
    let url = Url::parse(server_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid server-url '{}': {}", server_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "server-url '{}' must use http or https",
            server_url
        )));
    }

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(format!(
            "server-url '{}' cannot be used as a base URL",
            server_url
        )));
    }

    Ok(url)
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if config.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output-dir cannot be empty".to_string(),
        ));
    }

    if let Some(track_file) = &config.track_file {
        if track_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "track-file cannot be empty".to_string(),
            ));
        }
    }

    if config.concurrency < 1 || config.concurrency > 64 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 64, got {}",
            config.concurrency
        )));
    }

    Ok(())
}
