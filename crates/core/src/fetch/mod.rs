//! Load a page over HTTP and build its structure.
//! Gated behind the "fetch" feature flag.

use crate::tree::{BuildConfig, PageStructure};
use reqwest::blocking::Client;
use thiserror::Error;
use url::Url;

/// Configuration for page fetching.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User-Agent header.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Settings for the structure build once the HTML is in hand.
    pub build: BuildConfig,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string(),
            timeout_secs: 30,
            build: BuildConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    HttpStatus(u16),

    #[error("Response is not HTML")]
    NotHtml,
}

/// Fetch a URL and build its page structure.
pub fn fetch(url: &str, config: &FetchConfig) -> Result<PageStructure, FetchError> {
    let parsed_url = parse_url(url)?;

    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(std::time::Duration::from_secs(config.timeout_secs))
        .build()?;

    tracing::debug!(url = parsed_url.as_str(), "fetching page");
    let response = client.get(parsed_url.as_str()).send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let html = response.text()?;
    if !html.contains('<') {
        return Err(FetchError::NotHtml);
    }

    Ok(crate::parse_with_config(&html, &config.build))
}

/// Only absolute http(s) URLs are fetchable.
pub fn parse_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::InvalidUrl(format!("unsupported scheme '{}'", other))),
    }
}
