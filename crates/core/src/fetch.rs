//! Page fetching over HTTP.
//!
//! This module provides the bounded HTTP GET used for content-derived
//! features and for the search-engine results page. The timeout here is
//! deliberately short: a phishing check should not hang on a slow host.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{HamusError, Result};

/// HTTP client configuration for fetching web pages.
///
/// This struct controls timeout and user agent settings for HTTP requests.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 5,
            user_agent: "Mozilla/5.0 (compatible; Hamus/0.2; +https://github.com/stormlightlabs/hamus)".to_string(),
        }
    }
}

/// Fetches HTML content from a URL.
///
/// This function performs an HTTP GET request and returns the response body
/// as text. It follows redirects, respects the configured timeout, and uses
/// a browser-like User-Agent for better compatibility.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| HamusError::InvalidUrl(e.to_string()))?;

    if parsed_url.scheme().is_empty() {
        return Err(HamusError::InvalidUrl(
            "URL must include a scheme (http:// or https://)".to_string(),
        ));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(HamusError::HttpError)?;

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                HamusError::Timeout { timeout: config.timeout }
            } else {
                HamusError::HttpError(e)
            }
        })?;

    let content = response.text().await?;

    Ok(content)
}
