//! Content fetching from URLs, files, and stdin.
//!
//! URL fetching sends a single GET with browser-like headers and a bounded
//! timeout. Non-2xx responses count as failures.

use std::fs;
use std::path::PathBuf;
#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use url::Url;

use crate::{Result, SeoscopeError};

/// Desktop Chrome User-Agent; some sites refuse obvious bots.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 10, user_agent: BROWSER_USER_AGENT.to_string() }
    }
}

/// Fetches HTML content from a URL.
///
/// The target URL doubles as the `Referer`, as a browser following a link
/// from the page itself would send.
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| SeoscopeError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(SeoscopeError::InvalidUrl(format!(
            "unsupported scheme '{}' (expected http or https)",
            parsed_url.scheme()
        )));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(SeoscopeError::HttpError)?;

    let response = client
        .get(parsed_url.clone())
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.5")
        .header("DNT", "1")
        .header("Upgrade-Insecure-Requests", "1")
        .header("Referer", parsed_url.as_str())
        .send()
        .await
        .map_err(|e| map_request_error(e, config.timeout))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SeoscopeError::HttpStatus { status: status.as_u16(), url: url.to_string() });
    }

    response.text().await.map_err(|e| map_request_error(e, config.timeout))
}

#[cfg(feature = "fetch")]
fn map_request_error(err: reqwest::Error, timeout: u64) -> SeoscopeError {
    if err.is_timeout() { SeoscopeError::Timeout { timeout } } else { SeoscopeError::HttpError(err) }
}

/// Reads HTML content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(SeoscopeError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(SeoscopeError::from)
    }
}

/// Reads all of standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(SeoscopeError::from)?;

    Ok(buffer)
}
