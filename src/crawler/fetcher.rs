//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - The `Fetch` seam the crawl engine is written against
//! - Building HTTP clients with the configured user agent and timeouts
//! - GET requests returning status, content type and body bytes
//! - Error classification

use crate::config::HttpConfig;
use crate::FetchError;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect::Policy, Client};
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Response to a fetch
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// Final URL after redirects
    pub final_url: Url,
    /// HTTP status code
    pub status: u16,
    /// Content-Type header value
    pub content_type: Option<String>,
    /// Response body (empty for non-2xx responses)
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// Returns true for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Capability to retrieve a URL
///
/// Implementations report transport failures as [`FetchError::Transport`]
/// and hand back every HTTP response, whatever its status. Deciding that a
/// status is a failure is left to the caller (see [`fetch_ok`]).
pub trait Fetch {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchResponse, FetchError>>;
}

/// Fetches a URL and turns any non-2xx status into [`FetchError::Status`]
pub async fn fetch_ok<F: Fetch + ?Sized>(fetcher: &F, url: &Url) -> Result<FetchResponse, FetchError> {
    let response = fetcher.fetch(url).await?;

    if !response.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status,
        });
    }

    Ok(response)
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed up to the configured limit; the final URL is
/// reported back in [`FetchResponse::final_url`].
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use site_mirror::config::HttpConfig;
/// use site_mirror::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let redirect = if config.max_redirects == 0 {
        Policy::none()
    } else {
        Policy::limited(config.max_redirects)
    };

    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(redirect)
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`Fetch`] implementation backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from `config`
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_error(url, &e))?;

        let status = response.status();
        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = if status.is_success() {
            response
                .bytes()
                .await
                .map_err(|e| classify_error(url, &e))?
                .to_vec()
        } else {
            Vec::new()
        };

        Ok(FetchResponse {
            final_url,
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}

/// Maps a reqwest error onto a transport failure for `url`
fn classify_error(url: &Url, error: &reqwest::Error) -> FetchError {
    let message = if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else if error.is_redirect() {
        format!("Redirect error: {}", error)
    } else {
        error.to_string()
    };

    FetchError::Transport {
        url: url.to_string(),
        message,
    }
}
