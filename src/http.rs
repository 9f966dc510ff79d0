//! HTTP access: request options, the client seam, and its reqwest backend.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, trace};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::error::FaviconError;

/// Headers sent when the caller does not supply any.
pub const DEFAULT_HEADERS: &[(&str, &str)] = &[(
    "User-Agent",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_2) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/33.0.1750.152 Safari/537.36",
)];

/// Per-request options shared by the page fetch and the default-icon probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    headers: BTreeMap<String, String>,
    timeout: Option<Duration>,
}

impl RequestOptions {
    /// Options with the given headers instead of the defaults.
    #[must_use]
    pub const fn new(headers: BTreeMap<String, String>, timeout: Option<Duration>) -> Self {
        Self { headers, timeout }
    }

    /// Replace the whole header mapping.
    #[must_use]
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers = headers.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    /// Add or replace a single header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the timeout applied to each request.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Convert the header mapping into a typed header map.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first header that is not valid HTTP.
    pub fn header_map(&self) -> Result<HeaderMap, FaviconError> {
        let mut map = HeaderMap::with_capacity(self.headers.len());

        for (name, value) in &self.headers {
            let invalid = || FaviconError::InvalidHeader { name: name.clone() };
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            map.insert(header_name, header_value);
        }

        Ok(map)
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        let headers =
            DEFAULT_HEADERS.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        Self { headers, timeout: None }
    }
}

/// Response to a page fetch, after redirects.
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: StatusCode,
    pub final_url: Url,
    pub body: String,
}

/// Response to an existence check, after redirects.
#[derive(Debug, Clone)]
pub struct HeadResponse {
    pub status: StatusCode,
    pub final_url: Url,
}

/// HTTP operations needed by discovery. Both follow redirects and report the
/// post-redirect URL.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Fetch a page body.
    async fn get(&self, url: &Url, options: &RequestOptions) -> Result<PageResponse, FaviconError>;

    /// Check whether a resource exists without downloading it.
    async fn head(&self, url: &Url, options: &RequestOptions) -> Result<HeadResponse, FaviconError>;
}

/// Configuration for the reqwest-backed client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Maximum number of redirects followed per request.
    pub max_redirects: usize,
}

impl ClientConfig {
    /// Create new client configuration.
    #[must_use]
    pub const fn new(max_redirects: usize) -> Self {
        Self { max_redirects }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { max_redirects: 10 }
    }
}

/// [`HttpClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Build the underlying HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, FaviconError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(FaviconError::HttpClientBuild)?;

        Ok(Self { client })
    }

    /// Download the bytes behind `url`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an
    /// unreadable body.
    pub async fn download(
        &self,
        url: &Url,
        options: &RequestOptions,
    ) -> Result<Vec<u8>, FaviconError> {
        let response = self.send(self.client.get(url.as_str()), url, options).await?;

        if !response.status().is_success() {
            let status = response.status();
            debug!("Icon download HTTP {status} for {url}.");
            return Err(FaviconError::HttpStatus { url: url.to_string(), status });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| FaviconError::BodyDecode { url: url.to_string(), source })?;

        Ok(bytes.to_vec())
    }

    /// Apply options and send a request.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        url: &Url,
        options: &RequestOptions,
    ) -> Result<reqwest::Response, FaviconError> {
        let mut request = request.headers(options.header_map()?);
        if let Some(timeout) = options.timeout() {
            request = request.timeout(timeout);
        }

        trace!("Sending request to {url}.");
        request
            .send()
            .await
            .map_err(|source| FaviconError::HttpRequest { url: url.to_string(), source })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(
        &self,
        url: &Url,
        options: &RequestOptions,
    ) -> Result<PageResponse, FaviconError> {
        let response = self.send(self.client.get(url.as_str()), url, options).await?;
        let status = response.status();
        let final_url = response.url().clone();

        let body = response
            .text()
            .await
            .map_err(|source| FaviconError::BodyDecode { url: url.to_string(), source })?;

        Ok(PageResponse { status, final_url, body })
    }

    async fn head(
        &self,
        url: &Url,
        options: &RequestOptions,
    ) -> Result<HeadResponse, FaviconError> {
        let response = self.send(self.client.head(url.as_str()), url, options).await?;

        Ok(HeadResponse { status: response.status(), final_url: response.url().clone() })
    }
}
