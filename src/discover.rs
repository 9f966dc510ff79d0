//! Discovery pipeline: fetch the page, probe, scan, merge and rank.

use log::{debug, info};
use url::Url;

use crate::error::FaviconError;
use crate::http::{ClientConfig, HttpClient, RequestOptions, ReqwestClient};
use crate::icon::{Icon, IconSet};
use crate::prober::probe_default_icon;
use crate::ranker::Ranker;
use crate::scanner::Scanner;

/// Runs icon discovery for pages through an [`HttpClient`].
///
/// A finder holds no per-page state; one instance can serve any number of
/// concurrent [`discover`](Finder::discover) calls.
#[derive(Debug, Clone)]
pub struct Finder<C = ReqwestClient> {
    client: C,
    scanner: Scanner,
    ranker: Ranker,
}

impl Finder<ReqwestClient> {
    /// Create a finder backed by a default reqwest client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new() -> Result<Self, FaviconError> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a finder backed by a reqwest client built from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: &ClientConfig) -> Result<Self, FaviconError> {
        Ok(Self::with_client(ReqwestClient::new(config)?))
    }

    /// Download the bytes of a discovered icon.
    ///
    /// # Errors
    ///
    /// Returns an error if the icon URL is invalid or cannot be fetched.
    pub async fn download(
        &self,
        icon: &Icon,
        options: &RequestOptions,
    ) -> Result<Vec<u8>, FaviconError> {
        let url = parse_url(icon.url())?;
        self.client.download(&url, options).await
    }
}

impl<C: HttpClient> Finder<C> {
    /// Create a finder using `client` with the default scanner and ranker.
    #[must_use]
    pub fn with_client(client: C) -> Self {
        Self { client, scanner: Scanner::default(), ranker: Ranker::default() }
    }

    /// Replace the tag scanner.
    #[must_use]
    pub fn scanner(mut self, scanner: Scanner) -> Self {
        self.scanner = scanner;
        self
    }

    /// Replace the ranker.
    #[must_use]
    pub fn ranker(mut self, ranker: Ranker) -> Self {
        self.ranker = ranker;
        self
    }

    /// The HTTP client used for discovery.
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Discover the icons of the page at `url`, best first.
    ///
    /// Only a failure to retrieve the page itself is an error. A missing
    /// default icon or unusable tags just yield fewer icons.
    ///
    /// # Errors
    ///
    /// Returns [`FaviconError::InvalidUrl`] if `url` does not parse, and a
    /// fetch failure (see [`FaviconError::is_fetch_failure`]) if the page
    /// cannot be retrieved or answers with a non-success status.
    pub async fn discover(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<Vec<Icon>, FaviconError> {
        let page_url = parse_url(url)?;

        let page = self.client.get(&page_url, options).await?;
        if !page.status.is_success() {
            debug!("HTTP {} for {page_url}.", page.status);
            return Err(FaviconError::HttpStatus { url: page_url.to_string(), status: page.status });
        }
        debug!("Fetched {page_url} (final URL {}).", page.final_url);

        let mut icons = IconSet::new();

        if let Some(icon) = probe_default_icon(&self.client, &page.final_url, options).await {
            icons.insert(icon);
        }

        icons.extend(self.scanner.scan(&page.final_url, &page.body));

        info!("Found {} icons for {url}.", icons.len());
        Ok(self.ranker.rank(icons))
    }
}

fn parse_url(url: &str) -> Result<Url, FaviconError> {
    Url::parse(url.trim())
        .map_err(|source| FaviconError::InvalidUrl { url: url.to_string(), source })
}
