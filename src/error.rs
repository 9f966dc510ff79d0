//! Error types for favicon discovery.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use reqwest::StatusCode;

/// Errors surfaced by the discovery pipeline and its front end.
///
/// Probe failures and malformed icon URLs never show up here: they only
/// reduce the number of icons found.
#[derive(Debug)]
pub enum FaviconError {
    /// Failed to build HTTP client.
    HttpClientBuild(reqwest::Error),
    /// The page URL supplied by the caller does not parse.
    InvalidUrl { url: String, source: url::ParseError },
    /// A request header name or value is not valid HTTP.
    InvalidHeader { name: String },
    /// HTTP request failed (connect, TLS, timeout, too many redirects).
    HttpRequest { url: String, source: reqwest::Error },
    /// HTTP response had non-success status.
    HttpStatus { url: String, status: StatusCode },
    /// Failed to read the response body.
    BodyDecode { url: String, source: reqwest::Error },
    /// Failed to write an output file.
    Io { path: PathBuf, source: std::io::Error },
}

impl FaviconError {
    /// Whether the page (or icon) itself could not be retrieved.
    ///
    /// An unusable request header counts: the request was never sent.
    #[must_use]
    pub const fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidHeader { .. }
                | Self::HttpRequest { .. }
                | Self::HttpStatus { .. }
                | Self::BodyDecode { .. }
        )
    }
}

impl fmt::Display for FaviconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpClientBuild(e) => write!(f, "failed to build HTTP client: {e}"),
            Self::InvalidUrl { url, source } => write!(f, "invalid URL '{url}': {source}"),
            Self::InvalidHeader { name } => write!(f, "invalid request header '{name}'"),
            Self::HttpRequest { url, source } => {
                write!(f, "HTTP request failed for {url}: {source}")
            }
            Self::HttpStatus { url, status } => write!(f, "HTTP {status} for {url}"),
            Self::BodyDecode { url, source } => {
                write!(f, "body decode failed for {url}: {source}")
            }
            Self::Io { path, source } => write!(f, "failed to write {}: {source}", path.display()),
        }
    }
}

impl Error for FaviconError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::HttpClientBuild(e) => Some(e),
            Self::InvalidUrl { source, .. } => Some(source),
            Self::HttpRequest { source, .. } | Self::BodyDecode { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::InvalidHeader { .. } | Self::HttpStatus { .. } => None,
        }
    }
}
