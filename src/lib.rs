//! Favicon discovery.
//!
//! Given a page URL, find every icon the site declares: the conventional
//! `/favicon.ico` plus the `<link>` and `<meta>` icon declarations of the
//! page markup. Icons are deduplicated and returned best first, larger
//! declared sizes before smaller ones and unsized icons last, with the
//! image format breaking ties.
//!
//! ```no_run
//! # async fn example() -> Result<(), favscan::FaviconError> {
//! let icons = favscan::get("https://www.rust-lang.org/", &favscan::RequestOptions::default()).await?;
//! if let Some(best) = icons.first() {
//!     println!("{best}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod dimensions;
pub mod discover;
pub mod error;
pub mod export;
pub mod http;
pub mod icon;
pub mod markup;
pub mod prober;
pub mod ranker;
pub mod scanner;
pub mod url_utils;

pub use crate::discover::Finder;
pub use crate::error::FaviconError;
pub use crate::http::{ClientConfig, HttpClient, RequestOptions, ReqwestClient};
pub use crate::icon::{Icon, IconSet};

/// Discover the icons of the page at `url`, best first.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, `url` does not
/// parse, or the page itself cannot be fetched.
pub async fn get(url: &str, options: &RequestOptions) -> Result<Vec<Icon>, FaviconError> {
    Finder::new()?.discover(url, options).await
}

/// Download the bytes of a discovered icon with the same request options.
///
/// # Errors
///
/// Returns an error if the icon cannot be fetched or answers with a
/// non-success status.
pub async fn download(icon: &Icon, options: &RequestOptions) -> Result<Vec<u8>, FaviconError> {
    Finder::new()?.download(icon, options).await
}
