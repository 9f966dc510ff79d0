//! URL resolution and classification utilities.

use url::Url;

/// File name probed at the root of every site.
const DEFAULT_ICON_PATH: &str = "/favicon.ico";

/// Resolve a candidate icon reference against the page URL.
///
/// Protocol-relative references (`//cdn.host/x.png`) inherit the scheme of
/// `base`. Absolute candidates are parsed as-is, anything else is joined
/// against `base` with RFC 3986 reference resolution.
///
/// # Errors
///
/// Returns the parse error when the candidate is not a valid URL reference.
pub fn resolve_url(base: &Url, candidate: &str) -> Result<Url, url::ParseError> {
    let candidate = if candidate.starts_with("//") {
        format!("{}:{candidate}", base.scheme())
    } else {
        candidate.to_string()
    };

    if is_absolute(&candidate) { Url::parse(&candidate) } else { base.join(&candidate) }
}

/// Check if a URL has a non-empty host component.
pub fn is_absolute(url: &str) -> bool {
    Url::parse(url).ok().and_then(|u| u.host_str().map(|h| !h.is_empty())).unwrap_or(false)
}

/// Build the conventional `favicon.ico` URL for a page's origin.
///
/// The port is only kept when it is not the scheme's default one.
pub fn default_icon_url(page_url: &Url) -> Option<Url> {
    let host = page_url.host_str().filter(|h| !h.is_empty())?;
    let port = page_url.port().map(|p| format!(":{p}")).unwrap_or_default();

    Url::parse(&format!("{}://{host}{port}{DEFAULT_ICON_PATH}", page_url.scheme())).ok()
}

/// Lowercased extension of the last path segment, without the dot.
pub fn icon_format(url: &Url) -> String {
    let segment = url.path().rsplit('/').next().unwrap_or("");

    match segment.rfind('.') {
        Some(pos) if pos > 0 => segment[pos + 1..].to_ascii_lowercase(),
        _ => String::new(),
    }
}
