//! Default-location probing for `/favicon.ico`.

use log::debug;
use url::Url;

use crate::http::{HttpClient, RequestOptions};
use crate::icon::Icon;
use crate::url_utils::default_icon_url;

/// Check whether the page's origin serves `/favicon.ico`.
///
/// Any failure means the icon is absent: the site may simply not have one.
pub async fn probe_default_icon<C>(
    client: &C,
    page_url: &Url,
    options: &RequestOptions,
) -> Option<Icon>
where
    C: HttpClient + ?Sized,
{
    let Some(icon_url) = default_icon_url(page_url) else {
        debug!("No default icon location for {page_url}.");
        return None;
    };

    let response = match client.head(&icon_url, options).await {
        Ok(response) => response,
        Err(e) => {
            debug!("Default icon probe failed for {icon_url}: {e}.");
            return None;
        }
    };

    if !response.status.is_success() {
        debug!("Default icon probe HTTP {} for {icon_url}.", response.status);
        return None;
    }

    Some(Icon::new(response.final_url, 0, 0, "ico"))
}
