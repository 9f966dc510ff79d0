//! Icon tag scanning: turns `<link>` and `<meta>` declarations into icons.

use log::{debug, trace};
use scraper::Html;
use url::Url;

use crate::dimensions::dimensions;
use crate::icon::{Icon, IconSet};
use crate::markup::{IconTag, select_links, select_metas, union};
use crate::url_utils::{icon_format, resolve_url};

/// `rel` values of `<link>` elements that declare a site icon.
pub const LINK_RELS: &[&str] = &[
    "icon",
    "shortcut icon",
    "apple-touch-icon",
    "apple-touch-icon-precomposed",
    "alternate icon",
    "mask-icon",
];

/// `name`/`property` values of `<meta>` elements whose content is an icon.
pub const META_NAMES: &[&str] = &["msapplication-TileImage"];

/// Inline images cannot be fetched separately.
const DATA_IMAGE_PREFIX: &str = "data:image/";

/// Scans page markup for icon declarations.
#[derive(Debug, Clone)]
pub struct Scanner {
    link_rels: Vec<String>,
    meta_names: Vec<String>,
}

impl Scanner {
    /// Create a scanner matching the given link relations and meta names.
    #[must_use]
    pub fn new<R, M>(link_rels: R, meta_names: M) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        Self {
            link_rels: link_rels.into_iter().map(Into::into).collect(),
            meta_names: meta_names.into_iter().map(Into::into).collect(),
        }
    }

    /// Find every icon declared in `html`, resolved against `base`.
    pub fn scan(&self, base: &Url, html: &str) -> IconSet {
        let document = Html::parse_document(html);
        let tags = union(
            select_links(&document, &self.link_rels),
            select_metas(&document, &self.meta_names),
        );
        trace!("Found {} icon tags on {base}.", tags.len());

        tags.iter().filter_map(|tag| build_icon(base, tag)).collect()
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(LINK_RELS.iter().copied(), META_NAMES.iter().copied())
    }
}

/// Build the icon declared by a single tag, or `None` if the tag is unusable.
pub fn build_icon<T: IconTag + ?Sized>(base: &Url, tag: &T) -> Option<Icon> {
    let raw = tag.attribute("href").or_else(|| tag.attribute("content")).unwrap_or("");
    let href: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if href.is_empty() {
        trace!("Skip icon tag with empty reference.");
        return None;
    }

    if is_inline_image(&href) {
        trace!("Skip inline image icon.");
        return None;
    }

    let url = match resolve_url(base, &href) {
        Ok(url) => url,
        Err(e) => {
            debug!("Skip malformed icon URL '{href}': {e}.");
            return None;
        }
    };

    let size = dimensions(tag.attribute("sizes"), raw);
    let format = icon_format(&url);

    Some(Icon::with_size(url, size, format))
}

fn is_inline_image(href: &str) -> bool {
    href.get(..DATA_IMAGE_PREFIX.len()).is_some_and(|p| p.eq_ignore_ascii_case(DATA_IMAGE_PREFIX))
}
