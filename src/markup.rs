//! Markup access: element selection over a parsed document.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};

/// Read access to the attributes of a matched element.
pub trait IconTag {
    /// Raw value of the attribute, if present.
    fn attribute(&self, name: &str) -> Option<&str>;
}

impl IconTag for ElementRef<'_> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }
}

/// Select `<link>` elements whose `rel` is one of `rels` and that carry a
/// non-empty `href`. Comparison is case-insensitive and ignores extra
/// whitespace inside the `rel` value.
pub fn select_links<'a>(document: &'a Html, rels: &[String]) -> Vec<ElementRef<'a>> {
    let selector = Selector::parse("link[rel][href]").unwrap();

    document
        .select(&selector)
        .filter(|el| el.attribute("href").is_some_and(|href| !href.is_empty()))
        .filter(|el| el.attribute("rel").is_some_and(|rel| matches_any(rel, rels)))
        .collect()
}

/// Select `<meta>` elements whose `name` or `property` is one of `names` and
/// that carry a non-empty `content`.
pub fn select_metas<'a>(document: &'a Html, names: &[String]) -> Vec<ElementRef<'a>> {
    let selector = Selector::parse("meta[content]").unwrap();

    document
        .select(&selector)
        .filter(|el| el.attribute("content").is_some_and(|content| !content.is_empty()))
        .filter(|el| {
            ["name", "property"]
                .iter()
                .any(|attr| el.attribute(attr).is_some_and(|value| matches_any(value, names)))
        })
        .collect()
}

/// Union of two selections, each element kept once, in document order of
/// first appearance.
pub fn union<'a>(
    first: Vec<ElementRef<'a>>,
    second: Vec<ElementRef<'a>>,
) -> Vec<ElementRef<'a>> {
    let mut seen = HashSet::new();
    first.into_iter().chain(second).filter(|el| seen.insert(el.id())).collect()
}

/// Compare an attribute value against a list of keywords.
fn matches_any(value: &str, keywords: &[String]) -> bool {
    let normalized = value.split_whitespace().collect::<Vec<_>>().join(" ");
    keywords.iter().any(|k| k.eq_ignore_ascii_case(&normalized))
}
