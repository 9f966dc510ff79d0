//! Icon dimension extraction from `sizes` attributes and file names.

use std::sync::LazyLock;

use regex::Regex;

/// `WIDTHxHEIGHT` embedded in a file name, e.g. `icon-192x192.png`.
static SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?<width>\d{2,4})[x×](?<height>\d{2,4})").expect("size pattern is valid")
});

/// Width and height recovered for an icon, `(0, 0)` when unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeHint {
    pub width: u32,
    pub height: u32,
}

impl SizeHint {
    /// Create a size hint.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Derive icon dimensions from a tag.
///
/// The `sizes` attribute wins when present and not `any`; the largest
/// declared size (by `width + height`, first one on ties) is used.
/// Otherwise the reference itself is searched for an embedded size.
pub fn dimensions(sizes: Option<&str>, reference: &str) -> SizeHint {
    match sizes.map(str::trim) {
        Some(sizes) if !sizes.is_empty() && !sizes.eq_ignore_ascii_case("any") => {
            from_sizes_attr(sizes)
        }
        _ => from_reference(reference),
    }
}

/// Pick the largest `WxH` token of a whitespace-separated `sizes` list.
fn from_sizes_attr(sizes: &str) -> SizeHint {
    let mut best: Option<(&str, u64)> = None;

    for token in sizes.split_whitespace() {
        let score = digit_runs(token).fold(0u64, |acc, run| acc.saturating_add(parse_u64(run)));
        if best.is_none_or(|(_, max)| score > max) {
            best = Some((token, score));
        }
    }

    let Some((token, _)) = best else { return SizeHint::default() };

    let mut halves = token.split(['x', 'X', '×']);
    let width = halves.next().unwrap_or_default();
    let height = halves.next().unwrap_or_default();
    SizeHint::new(digits_to_u32(width), digits_to_u32(height))
}

/// Find the first embedded `WxH` pattern in a file name or URL.
fn from_reference(reference: &str) -> SizeHint {
    SIZE_RE
        .captures(reference)
        .map(|caps| SizeHint::new(digits_to_u32(&caps["width"]), digits_to_u32(&caps["height"])))
        .unwrap_or_default()
}

/// Maximal runs of ASCII digits in a string.
fn digit_runs(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| !c.is_ascii_digit()).filter(|run| !run.is_empty())
}

fn parse_u64(run: &str) -> u64 {
    run.parse().unwrap_or(u64::MAX)
}

/// Keep only the digits of `s` and parse them; 0 when nothing usable remains.
fn digits_to_u32(s: &str) -> u32 {
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}
