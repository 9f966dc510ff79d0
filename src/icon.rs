//! Icon descriptors and the deduplicating set they are collected into.

use std::collections::HashSet;
use std::fmt;

use crate::dimensions::SizeHint;

/// A discovered site icon: resolved URL, declared size and format.
///
/// Two icons are the same icon when all four fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Icon {
    url: String,
    width: u32,
    height: u32,
    format: String,
}

impl Icon {
    /// Create an icon descriptor.
    #[must_use]
    pub fn new(url: impl Into<String>, width: u32, height: u32, format: impl Into<String>) -> Self {
        Self { url: url.into(), width, height, format: format.into() }
    }

    /// Create an icon descriptor from a size hint.
    #[must_use]
    pub fn with_size(url: impl Into<String>, size: SizeHint, format: impl Into<String>) -> Self {
        Self::new(url, size.width, size.height, format)
    }

    /// Absolute icon URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Lowercase file extension, empty when unknown.
    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Sum of width and height, zero when the size is unknown.
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::from(self.width) + u64::from(self.height)
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}x{}, format: {})", self.url, self.width, self.height, self.format)
    }
}

/// Insertion-ordered set of icons.
#[derive(Debug, Default, Clone)]
pub struct IconSet {
    seen: HashSet<Icon>,
    icons: Vec<Icon>,
}

impl IconSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an icon; returns false if an identical icon is already present.
    pub fn insert(&mut self, icon: Icon) -> bool {
        if self.seen.insert(icon.clone()) {
            self.icons.push(icon);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Icon> {
        self.icons.iter()
    }

    /// Consume the set, yielding icons in insertion order.
    #[must_use]
    pub fn into_vec(self) -> Vec<Icon> {
        self.icons
    }
}

impl Extend<Icon> for IconSet {
    fn extend<I: IntoIterator<Item = Icon>>(&mut self, iter: I) {
        for icon in iter {
            self.insert(icon);
        }
    }
}

impl FromIterator<Icon> for IconSet {
    fn from_iter<I: IntoIterator<Item = Icon>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for IconSet {
    type Item = Icon;
    type IntoIter = std::vec::IntoIter<Icon>;

    fn into_iter(self) -> Self::IntoIter {
        self.icons.into_iter()
    }
}
