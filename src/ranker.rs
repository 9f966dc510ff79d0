//! Best-first ordering of discovered icons.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::icon::{Icon, IconSet};

/// Preference of each image format; anything missing ranks 0.
pub const FORMAT_PRIORITY: &[(&str, u8)] =
    &[("ico", 10), ("png", 9), ("jpg", 8), ("jpeg", 7), ("svg", 6), ("gif", 5)];

/// Sort key of an icon. Any sized icon outranks every unsized one; unsized
/// icons only compare by format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum RankKey {
    Unsized { format: u8 },
    Sized { size: u64, format: u8 },
}

/// Orders icons by declared size, then by format.
#[derive(Debug, Clone)]
pub struct Ranker {
    format_priority: HashMap<String, u8>,
}

impl Ranker {
    /// Create a ranker with a custom format priority table.
    #[must_use]
    pub fn new<I, K>(format_priority: I) -> Self
    where
        I: IntoIterator<Item = (K, u8)>,
        K: Into<String>,
    {
        Self { format_priority: format_priority.into_iter().map(|(k, p)| (k.into(), p)).collect() }
    }

    /// Priority of a format, 0 when unknown.
    #[must_use]
    pub fn format_priority(&self, format: &str) -> u8 {
        self.format_priority.get(format).copied().unwrap_or(0)
    }

    /// Consume the set and return its icons best first.
    ///
    /// Icons that tie on every key keep their insertion order.
    #[must_use]
    pub fn rank(&self, icons: IconSet) -> Vec<Icon> {
        let mut icons = icons.into_vec();
        icons.sort_by_cached_key(|icon| Reverse(self.key(icon)));
        icons
    }

    fn key(&self, icon: &Icon) -> RankKey {
        let format = self.format_priority(icon.format());
        match icon.size() {
            0 => RankKey::Unsized { format },
            size => RankKey::Sized { size, format },
        }
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(FORMAT_PRIORITY.iter().copied())
    }
}
