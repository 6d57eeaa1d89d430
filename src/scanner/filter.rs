use std::collections::BTreeSet;
use std::fmt;

/// Wildcard entry that matches every extension.
pub const MATCH_ALL: &str = "*";

/// Case-insensitive set of file extensions a scan owns.
///
/// An empty filter matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    /// Normalized extensions (lower case, no leading dot)
    extensions: BTreeSet<String>,
    /// Set when the list contains `*`
    match_all: bool,
}

impl ExtensionFilter {
    /// Builds a filter from raw entries such as `PHP`, `.js` or `*`.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();
        for entry in entries {
            let normalized = normalize(entry.as_ref());
            if normalized.is_empty() {
                continue;
            }
            if normalized == MATCH_ALL {
                filter.match_all = true;
            } else {
                filter.extensions.insert(normalized);
            }
        }
        filter
    }

    /// Builds a filter from a comma separated list (`php,inc,js`).
    #[must_use]
    pub fn parse_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// A filter that accepts every file
    #[must_use]
    pub fn all() -> Self {
        Self {
            extensions: BTreeSet::new(),
            match_all: true,
        }
    }

    /// Whether files with extension `ext` belong to the scan
    #[must_use]
    pub fn matches(&self, ext: &str) -> bool {
        self.match_all || self.extensions.contains(&ext.to_lowercase())
    }

    /// True when no file can match
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.match_all && self.extensions.is_empty()
    }
}

impl fmt::Display for ExtensionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.match_all {
            return write!(f, "{MATCH_ALL}");
        }
        let list: Vec<&str> = self.extensions.iter().map(String::as_str).collect();
        write!(f, "{}", list.join(","))
    }
}

fn normalize(entry: &str) -> String {
    entry.trim().trim_start_matches('.').to_lowercase()
}
