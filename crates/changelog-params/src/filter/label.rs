//! Label set matching

use std::collections::BTreeSet;

/// A set of label tags, used both for a definition's label requirement and
/// for the labels active on a registry.
///
/// Tags are stored trimmed and lowercased. An empty requirement matches any
/// active set; a non-empty requirement matches when it intersects the active
/// set, so it never matches an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    tags: BTreeSet<String>,
}

impl Labels {
    /// Parse a comma-separated list of label tags.
    pub fn parse(csv: &str) -> Self {
        let tags = csv
            .split(',')
            .map(|tag| tag.trim().to_ascii_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect();
        Self { tags }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(&tag.trim().to_ascii_lowercase())
    }

    /// Check this requirement against the active label set.
    pub fn matches(&self, active: &Labels) -> bool {
        self.is_empty() || self.tags.iter().any(|tag| active.tags.contains(tag))
    }
}
