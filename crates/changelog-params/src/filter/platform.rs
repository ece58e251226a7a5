//! Platform tag list matching

/// A comma-separated list of platform tags attached to a parameter definition.
///
/// An empty list matches every platform. Entries compare case-insensitively
/// and trimmed. Two keywords are recognized: `all` (matches every platform)
/// and `none` (matches nothing). An entry may be negated with a leading `!`,
/// which vetoes that platform; a list containing only negations matches any
/// platform that is not vetoed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformList {
    entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    All,
    None,
    Is(String),
    Not(String),
}

impl PlatformList {
    /// Parse a comma-separated platform tag list.
    ///
    /// Blank entries are skipped, so `""` and `" , "` both produce the empty
    /// (match-everything) list.
    pub fn parse(spec: &str) -> Self {
        let entries = spec
            .split(',')
            .map(|raw| raw.trim().to_ascii_lowercase())
            .filter(|tag| !tag.is_empty())
            .map(|tag| match tag.as_str() {
                "all" => Entry::All,
                "none" => Entry::None,
                _ => match tag.strip_prefix('!') {
                    Some(negated) => Entry::Not(negated.trim().to_string()),
                    None => Entry::Is(tag),
                },
            })
            .collect();
        Self { entries }
    }

    /// Check whether the list has no entries (matches everything).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether the list applies to `current`.
    ///
    /// `current` is the short identifier of the targeted platform, or `None`
    /// when the registry was built without one. An unknown platform satisfies
    /// negated entries but never positive ones.
    pub fn matches(&self, current: Option<&str>) -> bool {
        if self.entries.is_empty() {
            return true;
        }
        let current = current.map(|tag| tag.trim().to_ascii_lowercase());
        let mut saw_positive = false;
        for entry in &self.entries {
            match entry {
                Entry::All => return true,
                Entry::None => return false,
                Entry::Not(tag) => {
                    if current.as_deref() == Some(tag.as_str()) {
                        return false;
                    }
                }
                Entry::Is(tag) => {
                    saw_positive = true;
                    if current.as_deref() == Some(tag.as_str()) {
                        return true;
                    }
                }
            }
        }
        // A purely negative list accepts anything it did not veto.
        !saw_positive
    }
}
