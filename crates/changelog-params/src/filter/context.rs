//! Context expressions and active context sets

use std::collections::BTreeSet;

/// The set of contexts active for a run.
///
/// Tags are stored trimmed and lowercased; membership checks are therefore
/// case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contexts {
    tags: BTreeSet<String>,
}

impl Contexts {
    /// Parse a comma-separated list of context tags.
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
}

/// A boolean expression over context tags attached to a parameter definition.
///
/// Grammar: an AND of OR-groups. Groups are separated by the word `and`;
/// terms within a group are separated by `,` or the word `or`; a term may be
/// negated with a leading `!` or the word `not`. The empty expression always
/// matches.
///
/// With an empty active set, positive terms never match but negated terms
/// always do — `!prod` applies when no context was activated at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextExpression {
    groups: Vec<Vec<Term>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Term {
    negated: bool,
    tag: String,
}

impl ContextExpression {
    /// Parse a context expression such as `"test, local and !prod"`.
    pub fn parse(expr: &str) -> Self {
        // Commas become standalone tokens so `a,b` and `a , b` read the same.
        let normalized = expr.to_ascii_lowercase().replace(',', " , ");
        let mut groups = Vec::new();
        let mut terms: Vec<Term> = Vec::new();
        let mut negate_next = false;

        for token in normalized.split_whitespace() {
            match token {
                "and" => {
                    if !terms.is_empty() {
                        groups.push(std::mem::take(&mut terms));
                    }
                }
                "or" | "," => {}
                "!" | "not" => negate_next = true,
                word => {
                    let (negated, tag) = match word.strip_prefix('!') {
                        Some(rest) => (true, rest),
                        None => (false, word),
                    };
                    if !tag.is_empty() {
                        terms.push(Term {
                            negated: negated || negate_next,
                            tag: tag.to_string(),
                        });
                    }
                    negate_next = false;
                }
            }
        }
        if !terms.is_empty() {
            groups.push(terms);
        }

        Self { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Evaluate the expression against the active context set.
    ///
    /// Every group must be satisfied; a group is satisfied by any one of its
    /// terms.
    pub fn matches(&self, active: &Contexts) -> bool {
        self.groups.iter().all(|group| {
            group.iter().any(|term| {
                if term.negated {
                    !active.contains(&term.tag)
                } else {
                    active.contains(&term.tag)
                }
            })
        })
    }
}
