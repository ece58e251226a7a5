//! Placeholder expansion for template strings
//!
//! Scans a template left to right for `${name}` markers and substitutes the
//! value each name resolves to through the registry. Markers are non-nested;
//! a name may not contain `{` or `}`. Substituted values are inserted
//! literally, never re-expanded.

use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::registry::ParameterRegistry;
use crate::scope::ScopeNode;
use crate::settings::{EngineSettings, MissingPropertyMode};

/// Pattern matching one `${name}` marker
static MARKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{[^{}]+\}").unwrap());

/// Expands `${name}` placeholders in template strings against a registry.
pub struct ExpressionExpander<'a> {
    registry: &'a ParameterRegistry,
    mode: MissingPropertyMode,
    support_escaping: bool,
}

impl<'a> ExpressionExpander<'a> {
    /// Create an expander over `registry` configured by `settings`.
    pub fn new(registry: &'a ParameterRegistry, settings: &EngineSettings) -> Self {
        Self {
            registry,
            mode: settings.missing_property_mode,
            support_escaping: settings.support_escaping,
        }
    }

    /// Expand every placeholder in `template`, resolving each name for the
    /// given requesting scope.
    ///
    /// Unresolved names follow the configured [`MissingPropertyMode`];
    /// only [`MissingPropertyMode::Throw`] makes this fallible.
    pub fn expand(&self, template: &str, scope: Option<&Rc<ScopeNode>>) -> Result<String> {
        let mut output = String::with_capacity(template.len());
        let mut tail = 0;

        for marker in MARKER_PATTERN.find_iter(template) {
            output.push_str(&template[tail..marker.start()]);
            tail = marker.end();

            // Strip the `${` / `}` delimiters.
            let text = marker.as_str();
            let name = &text[2..text.len() - 1];

            if self.support_escaping {
                if let Some(escaped) = name.strip_prefix(':') {
                    tracing::trace!(name = escaped, "escaped placeholder left literal");
                    output.push_str("${");
                    output.push_str(escaped);
                    output.push('}');
                    continue;
                }
            }

            match self.registry.get(name, scope) {
                Some(value) => {
                    tracing::trace!(name, "placeholder resolved");
                    output.push_str(&value);
                }
                None => match self.mode {
                    MissingPropertyMode::Throw => {
                        return Err(Error::UnresolvedPlaceholder {
                            name: name.to_string(),
                        });
                    }
                    MissingPropertyMode::Empty => {
                        tracing::trace!(name, "placeholder unresolved, substituting empty string");
                    }
                    MissingPropertyMode::Preserve => {
                        tracing::trace!(name, "placeholder unresolved, marker preserved");
                        output.push_str(text);
                    }
                },
            }
        }
        output.push_str(&template[tail..]);

        Ok(output)
    }
}
