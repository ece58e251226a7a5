//! Host-wide engine settings
//!
//! The collaborator reads these once, before any expansion, from whatever
//! configuration layer the host uses. A TOML representation is provided for
//! hosts that keep them in a file:
//!
//! ```toml
//! missing_property_mode = "EMPTY"
//! support_escaping = true
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Behavior when a `${name}` placeholder cannot be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MissingPropertyMode {
    /// Abort expansion with [`Error::UnresolvedPlaceholder`].
    ///
    /// [`Error::UnresolvedPlaceholder`]: crate::Error::UnresolvedPlaceholder
    Throw,
    /// Substitute the empty string and continue.
    Empty,
    /// Leave the `${name}` marker verbatim in the output.
    #[default]
    Preserve,
}

/// Engine settings read once per run by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    /// What [`ExpressionExpander`] does with an unresolved placeholder.
    ///
    /// [`ExpressionExpander`]: crate::ExpressionExpander
    pub missing_property_mode: MissingPropertyMode,

    /// When true, `${:name}` is an escape producing the literal `${name}`.
    pub support_escaping: bool,
}

impl EngineSettings {
    /// Parse settings from TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a TOML file.
    ///
    /// A missing file yields the defaults; invalid TOML is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            tracing::debug!(?path, "no settings file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }
}
