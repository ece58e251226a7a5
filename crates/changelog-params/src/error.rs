//! Error types for changelog-params

/// Result type for changelog-params operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or expanding parameters
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A `${...}` placeholder had no value under the `Throw` policy
    #[error("could not resolve changelog parameter `{name}`")]
    UnresolvedPlaceholder { name: String },

    // Transparent wrappers for underlying crate errors
    /// Standard I/O error (settings file reading)
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error (settings parsing)
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}
