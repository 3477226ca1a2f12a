//! Error types for configuration loading and validation.

use std::path::PathBuf;

/// Errors that can occur when loading or validating a `netscan.toml` configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The configuration file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid TOML, or does not fit the configuration schema.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting parsed but holds a value netscan cannot use.
    #[error("invalid value for `{key}`: {message}")]
    Invalid {
        /// Dotted path of the offending setting, e.g. `extract.threads`.
        key: &'static str,
        /// What is wrong with the value.
        message: String,
    },
}

impl ConfigError {
    /// The dotted key of the offending setting, for [`ConfigError::Invalid`].
    pub fn key(&self) -> Option<&'static str> {
        match self {
            ConfigError::Invalid { key, .. } => Some(key),
            _ => None,
        }
    }
}
