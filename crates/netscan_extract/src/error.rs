//! Error types for netlist extraction.

use std::path::PathBuf;

/// The result type returned by the extraction entry points.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Errors that can abort an extraction pass.
///
/// Grammar mismatches are not errors: lines the classifier does not recognize
/// are inert, and malformed multi-line instantiations are dropped silently.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The source file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The worker pool could not start, or a worker panicked. Indicates a bug.
    #[error("internal extraction error: {0}")]
    Internal(String),
}

impl ExtractError {
    /// Wraps an I/O error together with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
