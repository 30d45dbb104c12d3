//! Error types for dependency file output.

use std::path::PathBuf;

/// Errors that can occur while persisting dependency files.
///
/// Reading is fail-safe: missing or unreadable inputs cause more reparsing,
/// never an error. Only writing the two output files can fail.
#[derive(Debug, thiserror::Error)]
pub enum DependsError {
    /// An I/O error occurred while writing a dependency file.
    #[error("dependency file I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
