//! Error types for depfile parsing.

use std::path::PathBuf;

/// Errors that can occur while reading a depfile.
#[derive(Debug, thiserror::Error)]
pub enum DepfileError {
    /// The depfile could not be read.
    #[error("failed to read depfile {path}: {source}")]
    Io {
        /// The depfile path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The depfile is not valid UTF-8.
    #[error("depfile {path} is not valid UTF-8")]
    InvalidUtf8 {
        /// The depfile path.
        path: PathBuf,
    },

    /// A rule names targets but never reaches a `:`.
    #[error("line {line}: expected ':' after target list")]
    MissingColon {
        /// 1-based line where the rule ended.
        line: usize,
    },

    /// A `:` appears with no target before it.
    #[error("line {line}: rule has no target")]
    MissingTarget {
        /// 1-based line of the colon.
        line: usize,
    },

    /// A second rule separator appears within one rule.
    #[error("line {line}: unexpected ':' in prerequisite list")]
    UnexpectedColon {
        /// 1-based line of the colon.
        line: usize,
    },
}
