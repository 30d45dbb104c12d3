//! Reader for make-style dependency files written by gcc-compatible compilers.
//!
//! A depfile is a small makefile fragment: one or more rules of the form
//! `targets: prerequisites`, possibly spread over several lines with
//! backslash continuations. [`parse`] turns one into a list of
//! [`DepfileEntry`] values, one per rule, in file order.

#![warn(missing_docs)]

pub mod error;
pub mod lexer;
pub mod normalize;

use std::path::Path;

pub use error::DepfileError;
pub use lexer::parse;
pub use normalize::normalize_path;

/// One rule of a depfile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepfileEntry {
    /// The targets named before the colon.
    pub rules: Vec<String>,
    /// The prerequisites named after the colon, in file order.
    pub paths: Vec<String>,
}

/// Reads and parses the depfile at `path`.
pub fn read_depfile(path: &Path) -> Result<Vec<DepfileEntry>, DepfileError> {
    let bytes = std::fs::read(path).map_err(|e| DepfileError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let content = std::str::from_utf8(&bytes).map_err(|_| DepfileError::InvalidUtf8 {
        path: path.to_path_buf(),
    })?;
    parse(content)
}
