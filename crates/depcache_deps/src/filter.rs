//! Validity predicates applied to reparsed dependency lists.

use std::path::{Path, PathBuf};

/// Decides which discovered dependencies are dropped during reconciliation.
///
/// The source file of a record is never passed through the filter.
pub trait PathFilter {
    /// Returns `true` if `path` must not be recorded as a dependency.
    fn is_excluded(&self, path: &str) -> bool;
}

impl<F> PathFilter for F
where
    F: Fn(&str) -> bool,
{
    fn is_excluded(&self, path: &str) -> bool {
        self(path)
    }
}

/// Excludes absolute paths outside every project root, such as system headers.
///
/// Relative paths are taken to be inside the project.
#[derive(Debug, Clone)]
pub struct OutsideProject {
    roots: Vec<PathBuf>,
}

impl OutsideProject {
    /// Creates a filter keeping only paths under one of `roots`.
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }
}

impl PathFilter for OutsideProject {
    fn is_excluded(&self, path: &str) -> bool {
        let path = Path::new(path);
        path.is_absolute() && !self.roots.iter().any(|root| path.starts_with(root))
    }
}
