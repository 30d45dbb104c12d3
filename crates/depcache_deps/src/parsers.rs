//! Readers for the two compiler dependency file formats.
//!
//! Both return the raw dependency list of one record, or `None` when the file
//! cannot be used; the caller then keeps the previous cache entry.

use std::path::Path;

use tracing::{debug, warn};

/// Reads a one-path-per-line listing.
///
/// When `prepend_source` is set, `source` becomes the first entry.
pub(crate) fn flat_listing(path: &Path, source: &str, prepend_source: bool) -> Option<Vec<String>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "cannot read dependency listing");
            return None;
        }
    };
    let mut depends = Vec::new();
    if prepend_source {
        depends.push(source.to_string());
    }
    depends.extend(
        content
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.is_empty())
            .map(str::to_string),
    );
    Some(depends)
}

/// Reads a make-style depfile and returns the prerequisites of its first rule.
///
/// The compiler writes one rule per object, so later rules (such as the
/// phony header rules of `-MP`) are ignored. A leading `target` prerequisite
/// (in either its given or normalized spelling) is dropped, as some drivers
/// list the object as its own dependency.
pub(crate) fn gcc_depfile(path: &Path, target: &str) -> Option<Vec<String>> {
    let entries = match depcache_depfile::read_depfile(path) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring malformed depfile");
            return None;
        }
    };
    let mut depends = entries.into_iter().next()?.paths;
    if depends.is_empty() {
        debug!(path = %path.display(), "depfile lists no dependencies");
        return None;
    }
    if depends[0] == target || depends[0] == depcache_depfile::normalize_path(target) {
        depends.remove(0);
    }
    Some(depends)
}
