//! Reconciliation of the dependency cache with compiler depfiles.
//!
//! A record is reparsed when no usable internal dependency file exists or
//! when its depfile is newer than that file. Reparsed lists replace the cached
//! entry for the record's target; records whose depfile is missing or
//! unusable keep their previous entry.

use std::path::Path;

use depcache_common::{CompileRecord, DepFormat, FileTime};
use depcache_depfile::normalize_path;
use tracing::{debug, info};

use crate::depends::CompilerDepends;
use crate::filter::PathFilter;
use crate::internal::{load_internal, DependencyMap};
use crate::parsers;

impl CompilerDepends {
    /// Brings `dependencies` up to date with the depfiles of `records`.
    ///
    /// Entries read from `internal_dep_file` are appended to the matching
    /// entries of `dependencies` first. When `filter` is given, every
    /// dependency it excludes is dropped from reparsed lists; the source file
    /// is always kept at index 0.
    ///
    /// Returns `true` if no record needed reparsing, i.e. the internal file
    /// is still valid and need not be rewritten.
    pub fn check_dependencies(
        &self,
        internal_dep_file: &Path,
        records: &[CompileRecord],
        dependencies: &mut DependencyMap,
        filter: Option<&dyn PathFilter>,
    ) -> bool {
        let mut status = true;

        let cache = load_internal(internal_dep_file);
        let cache_time = cache.modified;
        for (target, deps) in cache.dependencies {
            dependencies.entry(target).or_default().extend(deps);
        }

        for record in records {
            if !record.dep_file.exists() {
                debug!(depfile = %record.dep_file.display(), "depfile missing, keeping cached entry");
                continue;
            }

            let stale = match &cache_time {
                None => true,
                Some(cache_time) => match FileTime::load(&record.dep_file) {
                    Ok(dep_time) => dep_time.newer(cache_time),
                    Err(_) => true,
                },
            };
            if !stale {
                continue;
            }

            status = false;
            if self.verbose {
                info!(
                    "Dependencies file \"{}\" is newer than depends file \"{}\".",
                    record.dep_file.display(),
                    internal_dep_file.display()
                );
            }

            let parsed = match record.format {
                DepFormat::FlatListing => {
                    parsers::flat_listing(&record.dep_file, &record.source, filter.is_none())
                }
                DepFormat::GccDepfile => parsers::gcc_depfile(&record.dep_file, &record.target),
            };
            let Some(mut depends) = parsed else {
                continue;
            };

            order_dependencies(&mut depends, &record.source, filter);
            dependencies.insert(record.target.clone(), depends);
        }

        status
    }
}

/// Moves `source` to the front of `depends` and applies `filter` to the rest.
///
/// Depfile paths are normalized, so `source` also matches in its normalized
/// spelling; index 0 always holds `source` exactly as the record names it.
fn order_dependencies(depends: &mut Vec<String>, source: &str, filter: Option<&dyn PathFilter>) {
    let normalized = normalize_path(source);
    let is_source = |dep: &str| dep == source || dep == normalized;

    if depends.first().is_some_and(|dep| is_source(dep.as_str())) {
        // Taken out so the filter never sees it; reinserted below.
        depends.remove(0);
    } else {
        depends.retain(|dep| !is_source(dep.as_str()));
    }

    if let Some(filter) = filter {
        depends.retain(|dep| !filter.is_excluded(dep));
    }
    depends.insert(0, source.to_string());
}
