//! Removal of compiler depfiles.

use depcache_common::CompileRecord;
use tracing::debug;

use crate::depends::CompilerDepends;

impl CompilerDepends {
    /// Deletes the depfile of every record.
    ///
    /// Best effort: files that are already gone or cannot be removed are
    /// skipped. Used when abandoning a build step, so that leftover depfiles
    /// cannot later look newer than a regenerated internal file.
    pub fn clear_dependencies(&self, records: &[CompileRecord]) {
        for record in records {
            match std::fs::remove_file(&record.dep_file) {
                Ok(()) => debug!(depfile = %record.dep_file.display(), "removed depfile"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    debug!(depfile = %record.dep_file.display(), error = %e, "cannot remove depfile")
                }
            }
        }
    }
}
