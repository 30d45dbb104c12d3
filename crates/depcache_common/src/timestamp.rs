//! File modification times for staleness detection.

use std::fmt;
use std::path::Path;

/// The last-modification time of a file.
///
/// Only supports ordering comparisons: a depfile is stale relative to the
/// dependency cache when its `FileTime` is [`newer`](FileTime::newer) than the
/// cache file's.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileTime(filetime::FileTime);

impl FileTime {
    /// Reads the modification time of the file at `path`.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let meta = std::fs::metadata(path)?;
        Ok(Self(filetime::FileTime::from_last_modification_time(&meta)))
    }

    /// Creates a marker from seconds and nanoseconds since the Unix epoch.
    pub fn from_unix_time(seconds: i64, nanos: u32) -> Self {
        Self(filetime::FileTime::from_unix_time(seconds, nanos))
    }

    /// Returns `true` if `self` is strictly newer than `other`.
    pub fn newer(&self, other: &FileTime) -> bool {
        self.0 > other.0
    }
}

impl fmt::Debug for FileTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FileTime({}.{:09})",
            self.0.unix_seconds(),
            self.0.nanoseconds()
        )
    }
}
