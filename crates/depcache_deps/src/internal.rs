//! The internal dependency file: the cache read back on the next run.
//!
//! Line-oriented text. A line not starting with a space names a target; each
//! following line starting with a single space is one of its dependencies.
//! Blank lines and lines starting with `#` are ignored, and a trailing `\r`
//! is dropped from every line.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use depcache_common::FileTime;
use tracing::debug;

/// Dependencies per target, each list starting with the target's source file.
pub type DependencyMap = BTreeMap<String, Vec<String>>;

/// Contents and age of an internal dependency file.
#[derive(Debug, Clone, Default)]
pub struct InternalFile {
    /// Modification time of the file, or `None` when every depfile must be
    /// reparsed (missing file, unreadable file or unreadable timestamp).
    pub modified: Option<FileTime>,

    /// The cached dependency lists.
    pub dependencies: DependencyMap,
}

/// Loads the internal dependency file at `path`.
///
/// Never fails: a missing or unreadable file yields an empty map with no
/// timestamp, and a truncated file yields whatever entries were complete.
pub fn load_internal(path: &Path) -> InternalFile {
    if !path.exists() {
        debug!(path = %path.display(), "internal dependency file missing");
        return InternalFile::default();
    }
    let content = match std::fs::read(path).map(String::from_utf8) {
        Ok(Ok(content)) => content,
        Ok(Err(_)) => {
            debug!(path = %path.display(), "internal dependency file is not UTF-8, ignoring it");
            return InternalFile::default();
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "cannot read internal dependency file");
            return InternalFile::default();
        }
    };
    let modified = FileTime::load(path).ok();
    InternalFile {
        modified,
        dependencies: parse_internal(&content),
    }
}

/// Decodes the text of an internal dependency file.
pub fn parse_internal(content: &str) -> DependencyMap {
    let mut dependencies = DependencyMap::new();
    let mut current: Option<(String, Vec<String>)> = None;
    for line in content.split('\n') {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            continue;
        }
        match line.strip_prefix(' ') {
            None => {
                if let Some((target, deps)) = current.take() {
                    dependencies.entry(target).or_default().extend(deps);
                }
                current = Some((line.to_string(), Vec::new()));
            }
            // Dependencies before the first target have nowhere to go.
            Some(dep) => {
                if let Some((_, deps)) = current.as_mut() {
                    deps.push(dep.to_string());
                }
            }
        }
    }
    if let Some((target, deps)) = current {
        dependencies.entry(target).or_default().extend(deps);
    }
    dependencies
}

/// Encodes `dependencies` in the internal dependency file format.
pub fn write_internal(dependencies: &DependencyMap, out: &mut impl Write) -> std::io::Result<()> {
    for (target, deps) in dependencies {
        writeln!(out, "{target}")?;
        for dep in deps {
            writeln!(out, " {dep}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
