//! Output of the reconciled dependencies.
//!
//! The make fragment declares, per target, a rule whose first prerequisite is
//! the compiled source followed by every discovered dependency. Each
//! discovered dependency also gets an empty rule of its own, so make does not
//! fail when a header is later deleted or renamed.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Component, Path};

use depcache_config::{DependsConfig, PathStyle};

use crate::depends::CompilerDepends;
use crate::error::DependsError;
use crate::internal::{write_internal, DependencyMap};

/// Converts a path into the spelling expected by the build tool.
pub trait PathConverter {
    /// Returns `path` as it must appear in the make fragment.
    fn to_make_path(&self, path: &str) -> String;
}

impl PathConverter for PathStyle {
    fn to_make_path(&self, path: &str) -> String {
        match self {
            PathStyle::Verbatim => path.to_string(),
            PathStyle::GnuMake => {
                let mut out = String::with_capacity(path.len());
                for c in path.chars() {
                    match c {
                        '$' => out.push_str("$$"),
                        ' ' => out.push_str("\\ "),
                        '#' => out.push_str("\\#"),
                        _ => out.push(c),
                    }
                }
                out
            }
        }
    }
}

/// Formatting policy for the make fragment.
pub struct MakePolicy<'a> {
    /// Token continuing a rule onto the next line.
    pub line_continue: &'a str,
    /// Base directory for relative paths.
    pub binary_dir: &'a Path,
    /// Trees within which paths may be made relative to `binary_dir`.
    pub roots: Vec<&'a Path>,
    /// Path spelling.
    pub converter: &'a dyn PathConverter,
}

impl<'a> MakePolicy<'a> {
    /// Builds the policy described by a configuration.
    pub fn from_config(config: &'a DependsConfig) -> Self {
        Self {
            line_continue: &config.make.line_continue,
            binary_dir: &config.project.binary_dir,
            roots: config.project.roots(),
            converter: &config.make.path_style,
        }
    }

    /// Rewrites `path` relative to the binary directory when both lie in the
    /// same project tree; otherwise returns it unchanged.
    pub fn maybe_relative(&self, path: &str) -> String {
        let p = Path::new(path);
        if !p.is_absolute() || !self.binary_dir.is_absolute() {
            return path.to_string();
        }
        let shared_root = self
            .roots
            .iter()
            .any(|root| p.starts_with(root) && self.binary_dir.starts_with(root));
        if !shared_root {
            return path.to_string();
        }
        relative_path(self.binary_dir, p)
    }

    fn make_path(&self, path: &str) -> String {
        self.converter.to_make_path(&self.maybe_relative(path))
    }
}

/// Spells `path` relative to `base`; both must be absolute.
fn relative_path(base: &Path, path: &Path) -> String {
    let base: Vec<Component<'_>> = base.components().filter(|c| *c != Component::CurDir).collect();
    let path: Vec<Component<'_>> = path.components().filter(|c| *c != Component::CurDir).collect();
    let common = base.iter().zip(&path).take_while(|(a, b)| a == b).count();

    let mut parts: Vec<String> = std::iter::repeat("..".to_string())
        .take(base.len() - common)
        .collect();
    parts.extend(
        path[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// Writes the make fragment for `dependencies`.
///
/// Targets with an empty dependency list produce no rule.
pub fn write_make(
    dependencies: &DependencyMap,
    out: &mut impl Write,
    policy: &MakePolicy<'_>,
) -> std::io::Result<()> {
    let mut phony_targets = BTreeSet::new();

    for (target, deps) in dependencies {
        let Some((source, discovered)) = deps.split_first() else {
            continue;
        };
        write!(
            out,
            "{}: {}",
            policy.converter.to_make_path(target),
            policy.make_path(source)
        )?;
        for dep in discovered {
            let dep = policy.make_path(dep);
            write!(out, " {}  {}", policy.line_continue, dep)?;
            phony_targets.insert(dep);
        }
        write!(out, "\n\n")?;
    }

    for target in &phony_targets {
        write!(out, "\n{target}:\n")?;
    }
    Ok(())
}

impl CompilerDepends {
    /// Writes the make fragment to `make_depends` and the internal
    /// dependency file to `internal_depends`.
    pub fn write_dependencies(
        &self,
        dependencies: &DependencyMap,
        make_depends: &mut impl Write,
        internal_depends: &mut impl Write,
        policy: &MakePolicy<'_>,
    ) -> std::io::Result<()> {
        write_make(dependencies, make_depends, policy)?;
        write_internal(dependencies, internal_depends)
    }
}

/// Writes both dependency files to disk, replacing previous contents.
pub fn save_dependencies(
    dependencies: &DependencyMap,
    make_path: &Path,
    internal_path: &Path,
    policy: &MakePolicy<'_>,
) -> Result<(), DependsError> {
    write_file(make_path, |out| write_make(dependencies, out, policy))?;
    write_file(internal_path, |out| write_internal(dependencies, out))
}

fn write_file(
    path: &Path,
    body: impl FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
) -> Result<(), DependsError> {
    let io_err = |e| DependsError::Io {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut out = BufWriter::new(File::create(path).map_err(io_err)?);
    body(&mut out).map_err(io_err)?;
    out.flush().map_err(io_err)
}
