//! Configuration types deserialized from `depcache.toml`.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Line continuation written between prerequisites in the make file.
pub const DEFAULT_LINE_CONTINUE: &str = "\\\n";

/// The top-level configuration parsed from `depcache.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependsConfig {
    /// Source and build tree locations.
    #[serde(default)]
    pub project: ProjectPaths,
    /// Formatting policy for the make-facing dependency file.
    #[serde(default)]
    pub make: MakeFormat,
    /// Reconciliation options.
    #[serde(default)]
    pub scan: ScanConfig,
}

/// Source and build tree locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectPaths {
    /// Top of the source tree.
    #[serde(default)]
    pub source_dir: Option<PathBuf>,
    /// Top of the build tree; make-file paths are written relative to it.
    #[serde(default = "default_binary_dir")]
    pub binary_dir: PathBuf,
}

impl Default for ProjectPaths {
    fn default() -> Self {
        Self {
            source_dir: None,
            binary_dir: default_binary_dir(),
        }
    }
}

impl ProjectPaths {
    /// The directories inside which paths are considered part of the project.
    pub fn roots(&self) -> Vec<&Path> {
        let mut roots: Vec<&Path> = self.source_dir.iter().map(PathBuf::as_path).collect();
        roots.push(&self.binary_dir);
        roots
    }
}

fn default_binary_dir() -> PathBuf {
    PathBuf::from(".")
}

/// How paths are spelled in the make-facing dependency file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathStyle {
    /// Escape characters that GNU make treats specially.
    #[default]
    GnuMake,
    /// Write paths unchanged.
    Verbatim,
}

/// Formatting policy for the make-facing dependency file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MakeFormat {
    /// Token that continues a rule onto the next line.
    #[serde(default = "default_line_continue")]
    pub line_continue: String,
    /// Path spelling.
    #[serde(default)]
    pub path_style: PathStyle,
}

impl Default for MakeFormat {
    fn default() -> Self {
        Self {
            line_continue: default_line_continue(),
            path_style: PathStyle::default(),
        }
    }
}

fn default_line_continue() -> String {
    DEFAULT_LINE_CONTINUE.to_string()
}

/// Reconciliation options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Drop dependencies that lie outside the source and build trees.
    #[serde(default)]
    pub in_project_only: bool,
    /// Report every depfile that triggers a reparse.
    #[serde(default)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DependsConfig::default();
        assert_eq!(config.project.binary_dir, PathBuf::from("."));
        assert!(config.project.source_dir.is_none());
        assert_eq!(config.make.line_continue, "\\\n");
        assert_eq!(config.make.path_style, PathStyle::GnuMake);
        assert!(!config.scan.in_project_only);
        assert!(!config.scan.verbose);
    }

    #[test]
    fn roots_include_both_trees() {
        let paths = ProjectPaths {
            source_dir: Some(PathBuf::from("/src")),
            binary_dir: PathBuf::from("/src/build"),
        };
        assert_eq!(
            paths.roots(),
            vec![Path::new("/src"), Path::new("/src/build")]
        );
    }

    #[test]
    fn roots_without_source_dir() {
        let paths = ProjectPaths::default();
        assert_eq!(paths.roots(), vec![Path::new(".")]);
    }
}
