//! Compile records: one translation unit's dependency-tracking inputs.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors produced while building or loading compile records.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// A format name other than `gcc`, `flat` or `msvc`.
    #[error("unknown dependency file format '{0}'")]
    UnknownFormat(String),

    /// A flat record sequence whose length is not a multiple of four.
    #[error("record sequence has {0} trailing field(s); expected groups of 4")]
    TrailingFields(usize),

    /// The record batch file could not be read.
    #[error("failed to read records from {path}: {source}")]
    Io {
        /// The record batch path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The record batch file is not a valid JSON array of records.
    #[error("failed to parse records: {0}")]
    Parse(String),
}

/// The format of a compiler-generated dependency file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepFormat {
    /// A make-style depfile as written by `gcc -MD` and compatible drivers.
    #[serde(rename = "gcc")]
    GccDepfile,
    /// One dependency path per line.
    #[serde(rename = "flat", alias = "msvc")]
    FlatListing,
}

impl FromStr for DepFormat {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gcc" => Ok(DepFormat::GccDepfile),
            "flat" | "msvc" => Ok(DepFormat::FlatListing),
            other => Err(RecordError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for DepFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepFormat::GccDepfile => f.write_str("gcc"),
            DepFormat::FlatListing => f.write_str("flat"),
        }
    }
}

/// Dependency-tracking descriptor for a single compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileRecord {
    /// The file handed to the compiler.
    pub source: String,
    /// The object (or other output) produced from `source`.
    pub target: String,
    /// Format of the compiler-generated dependency file.
    pub format: DepFormat,
    /// Where the compiler writes its dependency file.
    #[serde(rename = "depfile")]
    pub dep_file: PathBuf,
}

impl CompileRecord {
    /// Creates a new compile record.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        format: DepFormat,
        dep_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            format,
            dep_file: dep_file.into(),
        }
    }

    /// Groups a flat `[source, target, format, depfile, ...]` sequence into
    /// records.
    pub fn from_flat<S: AsRef<str>>(fields: &[S]) -> Result<Vec<Self>, RecordError> {
        let chunks = fields.chunks_exact(4);
        let rest = chunks.remainder().len();
        if rest != 0 {
            return Err(RecordError::TrailingFields(rest));
        }
        chunks
            .map(|chunk| -> Result<Self, RecordError> {
                Ok(CompileRecord::new(
                    chunk[0].as_ref(),
                    chunk[1].as_ref(),
                    chunk[2].as_ref().parse::<DepFormat>()?,
                    chunk[3].as_ref(),
                ))
            })
            .collect()
    }
}

/// Reads a JSON array of compile records from `path`.
pub fn load_records(path: &Path) -> Result<Vec<CompileRecord>, RecordError> {
    let content = std::fs::read_to_string(path).map_err(|e| RecordError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| RecordError::Parse(e.to_string()))
}
