//! Shared foundational types used across the depcache crates.
//!
//! This crate provides the file modification-time marker used for staleness
//! checks and the compile record type describing one translation unit's
//! dependency-tracking inputs.

#![warn(missing_docs)]

pub mod record;
pub mod timestamp;

pub use record::{load_records, CompileRecord, DepFormat, RecordError};
pub use timestamp::FileTime;
