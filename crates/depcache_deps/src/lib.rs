//! Incremental dependency tracking for compiled translation units.
//!
//! Reconciles the persisted dependency cache (the "internal" dependency file)
//! against the dependency files written by the compiler, and renders the
//! result both as a make fragment and as the internal file read back on the
//! next run. A dependency list produced here always starts with the compiled
//! source file; the remaining entries are the discovered dependencies.

#![warn(missing_docs)]

pub mod clear;
pub mod depends;
pub mod emit;
pub mod error;
pub mod filter;
pub mod internal;
mod parsers;
pub mod reconcile;

pub use depends::CompilerDepends;
pub use emit::{save_dependencies, write_make, MakePolicy, PathConverter};
pub use error::DependsError;
pub use filter::{OutsideProject, PathFilter};
pub use internal::{load_internal, parse_internal, write_internal, DependencyMap, InternalFile};
