//! Entry point tying reconciliation, output and cleanup together.

/// Dependency tracking for the objects of one build target.
///
/// The three operations live next to their implementations:
/// [`check_dependencies`](CompilerDepends::check_dependencies),
/// [`write_dependencies`](CompilerDepends::write_dependencies) and
/// [`clear_dependencies`](CompilerDepends::clear_dependencies).
#[derive(Debug, Clone, Copy, Default)]
pub struct CompilerDepends {
    pub(crate) verbose: bool,
}

impl CompilerDepends {
    /// Creates a quiet instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables reporting of every depfile that triggers a reparse.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Whether reparses are reported.
    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
