//! Error taxonomy.
//!
//! Two tiers, mirroring the run lifecycle: `AnalysisError` is fatal and
//! aborts a run before any event is processed (no partial report);
//! `ModuleError` is scoped to one module and is isolated by the dispatcher
//! and aggregator so the rest of the run completes normally.

use thiserror::Error;

/// Fatal setup errors. If one of these is returned, no report exists.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The declared dependency graph contains a cycle. The path runs from
    /// the first repeated module back to itself.
    #[error("cyclic module dependency: {}", .cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<&'static str> },

    /// A module declared a dependency on a type the registry doesn't know.
    #[error("module `{module}` depends on `{dependency}`, which is not registered")]
    MissingDependency {
        module: &'static str,
        dependency: &'static str,
    },

    /// A module constructor failed. Nothing is retried; the run is aborted.
    #[error("construction of module `{module}` failed")]
    ModuleConstruction {
        module: &'static str,
        #[source]
        source: ModuleError,
    },
}

impl AnalysisError {
    /// The modules forming the cycle, in visit order, for a
    /// [`AnalysisError::CyclicDependency`]; empty otherwise.
    pub fn cycle(&self) -> &[&'static str] {
        match self {
            AnalysisError::CyclicDependency { cycle } => cycle,
            _ => &[],
        }
    }
}

/// A failure scoped to one module: raised from its constructor, an event
/// handler, or an output method.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// A module asked for a dependency instance it never declared.
    #[error("dependency `{dependency}` is not declared by module `{module}`")]
    UndeclaredDependency {
        module: &'static str,
        dependency: &'static str,
    },

    /// A declared dependency was not available at injection time. With a
    /// well-formed registry the resolver makes this unreachable; it is kept
    /// as an error rather than a panic so a malformed registry stays
    /// diagnosable.
    #[error("dependency `{dependency}` of module `{module}` was not resolved")]
    UnresolvedDependency {
        module: &'static str,
        dependency: &'static str,
    },

    /// A module-defined failure with a human-readable cause.
    #[error("{0}")]
    Failed(String),
}

impl ModuleError {
    pub fn failed(cause: impl Into<String>) -> Self {
        ModuleError::Failed(cause.into())
    }
}
