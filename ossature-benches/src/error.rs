//! Benchmark setup error type.

use ossature_core::ResolveError;

/// Errors that may occur while preparing a benchmark scene.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// A generated scene failed to resolve.
    #[error("scene resolution failed: {0}")]
    Resolve(#[from] ResolveError),
    /// A zero value was passed where a non-zero size was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// The parameter that was unexpectedly zero.
        context: &'static str,
    },
}
