//! Benchmark setup error type.

use complexsplit_core::{SplitError, UnionFindError};

/// Errors that may occur while preparing benchmark inputs.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Building or running the splitter failed.
    #[error("split pipeline failed: {0}")]
    Split(#[from] SplitError),
    /// A disjoint-set engine rejected its input.
    #[error("disjoint-set engine failed: {0}")]
    UnionFind(#[from] UnionFindError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// The parameter that was unexpectedly zero.
        context: &'static str,
    },
}
