//! Error types for the benchmark harness.
//!
//! The kernels themselves cannot fail. What can go wrong is an optimized
//! variant drifting away from the reference result, which is always a bug
//! in the variant and is treated as fatal by the runner.

use thiserror::Error;

/// Errors reported by the harness.
#[derive(Debug, Error)]
pub enum MatbenchError {
    /// A matrix variant produced a different value than the reference kernel.
    #[error(
        "{variant}: result differs from reference at ({row}, {col}): expected {expected:e}, got {actual:e}"
    )]
    CorrectnessViolation {
        /// Variant that produced the result
        variant: String,
        /// Row of the first differing element
        row: usize,
        /// Column of the first differing element
        col: usize,
        /// Reference value
        expected: f64,
        /// Value produced by the variant
        actual: f64,
    },

    /// A matrix variant produced a result of the wrong shape.
    #[error("{variant}: result is {}x{}, expected {}x{}", .actual.0, .actual.1, .expected.0, .expected.1)]
    ShapeMismatch {
        /// Variant that produced the result
        variant: String,
        /// (rows, cols) of the reference
        expected: (usize, usize),
        /// (rows, cols) of the variant's result
        actual: (usize, usize),
    },

    /// A vector-expression strategy produced a different value than the loop version.
    #[error("{variant}: output differs at index {index}: expected {expected:e}, got {actual:e}")]
    OutputMismatch {
        /// Strategy that produced the output
        variant: String,
        /// Index of the first differing element
        index: usize,
        /// Reference value
        expected: f64,
        /// Value produced by the strategy
        actual: f64,
    },

    /// Run configuration rejected before any kernel ran.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, MatbenchError>;
