//! Exact result comparison.
//!
//! Every optimized variant reproduces the reference summation order, so
//! results are compared with plain IEEE-754 `==`, never a tolerance. A
//! single differing bit is a bug.

use crate::error::{MatbenchError, Result};
use crate::matrix::Matrix;

/// Index of the first element where `actual` differs from `expected`.
///
/// A length difference counts as a mismatch at the end of the shorter slice.
pub fn first_mismatch(expected: &[f64], actual: &[f64]) -> Option<usize> {
    expected
        .iter()
        .zip(actual)
        .position(|(e, a)| e != a)
        .or_else(|| (expected.len() != actual.len()).then_some(expected.len().min(actual.len())))
}

/// True iff both matrices have the same shape and equal elements.
pub fn matrices_equal(a: &Matrix, b: &Matrix) -> bool {
    a.shape() == b.shape() && first_mismatch(a.as_slice(), b.as_slice()).is_none()
}

/// Check a variant's result against the reference result.
///
/// # Errors
///
/// [`MatbenchError::ShapeMismatch`] if the shapes differ,
/// [`MatbenchError::CorrectnessViolation`] naming the first differing cell
/// otherwise.
pub fn ensure_equivalent(expected: &Matrix, actual: &Matrix, variant: &str) -> Result<()> {
    if expected.shape() != actual.shape() {
        return Err(MatbenchError::ShapeMismatch {
            variant: variant.to_string(),
            expected: expected.shape(),
            actual: actual.shape(),
        });
    }

    match first_mismatch(expected.as_slice(), actual.as_slice()) {
        None => Ok(()),
        Some(index) => {
            let cols = expected.cols();
            Err(MatbenchError::CorrectnessViolation {
                variant: variant.to_string(),
                row: index / cols,
                col: index % cols,
                expected: expected.as_slice()[index],
                actual: actual.as_slice()[index],
            })
        }
    }
}

/// Check a vector-expression output against the loop version.
///
/// # Errors
///
/// [`MatbenchError::OutputMismatch`] naming the first differing index.
pub fn ensure_outputs_equal(expected: &[f64], actual: &[f64], variant: &str) -> Result<()> {
    match first_mismatch(expected, actual) {
        None => Ok(()),
        Some(index) => Err(MatbenchError::OutputMismatch {
            variant: variant.to_string(),
            index,
            expected: expected.get(index).copied().unwrap_or(f64::NAN),
            actual: actual.get(index).copied().unwrap_or(f64::NAN),
        }),
    }
}
