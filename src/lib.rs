//! Matrix multiplication micro-benchmarks: naive loops, loop interchange,
//! cache tiling and row-parallel execution.
//!
//! Every variant computes `Z = X * Y` by adding `X[i][k] * Y[k][j]` into
//! `Z[i][j]` with `k` ascending, starting from zero. They differ only in
//! how they walk memory and how they split work, so their results are
//! bit-identical and the benchmark compares them with exact equality.
//!
//! ## Usage
//!
//! ```
//! use matbench::{Matrix, multiply_reference, multiply_tiled};
//!
//! let x = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
//! let y = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]);
//!
//! let z = multiply_reference(&x, &y);
//! assert_eq!(z, Matrix::from_rows(&[[19.0, 22.0], [43.0, 50.0]]));
//! assert_eq!(multiply_tiled(&x, &y, 1), z);
//! ```
//!
//! Each kernel variant is also available through [`Variant`], which is
//! what the benchmark runner iterates over:
//!
//! ```
//! use matbench::{DEFAULT_TILE, Matrix, Variant};
//!
//! let x = Matrix::from_fn(64, 48, |r, c| (r + c) as f64);
//! let y = Matrix::from_fn(48, 32, |r, c| (r * c % 7) as f64);
//! let reference = Variant::Reference.run(&x, &y, DEFAULT_TILE);
//!
//! for variant in Variant::ALL {
//!     assert_eq!(variant.run(&x, &y, DEFAULT_TILE), reference);
//! }
//! ```
//!
//! ## What's inside
//!
//! - i-j-k reference kernel and i-k-j interchanged kernel
//! - Cache-blocked kernel with clipped edge tiles
//! - Row-parallel and tile-row-parallel kernels on a rayon pool
//! - Exact equivalence checks and a streaming vector-expression benchmark

pub mod blocked;
pub mod config;
pub mod error;
pub mod expr;
pub mod harness;
pub mod logging;
pub mod matrix;
pub mod threaded;
pub mod verify;

pub use blocked::DEFAULT_TILE;
pub use config::{ExprConfig, MatmulConfig};
pub use error::{MatbenchError, Result};
pub use matrix::Matrix;
pub use matrix::naive_ijk::matmul_naive_ijk;
pub use matrix::naive_ikj::matmul_naive_ikj;
pub use verify::{ensure_equivalent, matrices_equal};

use std::fmt;

/// Z = X * Y with the i-j-k loop order. This is the reference result.
///
/// # Panics
///
/// Panics if `x.cols() != y.rows()`.
pub fn multiply_reference(x: &Matrix, y: &Matrix) -> Matrix {
    product(x, y, matmul_naive_ijk)
}

/// Z = X * Y with the i-k-j loop order.
pub fn multiply_interchanged(x: &Matrix, y: &Matrix) -> Matrix {
    product(x, y, matmul_naive_ikj)
}

/// Z = X * Y, cache-blocked with tiles of edge `tile`.
///
/// # Panics
///
/// Panics if `tile` is zero or the inner dimensions differ.
pub fn multiply_tiled(x: &Matrix, y: &Matrix, tile: usize) -> Matrix {
    product(x, y, |a, b, c, m, n, k| {
        blocked::matmul_tiled(a, b, c, m, n, k, tile)
    })
}

/// Z = X * Y, i-j-k body, one parallel task per row.
pub fn multiply_parallel_naive(x: &Matrix, y: &Matrix) -> Matrix {
    product(x, y, threaded::matmul_naive_ijk_mt)
}

/// Z = X * Y, i-k-j body, one parallel task per row.
pub fn multiply_parallel_fine(x: &Matrix, y: &Matrix) -> Matrix {
    product(x, y, threaded::matmul_naive_ikj_mt)
}

/// Z = X * Y, tiled body, one parallel task per block of `tile` rows.
pub fn multiply_parallel_tiled(x: &Matrix, y: &Matrix, tile: usize) -> Matrix {
    product(x, y, |a, b, c, m, n, k| {
        threaded::matmul_tiled_mt(a, b, c, m, n, k, tile)
    })
}

// Allocate a zeroed Z and run one slice kernel into it.
fn product<F>(x: &Matrix, y: &Matrix, kernel: F) -> Matrix
where
    F: FnOnce(&[f64], &[f64], &mut [f64], usize, usize, usize),
{
    assert_eq!(
        x.cols(),
        y.rows(),
        "inner dimensions differ: {}x{} * {}x{}",
        x.rows(),
        x.cols(),
        y.rows(),
        y.cols()
    );
    let (m, k, n) = (x.rows(), x.cols(), y.cols());
    let mut z = Matrix::zeros(m, n);
    kernel(x.as_slice(), y.as_slice(), z.as_mut_slice(), m, n, k);
    z
}

/// The kernel strategies the benchmark compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// i-j-k loops, single thread
    Reference,
    /// i-k-j loops, single thread
    Interchanged,
    /// Cache-blocked i-k-j, single thread
    Tiled,
    /// i-j-k loops, one task per row
    ParallelNaive,
    /// i-k-j loops, one task per row
    ParallelInterchanged,
    /// Cache-blocked, one task per tile-row
    ParallelTiled,
}

impl Variant {
    /// All variants, reference first.
    pub const ALL: [Variant; 6] = [
        Variant::Reference,
        Variant::Interchanged,
        Variant::Tiled,
        Variant::ParallelNaive,
        Variant::ParallelInterchanged,
        Variant::ParallelTiled,
    ];

    /// Human-readable name used in reports and errors.
    pub fn name(self) -> &'static str {
        match self {
            Variant::Reference => "Naive (i-j-k)",
            Variant::Interchanged => "Interchanged (i-k-j)",
            Variant::Tiled => "Tiled",
            Variant::ParallelNaive => "Naive (i-j-k) MT",
            Variant::ParallelInterchanged => "Interchanged (i-k-j) MT",
            Variant::ParallelTiled => "Tiled MT",
        }
    }

    pub fn is_parallel(self) -> bool {
        matches!(
            self,
            Variant::ParallelNaive | Variant::ParallelInterchanged | Variant::ParallelTiled
        )
    }

    /// Compute `x * y` with this variant. `tile` is ignored by untiled variants.
    pub fn run(self, x: &Matrix, y: &Matrix, tile: usize) -> Matrix {
        match self {
            Variant::Reference => multiply_reference(x, y),
            Variant::Interchanged => multiply_interchanged(x, y),
            Variant::Tiled => multiply_tiled(x, y, tile),
            Variant::ParallelNaive => multiply_parallel_naive(x, y),
            Variant::ParallelInterchanged => multiply_parallel_fine(x, y),
            Variant::ParallelTiled => multiply_parallel_tiled(x, y, tile),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_variants_on_known_product() {
        let x = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let y = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]);
        let expected = Matrix::from_rows(&[[19.0, 22.0], [43.0, 50.0]]);

        for variant in Variant::ALL {
            for tile in [1, 2, 64] {
                assert_eq!(variant.run(&x, &y, tile), expected, "{} tile {}", variant, tile);
            }
        }
    }

    #[test]
    fn test_output_shape() {
        let x = Matrix::zeros(3, 5);
        let y = Matrix::zeros(5, 7);
        assert_eq!(multiply_parallel_tiled(&x, &y, 2).shape(), (3, 7));
    }

    #[test]
    #[should_panic(expected = "inner dimensions differ")]
    fn test_inner_dimension_mismatch_panics() {
        let _ = multiply_reference(&Matrix::zeros(2, 3), &Matrix::zeros(2, 3));
    }

    #[test]
    fn test_only_reference_is_first() {
        assert_eq!(Variant::ALL[0], Variant::Reference);
        assert_eq!(Variant::ALL.iter().filter(|v| v.is_parallel()).count(), 3);
    }
}
