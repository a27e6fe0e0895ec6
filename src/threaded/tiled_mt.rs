//! Multi-threaded tiled GEMM, one task per tile-row.

use super::dispatch::for_each_row_block;
use crate::blocked::tiled::tiled_row_block;

/// Multi-threaded tiled multiplication: C += A * B.
///
/// Rows are cut into blocks of `tile` rows (the last one may be shorter),
/// and each block runs the full (K, J) tiled pass on its own slice of C.
/// The blocks line up with the sequential kernel's I-tiles, so every cell
/// is accumulated in the same order and the result is bit-identical to
/// [`matmul_tiled`](crate::blocked::tiled::matmul_tiled).
///
/// # Panics
///
/// Panics if the slice sizes don't match m, n, k or if `tile` is zero.
pub fn matmul_tiled_mt(
    a: &[f64],
    b: &[f64],
    c: &mut [f64],
    m: usize,
    n: usize,
    k: usize,
    tile: usize,
) {
    assert_eq!(a.len(), m * k, "A: expected {}x{}={} elements", m, k, m * k);
    assert_eq!(b.len(), k * n, "B: expected {}x{}={} elements", k, n, k * n);
    assert_eq!(c.len(), m * n, "C: expected {}x{}={} elements", m, n, m * n);
    assert!(tile > 0, "tile size must be positive");

    for_each_row_block(c, n, tile, |rows, c_block| {
        tiled_row_block(a, b, c_block, rows, n, k, tile);
    });
}
