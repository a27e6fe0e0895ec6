//! Multi-threaded untiled GEMM, one task per output row.

use super::dispatch::for_each_row_block;
use crate::matrix::naive_ijk::ijk_row;
use crate::matrix::naive_ikj::ikj_row;

/// Multi-threaded i-j-k multiplication: C += A * B.
///
/// Every row of C is its own task. Rows are computed exactly as the
/// sequential kernel computes them, so the result is bit-identical.
///
/// # Panics
///
/// Panics if the slice sizes don't match m, n, k.
pub fn matmul_naive_ijk_mt(a: &[f64], b: &[f64], c: &mut [f64], m: usize, n: usize, k: usize) {
    check_dims(a, b, c, m, n, k);

    for_each_row_block(c, n, 1, |rows, c_row| {
        let i = rows.start;
        ijk_row(&a[i * k..(i + 1) * k], b, c_row, n, k);
    });
}

/// Multi-threaded i-k-j multiplication: C += A * B.
///
/// Same partition as [`matmul_naive_ijk_mt`], with the (k, j) inner loops.
///
/// # Panics
///
/// Panics if the slice sizes don't match m, n, k.
pub fn matmul_naive_ikj_mt(a: &[f64], b: &[f64], c: &mut [f64], m: usize, n: usize, k: usize) {
    check_dims(a, b, c, m, n, k);

    for_each_row_block(c, n, 1, |rows, c_row| {
        let i = rows.start;
        ikj_row(&a[i * k..(i + 1) * k], b, c_row, n, k);
    });
}

fn check_dims(a: &[f64], b: &[f64], c: &[f64], m: usize, n: usize, k: usize) {
    assert_eq!(a.len(), m * k, "A: expected {}x{}={} elements", m, k, m * k);
    assert_eq!(b.len(), k * n, "B: expected {}x{}={} elements", k, n, k * n);
    assert_eq!(c.len(), m * n, "C: expected {}x{}={} elements", m, n, m * n);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::naive_ijk::matmul_naive_ijk;

    #[test]
    fn test_row_parallel_matches_sequential() {
        let (m, n, k) = (37, 29, 31);
        let a: Vec<f64> = (0..m * k).map(|i| ((i * 13) % 71) as f64 / 11.0 - 3.1).collect();
        let b: Vec<f64> = (0..k * n).map(|i| ((i * 7) % 67) as f64 / 5.0 - 6.3).collect();

        let mut c_ref = vec![0.0; m * n];
        matmul_naive_ijk(&a, &b, &mut c_ref, m, n, k);

        let mut c_ijk = vec![0.0; m * n];
        matmul_naive_ijk_mt(&a, &b, &mut c_ijk, m, n, k);
        assert_eq!(c_ijk, c_ref);

        let mut c_ikj = vec![0.0; m * n];
        matmul_naive_ikj_mt(&a, &b, &mut c_ikj, m, n, k);
        assert_eq!(c_ikj, c_ref);
    }

    #[test]
    fn test_single_row() {
        let a = [1.0, 2.0, 3.0];
        let b = [1.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let mut c = [0.0; 2];
        matmul_naive_ikj_mt(&a, &b, &mut c, 1, 2, 3);
        assert_eq!(c, [4.0, 5.0]);
    }

    #[test]
    #[should_panic(expected = "A: expected")]
    fn test_rejects_short_a() {
        let mut c = [0.0; 4];
        matmul_naive_ijk_mt(&[1.0; 3], &[1.0; 4], &mut c, 2, 2, 2);
    }
}
