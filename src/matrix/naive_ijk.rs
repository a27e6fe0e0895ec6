/// Naive matrix multiplication using i-j-k loop order.
///
/// This is the textbook triple-loop implementation and the reference every
/// other kernel is checked against. Each `C[i][j]` receives its products
/// with `p` strictly ascending, which fixes the floating-point result.
///
/// It's slow because the innermost loop walks B with stride `n`
/// (column-wise), missing cache on nearly every iteration.
///
/// # Arguments
///
/// * `a` - Matrix A (m × k), row-major
/// * `b` - Matrix B (k × n), row-major
/// * `c` - Matrix C (m × n), row-major, accumulated into (C += A * B)
/// * `m` - Rows of A and C
/// * `n` - Columns of B and C
/// * `k` - Columns of A, rows of B
pub fn matmul_naive_ijk(a: &[f64], b: &[f64], c: &mut [f64], m: usize, n: usize, k: usize) {
    for i in 0..m {
        ijk_row(
            &a[i * k..(i + 1) * k],
            b,
            &mut c[i * n..(i + 1) * n],
            n,
            k,
        );
    }
}

/// One output row of the i-j-k kernel: `c_row += a_row * B`.
///
/// `a_row` has length `k`, `c_row` has length `n`.
#[inline]
pub fn ijk_row(a_row: &[f64], b: &[f64], c_row: &mut [f64], n: usize, k: usize) {
    for (j, c_ij) in c_row.iter_mut().enumerate() {
        for p in 0..k {
            *c_ij += a_row[p] * b[p * n + j];
        }
    }
}
