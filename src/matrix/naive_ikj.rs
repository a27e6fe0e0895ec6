/// Cache-friendly matrix multiplication using i-k-j loop order.
///
/// By swapping the j and k loops, the innermost loop now accesses both
/// B and C sequentially (stride 1). For a fixed row `i`, every `C[i][j]`
/// still receives its products with `p` ascending, one sweep of `j` per
/// `p`, so the result is bit-identical to [`matmul_naive_ijk`].
///
/// [`matmul_naive_ijk`]: super::naive_ijk::matmul_naive_ijk
///
/// # Arguments
///
/// * `a` - Matrix A (m × k), row-major
/// * `b` - Matrix B (k × n), row-major
/// * `c` - Matrix C (m × n), row-major, accumulated into (C += A * B)
/// * `m` - Rows of A and C
/// * `n` - Columns of B and C
/// * `k` - Columns of A, rows of B
pub fn matmul_naive_ikj(a: &[f64], b: &[f64], c: &mut [f64], m: usize, n: usize, k: usize) {
    for i in 0..m {
        ikj_row(
            &a[i * k..(i + 1) * k],
            b,
            &mut c[i * n..(i + 1) * n],
            n,
            k,
        );
    }
}

/// One output row of the i-k-j kernel: `c_row += a_row * B`.
///
/// `a_row` has length `k`, `c_row` has length `n`.
#[inline]
pub fn ikj_row(a_row: &[f64], b: &[f64], c_row: &mut [f64], n: usize, k: usize) {
    for p in 0..k {
        let a_ip = a_row[p];
        let b_row = &b[p * n..(p + 1) * n];
        for (c_ij, &b_pj) in c_row.iter_mut().zip(b_row) {
            *c_ij += a_ip * b_pj;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::naive_ijk::matmul_naive_ijk;

    #[test]
    fn test_bit_identical_to_ijk() {
        let (m, n, k) = (7, 11, 13);
        // Non-integral values so rounding depends on summation order.
        let a: Vec<f64> = (0..m * k).map(|i| ((i * 37) % 101) as f64 / 7.0 - 6.5).collect();
        let b: Vec<f64> = (0..k * n).map(|i| ((i * 53) % 97) as f64 / 3.0 - 15.1).collect();

        let mut c_ijk = vec![0.0; m * n];
        let mut c_ikj = vec![0.0; m * n];
        matmul_naive_ijk(&a, &b, &mut c_ijk, m, n, k);
        matmul_naive_ikj(&a, &b, &mut c_ikj, m, n, k);

        assert_eq!(c_ijk, c_ikj);
    }

    #[test]
    fn test_2x3_times_3x2() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
        let mut c = [0.0; 4];
        matmul_naive_ikj(&a, &b, &mut c, 2, 2, 3);
        assert_eq!(c, [58.0, 64.0, 139.0, 154.0]);
    }
}
