//! Cache-blocked (tiled) GEMM.
//!
//! The (row, contraction, column) iteration space is cut into cubes of edge
//! `tile`. Cubes are visited in (I, K, J) order and the i-k-j loop runs
//! inside each one, accumulating into C across successive K-tiles.
//!
//! Because K-tiles arrive in ascending order and `p` ascends inside each
//! tile, every `C[i][j]` sees exactly the same sequence of additions as the
//! naive i-j-k kernel. Tiling changes the memory access pattern, never the
//! result.
//!
//! ## Choosing the tile size
//!
//! One cube touches a `tile × tile` slab of A, of B and of C. The point of
//! tiling is to keep those three slabs resident in a target cache level
//! while the cube is processed. With `f64` and the default of 64 that's
//! 3 × 32 KiB, sized for L2. Smaller tiles pay more loop overhead and
//! instructions per flop; larger tiles spill out of cache and the kernel
//! drifts back towards naive-loop locality.

use std::ops::Range;

/// Default tile edge length.
pub const DEFAULT_TILE: usize = 64;

/// One cube of the blocked iteration space.
///
/// Each range is half-open and already clipped to its dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileCoord {
    /// Rows of A and C (the I axis)
    pub rows: Range<usize>,
    /// Contraction indices (the K axis)
    pub inner: Range<usize>,
    /// Columns of B and C (the J axis)
    pub cols: Range<usize>,
}

/// Split `[0, len)` into consecutive tiles of `tile` elements.
///
/// The last tile is shorter when `tile` doesn't divide `len`, and a single
/// tile covers everything when `tile >= len`.
///
/// ```
/// use matbench::blocked::tiled::tile_ranges;
///
/// let tiles: Vec<_> = tile_ranges(5, 2).collect();
/// assert_eq!(tiles, vec![0..2, 2..4, 4..5]);
/// ```
///
/// # Panics
///
/// Panics if `tile` is zero.
pub fn tile_ranges(len: usize, tile: usize) -> impl Iterator<Item = Range<usize>> + Clone {
    clipped_tiles(0..len, tile)
}

fn clipped_tiles(span: Range<usize>, tile: usize) -> impl Iterator<Item = Range<usize>> + Clone {
    assert!(tile > 0, "tile size must be positive");
    let end = span.end;
    span.step_by(tile)
        .map(move |start| start..(start + tile).min(end))
}

/// Every cube covering `rows × [0, k) × [0, n)`, in (I, K, J) order.
///
/// `rows` is tiled starting from `rows.start`, so a row block handed to a
/// worker is cut the same way the sequential kernel cuts it.
pub fn tile_coords(
    rows: Range<usize>,
    k: usize,
    n: usize,
    tile: usize,
) -> impl Iterator<Item = TileCoord> {
    clipped_tiles(rows, tile).flat_map(move |row_tile| {
        tile_ranges(k, tile).flat_map(move |inner| {
            let row_tile = row_tile.clone();
            tile_ranges(n, tile).map(move |cols| TileCoord {
                rows: row_tile.clone(),
                inner: inner.clone(),
                cols,
            })
        })
    })
}

/// Tiled matrix multiplication: C += A * B.
///
/// Matrices are row-major: A is m×k, B is k×n, C is m×n.
///
/// # Panics
///
/// Panics if the slice sizes don't match m, n, k or if `tile` is zero.
pub fn matmul_tiled(
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

    tiled_row_block(a, b, c, 0..m, n, k, tile);
}

/// Full (K, J) tiled pass over one block of rows.
///
/// `c_block` holds exactly the rows in `rows` (length `rows.len() * n`),
/// so a worker only ever sees the part of C it owns.
pub fn tiled_row_block(
    a: &[f64],
    b: &[f64],
    c_block: &mut [f64],
    rows: Range<usize>,
    n: usize,
    k: usize,
    tile: usize,
) {
    assert!(rows.end * k <= a.len(), "A: rows {:?} out of range for k={}", rows, k);
    assert_eq!(b.len(), k * n, "B: expected {}x{}={} elements", k, n, k * n);
    assert_eq!(
        c_block.len(),
        rows.len() * n,
        "C block: expected {}x{}={} elements",
        rows.len(),
        n,
        rows.len() * n
    );

    let row0 = rows.start;
    for cube in tile_coords(rows, k, n, tile) {
        ikj_cube(a, b, c_block, row0, &cube, n, k);
    }
}

// i-k-j over one cube. `c_block` starts at row `row0` of C.
#[inline]
fn ikj_cube(
    a: &[f64],
    b: &[f64],
    c_block: &mut [f64],
    row0: usize,
    cube: &TileCoord,
    n: usize,
    k: usize,
) {
    let (j0, j1) = (cube.cols.start, cube.cols.end);

    for i in cube.rows.clone() {
        let a_row = &a[i * k..(i + 1) * k];
        let c_base = (i - row0) * n;
        let c_seg = &mut c_block[c_base + j0..c_base + j1];

        for p in cube.inner.clone() {
            let a_ip = a_row[p];
            let b_seg = &b[p * n + j0..p * n + j1];
            for (c_ij, &b_pj) in c_seg.iter_mut().zip(b_seg) {
                *c_ij += a_ip * b_pj;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::naive_ijk::matmul_naive_ijk;

    fn inputs(m: usize, n: usize, k: usize) -> (Vec<f64>, Vec<f64>) {
        let a = (0..m * k).map(|i| ((i * 31) % 89) as f64 / 9.0 - 4.3).collect();
        let b = (0..k * n).map(|i| ((i * 17) % 83) as f64 / 7.0 - 5.9).collect();
        (a, b)
    }

    #[test]
    fn test_tile_ranges_clip_last_tile() {
        assert_eq!(tile_ranges(5, 2).collect::<Vec<_>>(), vec![0..2, 2..4, 4..5]);
        assert_eq!(tile_ranges(4, 2).collect::<Vec<_>>(), vec![0..2, 2..4]);
        assert_eq!(tile_ranges(3, 8).collect::<Vec<_>>(), vec![0..3]);
        assert_eq!(tile_ranges(0, 8).count(), 0);
    }

    #[test]
    #[should_panic(expected = "tile size must be positive")]
    fn test_zero_tile_rejected() {
        let _ = tile_ranges(4, 0);
    }

    #[test]
    fn test_tile_coords_order_is_i_k_j() {
        let coords: Vec<_> = tile_coords(0..2, 2, 2, 1).collect();
        let triples: Vec<_> = coords
            .iter()
            .map(|c| (c.rows.start, c.inner.start, c.cols.start))
            .collect();
        assert_eq!(
            triples,
            vec![
                (0, 0, 0),
                (0, 0, 1),
                (0, 1, 0),
                (0, 1, 1),
                (1, 0, 0),
                (1, 0, 1),
                (1, 1, 0),
                (1, 1, 1),
            ]
        );
    }

    #[test]
    fn test_every_point_visited_once() {
        let (m, k, n, tile) = (5, 7, 3, 2);
        let mut visits = vec![0u32; m * k * n];
        for cube in tile_coords(0..m, k, n, tile) {
            for i in cube.rows.clone() {
                for p in cube.inner.clone() {
                    for j in cube.cols.clone() {
                        visits[(i * k + p) * n + j] += 1;
                    }
                }
            }
        }
        assert!(visits.iter().all(|&v| v == 1));
    }

    #[test]
    fn test_row_block_tiling_starts_at_block() {
        let coords: Vec<_> = tile_coords(4..9, 1, 1, 4).collect();
        let rows: Vec<_> = coords.into_iter().map(|c| c.rows).collect();
        assert_eq!(rows, vec![4..8, 8..9]);
    }

    #[test]
    fn test_tiled_matches_naive_exactly() {
        for &(m, n, k) in &[(5, 5, 5), (13, 17, 19), (64, 32, 48), (1, 9, 1)] {
            let (a, b) = inputs(m, n, k);
            let mut c_ref = vec![0.0; m * n];
            matmul_naive_ijk(&a, &b, &mut c_ref, m, n, k);

            for tile in [1, 2, 3, 4, 7, 16, 64, 100] {
                let mut c = vec![0.0; m * n];
                matmul_tiled(&a, &b, &mut c, m, n, k, tile);
                assert_eq!(c, c_ref, "{}x{}x{} tile {}", m, n, k, tile);
            }
        }
    }

    #[test]
    fn test_2x2_with_unit_tiles() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        let mut c = [0.0; 4];
        matmul_tiled(&a, &b, &mut c, 2, 2, 2, 1);
        assert_eq!(c, [19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_row_block_writes_only_its_rows() {
        let (m, n, k) = (6, 4, 5);
        let (a, b) = inputs(m, n, k);
        let mut c_ref = vec![0.0; m * n];
        matmul_naive_ijk(&a, &b, &mut c_ref, m, n, k);

        let mut block = vec![0.0; 2 * n];
        tiled_row_block(&a, &b, &mut block, 2..4, n, k, 3);
        assert_eq!(block, c_ref[2 * n..4 * n]);
    }

    #[test]
    #[should_panic(expected = "C block: expected 2x4=8 elements")]
    fn test_row_block_rejects_short_block() {
        let (a, b) = inputs(6, 4, 5);
        let mut block = vec![0.0; 4];
        tiled_row_block(&a, &b, &mut block, 2..4, 4, 5, 3);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_row_block_rejects_rows_past_a() {
        let (a, b) = inputs(3, 4, 5);
        let mut block = vec![0.0; 2 * 4];
        tiled_row_block(&a, &b, &mut block, 2..4, 4, 5, 3);
    }
}
