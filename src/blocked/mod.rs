//! Cache-blocked GEMM.
//!
//! Breaks the matrix multiplication into tiles that fit in L1/L2 cache and
//! runs the i-k-j loop inside each tile. See [`tiled`] for how the tile
//! size trades loop overhead against cache residency.

pub mod tiled;

pub use tiled::{DEFAULT_TILE, TileCoord, matmul_tiled, tile_coords, tile_ranges, tiled_row_block};
