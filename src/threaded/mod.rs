//! Multi-threaded GEMM implementations.
//!
//! These split C by rows across a worker pool sized to the machine's
//! hardware concurrency. Each task owns a disjoint range of rows, reads A
//! and B freely, and the call joins every task before returning.
//!
//! Available implementations:
//! - `rows_mt`: one task per row, naive i-j-k or interchanged i-k-j body
//! - `tiled_mt`: one task per tile-row, tiled (K, J) body

pub mod dispatch;
pub mod rows_mt;
pub mod tiled_mt;

pub use dispatch::{for_each_row_block, row_blocks, worker_count};
pub use rows_mt::{matmul_naive_ijk_mt, matmul_naive_ikj_mt};
pub use tiled_mt::matmul_tiled_mt;
