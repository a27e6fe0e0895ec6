//! Dense matrix storage and the untiled kernels.
//!
//! The i-j-k kernel is the correctness baseline; the i-k-j kernel is the
//! same computation with a friendlier memory access pattern.

pub mod dense;
pub mod naive_ijk;
pub mod naive_ikj;

pub use dense::Matrix;
