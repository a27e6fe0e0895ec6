//! Start-of-run configuration for the two benchmark suites.

use crate::blocked::DEFAULT_TILE;
use crate::error::{MatbenchError, Result};

/// Matrix-multiplication suite: X is m×n, Y is n×p, tiles are `tile` wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatmulConfig {
    pub m: usize,
    pub n: usize,
    pub p: usize,
    pub tile: usize,
    /// Timed runs per variant.
    pub iterations: usize,
    /// One untimed run per variant before timing.
    pub warmup: bool,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for MatmulConfig {
    fn default() -> Self {
        Self {
            m: 1_000,
            n: 2_000,
            p: 3_000,
            tile: DEFAULT_TILE,
            iterations: 1,
            warmup: false,
            seed: None,
        }
    }
}

impl MatmulConfig {
    /// # Errors
    ///
    /// [`MatbenchError::InvalidConfig`] if `tile` or `iterations` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.tile == 0 {
            return Err(MatbenchError::InvalidConfig(
                "tile size must be at least 1".to_string(),
            ));
        }
        if self.iterations == 0 {
            return Err(MatbenchError::InvalidConfig(
                "iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Floating-point operations in one product: 2·m·n·p.
    pub fn flops(&self) -> f64 {
        2.0 * self.m as f64 * self.n as f64 * self.p as f64
    }
}

/// Vector-expression suite over two vectors of `len` doubles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprConfig {
    pub len: usize,
    pub seed: Option<u64>,
}

impl Default for ExprConfig {
    fn default() -> Self {
        Self {
            len: 10_000_000,
            seed: None,
        }
    }
}

impl ExprConfig {
    /// # Errors
    ///
    /// [`MatbenchError::InvalidConfig`] if `len` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.len == 0 {
            return Err(MatbenchError::InvalidConfig(
                "vector length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Bytes touched per pass (two inputs and one output) in GiB.
    pub fn working_set_gib(&self) -> f64 {
        3.0 * self.len as f64 * std::mem::size_of::<f64>() as f64 / (1u64 << 30) as f64
    }
}
