//! Streaming vector-expression kernels.
//!
//! Two elementwise transforms over equal-length inputs, each written three
//! ways: an index loop, an iterator `zip`/`map`, and a rayon parallel
//! iterator. Each element is computed independently with the same
//! expression, so all three produce bit-identical output.

use rayon::prelude::*;
use std::fmt;

/// `sqrt(x*x + y*y)`
#[inline]
pub fn algebraic(x: f64, y: f64) -> f64 {
    (x * x + y * y).sqrt()
}

/// `atan2(y, x)`
#[inline]
pub fn transcendental(x: f64, y: f64) -> f64 {
    y.atan2(x)
}

/// Which elementwise transform to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expression {
    Algebraic,
    Transcendental,
}

impl Expression {
    pub const ALL: [Expression; 2] = [Expression::Algebraic, Expression::Transcendental];

    pub fn name(self) -> &'static str {
        match self {
            Expression::Algebraic => "algebraic",
            Expression::Transcendental => "transcendental",
        }
    }

    fn op(self) -> fn(f64, f64) -> f64 {
        match self {
            Expression::Algebraic => algebraic,
            Expression::Transcendental => transcendental,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the transform is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `for i in 0..len`
    Loop,
    /// `zip` + `map` over iterators
    Iterator,
    /// rayon parallel `zip` + `map`
    Parallel,
}

impl Strategy {
    /// All strategies, loop first.
    pub const ALL: [Strategy; 3] = [Strategy::Loop, Strategy::Iterator, Strategy::Parallel];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Loop => "for loop",
            Strategy::Iterator => "iterator",
            Strategy::Parallel => "parallel iterator",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Write `expr(x[i], y[i])` into `z[i]` for every `i`.
///
/// # Panics
///
/// Panics if the three slices differ in length.
#[allow(clippy::needless_range_loop)]
pub fn evaluate_into(expr: Expression, strategy: Strategy, x: &[f64], y: &[f64], z: &mut [f64]) {
    assert_eq!(x.len(), y.len(), "X and Y differ in length");
    assert_eq!(x.len(), z.len(), "Z: expected {} elements", x.len());

    let op = expr.op();
    match strategy {
        Strategy::Loop => {
            for i in 0..x.len() {
                z[i] = op(x[i], y[i]);
            }
        }
        Strategy::Iterator => {
            for (out, (&xi, &yi)) in z.iter_mut().zip(x.iter().zip(y)) {
                *out = op(xi, yi);
            }
        }
        Strategy::Parallel => {
            z.par_iter_mut()
                .zip(x.par_iter().zip(y.par_iter()))
                .for_each(|(out, (&xi, &yi))| *out = op(xi, yi));
        }
    }
}

/// Allocating form of [`evaluate_into`].
pub fn evaluate(expr: Expression, strategy: Strategy, x: &[f64], y: &[f64]) -> Vec<f64> {
    let mut z = vec![0.0; x.len()];
    evaluate_into(expr, strategy, x, y, &mut z);
    z
}
