//! Benchmark runner: input generation, timing and the correctness gate.
//!
//! Each variant gets a fresh zeroed output per run. The first variant run is
//! the reference; every later output (and every repeat of the reference) is
//! compared against it with exact equality before the next run starts. A
//! mismatch stops the suite.

use std::hint::black_box;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error, info};

use crate::config::{ExprConfig, MatmulConfig};
use crate::error::Result;
use crate::expr::{self, Expression, Strategy};
use crate::matrix::Matrix;
use crate::matrix::dense::random_normal_vec;
use crate::threaded::worker_count;
use crate::Variant;
use crate::verify::{ensure_equivalent, ensure_outputs_equal};

/// Timing for one matrix variant.
#[derive(Debug, Clone, PartialEq)]
pub struct MatmulReport {
    pub variant: Variant,
    /// Mean wall-clock seconds per timed run
    pub seconds: f64,
    pub gflops: f64,
}

/// Timing for one vector-expression strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprReport {
    pub expression: Expression,
    pub strategy: Strategy,
    pub seconds: f64,
    /// GiB/s over the working set (two inputs plus the output)
    pub gib_per_sec: f64,
}

/// Run `f` once and return its result with the elapsed seconds.
pub fn time_it<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed().as_secs_f64())
}

/// Seeded RNG plus the seed used, drawing a fresh seed when none is given.
pub fn seeded_rng(seed: Option<u64>) -> (StdRng, u64) {
    let seed = seed.unwrap_or_else(rand::random);
    (StdRng::seed_from_u64(seed), seed)
}

fn rate(work: f64, seconds: f64) -> f64 {
    if seconds > 0.0 { work / seconds } else { f64::INFINITY }
}

/// Generate X (m×n) and Y (n×p) and time every variant on them.
///
/// # Errors
///
/// Invalid configuration, or a variant whose output differs from the
/// reference.
pub fn run_matmul(config: &MatmulConfig) -> Result<Vec<MatmulReport>> {
    config.validate()?;

    let (mut rng, seed) = seeded_rng(config.seed);
    let x = Matrix::random_normal(config.m, config.n, &mut rng);
    let y = Matrix::random_normal(config.n, config.p, &mut rng);
    info!(
        m = config.m,
        n = config.n,
        p = config.p,
        tile = config.tile,
        seed,
        "generated inputs"
    );

    run_variants(&x, &y, config, &Variant::ALL)
}

/// Time `variants` on the given inputs. `variants[0]` is the reference.
///
/// # Errors
///
/// Invalid configuration, or a variant whose output differs from the
/// reference.
pub fn run_variants(
    x: &Matrix,
    y: &Matrix,
    config: &MatmulConfig,
    variants: &[Variant],
) -> Result<Vec<MatmulReport>> {
    config.validate()?;
    let flops = 2.0 * x.rows() as f64 * x.cols() as f64 * y.cols() as f64;
    debug!(workers = worker_count(), "worker pool");

    time_variants(config, flops, variants, |variant| variant.run(x, y, config.tile))
}

// Every output, warmup included, is checked once a reference exists. The
// first mismatch stops the suite before any later variant runs.
fn time_variants(
    config: &MatmulConfig,
    flops: f64,
    variants: &[Variant],
    mut run: impl FnMut(Variant) -> Matrix,
) -> Result<Vec<MatmulReport>> {
    let mut reference: Option<Matrix> = None;
    let mut reports = Vec::with_capacity(variants.len());

    for &variant in variants {
        if config.warmup {
            let z = black_box(run(variant));
            if reference.is_some() {
                check_run(variant, z, &mut reference)?;
            }
        }

        let mut total = 0.0;
        for _ in 0..config.iterations {
            let (z, seconds) = time_it(|| run(variant));
            total += seconds;
            check_run(variant, z, &mut reference)?;
        }

        let seconds = total / config.iterations as f64;
        let gflops = rate(flops / 1e9, seconds);
        info!(%variant, seconds, gflops, "timed");
        reports.push(MatmulReport {
            variant,
            seconds,
            gflops,
        });
    }

    Ok(reports)
}

fn check_run(variant: Variant, z: Matrix, reference: &mut Option<Matrix>) -> Result<()> {
    match reference {
        Some(expected) => ensure_equivalent(expected, &z, variant.name()).inspect_err(|err| {
            error!(%variant, %err, "correctness check failed");
        }),
        None => {
            *reference = Some(z);
            Ok(())
        }
    }
}

/// Generate two length-`len` vectors and time every expression/strategy pair.
///
/// # Errors
///
/// Invalid configuration, or a strategy whose output differs from the loop
/// version.
pub fn run_expr(config: &ExprConfig) -> Result<Vec<ExprReport>> {
    config.validate()?;

    let (mut rng, seed) = seeded_rng(config.seed);
    let x = random_normal_vec(config.len, &mut rng);
    let y = random_normal_vec(config.len, &mut rng);
    info!(len = config.len, seed, "generated inputs");

    run_expressions(&x, &y, config.working_set_gib())
}

/// Time every expression/strategy pair on the given inputs.
///
/// # Errors
///
/// A strategy whose output differs from the loop version.
pub fn run_expressions(x: &[f64], y: &[f64], working_set_gib: f64) -> Result<Vec<ExprReport>> {
    time_strategies(x.len(), working_set_gib, |expression, strategy, z| {
        expr::evaluate_into(expression, strategy, x, y, z)
    })
}

// The output buffer is poisoned with NaN before every strategy, so a
// strategy that skips elements can never inherit the loop's values.
fn time_strategies(
    len: usize,
    working_set_gib: f64,
    mut eval: impl FnMut(Expression, Strategy, &mut [f64]),
) -> Result<Vec<ExprReport>> {
    let mut reports = Vec::new();
    let mut z = vec![f64::NAN; len];

    for expression in Expression::ALL {
        let mut reference: Option<Vec<f64>> = None;

        for strategy in Strategy::ALL {
            z.fill(f64::NAN);
            let ((), seconds) = time_it(|| eval(expression, strategy, &mut z));

            match &reference {
                Some(expected) => {
                    let name = format!("{} {}", expression, strategy);
                    if let Err(err) = ensure_outputs_equal(expected, &z, &name) {
                        error!(%expression, %strategy, %err, "correctness check failed");
                        return Err(err);
                    }
                }
                None => reference = Some(z.clone()),
            }

            let gib_per_sec = rate(working_set_gib, seconds);
            info!(%expression, %strategy, seconds, gib_per_sec, "timed");
            reports.push(ExprReport {
                expression,
                strategy,
                seconds,
                gib_per_sec,
            });
        }
    }

    Ok(reports)
}
