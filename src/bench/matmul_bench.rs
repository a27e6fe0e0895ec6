use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use matbench::expr::{Expression, Strategy, evaluate_into};
use matbench::{DEFAULT_TILE, Matrix, Variant};

fn bench_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("Matmul");
    group.sample_size(10);

    for size in [128, 256, 512].iter() {
        let n = *size;
        let x = Matrix::from_fn(n, n, |r, c| ((r * n + c) % 100) as f64 * 0.01);
        let y = Matrix::from_fn(n, n, |r, c| (((r * n + c) + 50) % 100) as f64 * 0.01);

        group.throughput(Throughput::Elements(2 * (n * n * n) as u64));

        for variant in Variant::ALL {
            group.bench_with_input(BenchmarkId::new(variant.name(), n), &n, |bench, _| {
                bench.iter(|| black_box(variant.run(&x, &y, DEFAULT_TILE)));
            });
        }
    }

    group.finish();
}

/// Tiled kernel across tile sizes, to find the cache sweet spot
fn bench_tile_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tiled_tile_size");
    group.sample_size(10);

    let n = 512;
    let x = Matrix::from_fn(n, n, |r, c| ((r + c) % 17) as f64);
    let y = Matrix::from_fn(n, n, |r, c| ((r * c) % 13) as f64);

    for tile in [8, 16, 32, 64, 128, 256].iter() {
        group.bench_with_input(BenchmarkId::new("Tiled", tile), tile, |bench, &tile| {
            bench.iter(|| black_box(Variant::Tiled.run(&x, &y, tile)));
        });
        group.bench_with_input(BenchmarkId::new("Tiled MT", tile), tile, |bench, &tile| {
            bench.iter(|| black_box(Variant::ParallelTiled.run(&x, &y, tile)));
        });
    }

    group.finish();
}

fn bench_expressions(c: &mut Criterion) {
    let mut group = c.benchmark_group("Expr");

    let len = 1 << 20;
    let x: Vec<f64> = (0..len).map(|i| (i as f64 * 0.37).sin()).collect();
    let y: Vec<f64> = (0..len).map(|i| (i as f64 * 0.11).cos()).collect();
    let mut z = vec![0.0; len];

    group.throughput(Throughput::Bytes((3 * len * 8) as u64));

    for expression in Expression::ALL {
        for strategy in Strategy::ALL {
            group.bench_function(BenchmarkId::new(expression.name(), strategy.name()), |bench| {
                bench.iter(|| evaluate_into(expression, strategy, &x, &y, black_box(&mut z)));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_variants, bench_tile_sizes, bench_expressions);
criterion_main!(benches);
