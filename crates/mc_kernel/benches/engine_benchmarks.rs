//! Criterion benchmarks for the mc_kernel simulation engine.
//!
//! Benchmarks cover:
//! - RNG throughput (single draws vs batch fill)
//! - Single-path generation for varying step counts
//! - Full runs, sequential vs parallel, for varying worker counts
//! - Static vs dynamic block scheduling

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mc_kernel::mc::{
    simulate_path, ExecutionMode, GbmParams, MonteCarloConfig, MonteCarloRunner, Schedule,
};
use mc_kernel::rng::SimRng;

fn runner(n_paths: usize, mode: ExecutionMode, schedule: Schedule) -> MonteCarloRunner {
    let config = MonteCarloConfig::builder()
        .n_paths(n_paths)
        .mode(mode)
        .seed(42)
        .schedule(schedule)
        .build()
        .unwrap();
    MonteCarloRunner::new(config).unwrap()
}

/// Benchmark normal draws.
fn bench_rng_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rng_generation");

    for n_samples in [1_000, 10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("normal_samples", n_samples),
            &n_samples,
            |b, &n| {
                let mut rng = SimRng::from_seed(42);
                b.iter(|| {
                    let mut sum = 0.0;
                    for _ in 0..n {
                        sum += rng.gen_normal();
                    }
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("normal_batch", n_samples),
            &n_samples,
            |b, &n| {
                let mut rng = SimRng::from_seed(42);
                let mut buffer = vec![0.0; n];
                b.iter(|| {
                    rng.fill_normal(&mut buffer);
                    black_box(buffer.iter().sum::<f64>())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark one path for a range of horizons.
fn bench_single_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_path");

    for n_steps in [12, 252, 1_260] {
        let params = GbmParams::new(100.0, 0.05, 0.2, n_steps);
        group.bench_with_input(BenchmarkId::new("gbm", n_steps), &params, |b, params| {
            let mut rng = SimRng::from_seed(42);
            b.iter(|| black_box(simulate_path(black_box(params), &mut rng)));
        });
    }

    group.finish();
}

/// Sequential vs parallel for the same workload.
fn bench_execution_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("execution_modes");
    group.sample_size(20);

    let params = GbmParams::new(100.0, 0.05, 0.2, 252);
    let n_paths = 20_000;

    let sequential = runner(n_paths, ExecutionMode::Sequential, Schedule::default());
    group.bench_function("sequential", |b| {
        b.iter(|| black_box(sequential.run(black_box(&params))))
    });

    for workers in [2, 4, 8] {
        let parallel = runner(n_paths, ExecutionMode::Parallel { workers }, Schedule::default());
        group.bench_with_input(BenchmarkId::new("parallel", workers), &workers, |b, _| {
            b.iter(|| black_box(parallel.run(black_box(&params))))
        });
    }

    group.finish();
}

/// Static shares vs dynamic block claiming.
fn bench_schedules(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedules");
    group.sample_size(20);

    let params = GbmParams::new(100.0, 0.05, 0.2, 252);
    let mode = ExecutionMode::Parallel { workers: 4 };

    let schedules = [
        ("static", Schedule::Static),
        ("dynamic_16", Schedule::Dynamic { block_size: 16 }),
        ("dynamic_256", Schedule::Dynamic { block_size: 256 }),
    ];
    for (label, schedule) in schedules {
        let r = runner(20_000, mode, schedule);
        group.bench_function(label, |b| b.iter(|| black_box(r.run(black_box(&params)))));
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_rng_generation,
    bench_single_path,
    bench_execution_modes,
    bench_schedules,
);
criterion_main!(benches);
