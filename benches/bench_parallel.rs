use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use swarmopt::{
    benchmarks,
    optimization::{ObjectiveFunction, OptimizationOptions, Optimizer},
    population::Bounds,
    rng::RandomNumberGenerator,
    strategy::{AlgorithmKind, AlgorithmParameters},
};

const DIMENSIONS: usize = 200;

// Deliberately heavy objective so that evaluation dominates the run time.
fn heavy(x: &[f64]) -> f64 {
    (0..20).map(|_| benchmarks::ackley(x)).sum::<f64>() / 20.0
}

fn positions(count: usize) -> Vec<Vec<f64>> {
    let bounds = Bounds::uniform(DIMENSIONS, -30.0, 30.0).unwrap();
    let mut rng = RandomNumberGenerator::from_seed(1);
    (0..count).map(|_| bounds.sample(&mut rng)).collect()
}

fn bench_batch_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_evaluation");
    let bounds = Bounds::uniform(DIMENSIONS, -30.0, 30.0).unwrap();
    let sequential = ObjectiveFunction::new(heavy, bounds.clone()).with_parallel_threshold(usize::MAX);
    let parallel = ObjectiveFunction::new(heavy, bounds).with_parallel_threshold(1);

    for size in [10, 100, 1000].iter() {
        let batch = positions(*size);

        group.bench_with_input(BenchmarkId::new("sequential", size), &batch, |b, batch| {
            b.iter(|| sequential.evaluate_all(black_box(batch)))
        });

        group.bench_with_input(BenchmarkId::new("parallel", size), &batch, |b, batch| {
            b.iter(|| parallel.evaluate_all(black_box(batch)))
        });
    }

    group.finish();
}

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("grey_wolf_run");
    group.sample_size(10);

    for threshold in [usize::MAX, 1].iter() {
        let options = OptimizationOptions::builder()
            .iterations(20)
            .population_size(200)
            .seed(7)
            .parallel_threshold(*threshold)
            .build();
        let optimizer = Optimizer::new(
            heavy,
            Bounds::uniform(DIMENSIONS, -30.0, 30.0).unwrap(),
            AlgorithmParameters::defaults(AlgorithmKind::GreyWolf),
            options,
        );
        let label = if *threshold == 1 { "parallel" } else { "sequential" };

        group.bench_function(label, |b| {
            b.iter(|| {
                let result = optimizer.run();
                assert!(result.is_ok());
                black_box(result)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_batch_evaluation, bench_full_run);
criterion_main!(benches);
