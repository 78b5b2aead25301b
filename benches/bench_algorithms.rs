use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use swarmopt::{
    benchmarks,
    optimization::{OptimizationOptions, Optimizer},
    population::Bounds,
    strategy::{AlgorithmKind, AlgorithmParameters},
};

fn bench_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("algorithms_rastrigin");
    group.sample_size(20);

    for kind in AlgorithmKind::ALL {
        for population_size in [20, 100].iter() {
            let options = OptimizationOptions::builder()
                .iterations(50)
                .population_size(*population_size)
                .seed(42)
                .build();
            let optimizer = Optimizer::new(
                benchmarks::rastrigin,
                Bounds::uniform(5, -5.12, 5.12).unwrap(),
                AlgorithmParameters::defaults(kind),
                options,
            );

            group.bench_with_input(
                BenchmarkId::new(kind.code(), population_size),
                &optimizer,
                |b, optimizer| {
                    b.iter(|| {
                        let result = optimizer.run();
                        assert!(result.is_ok());
                        black_box(result)
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_algorithms);
criterion_main!(benches);
