use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use archipelago::{
    fitness::FitnessEvaluator,
    matrix::DistanceMatrix,
    rng::RandomNumberGenerator,
    route::Route,
};

fn grid_matrix(num_nodes: usize) -> DistanceMatrix {
    let rows = (0..num_nodes)
        .map(|i| {
            (0..num_nodes)
                .map(|j| ((i * 31 + j * 17) % 97) as f64 + 1.0)
                .collect()
        })
        .collect();
    DistanceMatrix::new(rows).unwrap()
}

fn bench_batch_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_evaluation");
    let matrix = grid_matrix(50);
    let mut rng = RandomNumberGenerator::from_seed(42);

    for size in [100, 1000, 10000].iter() {
        let routes: Vec<Route> = (0..*size).map(|_| Route::random(50, &mut rng)).collect();

        // Threshold above the batch size forces the sequential path.
        let sequential = FitnessEvaluator::new(usize::MAX);
        group.bench_with_input(
            BenchmarkId::new("sequential", size),
            &routes,
            |b, routes| b.iter(|| sequential.evaluate_batch(black_box(routes), black_box(&matrix))),
        );

        // Threshold of one forces the chunked parallel path.
        let parallel = FitnessEvaluator::new(1);
        group.bench_with_input(
            BenchmarkId::new("parallel", size),
            &routes,
            |b, routes| b.iter(|| parallel.evaluate_batch(black_box(routes), black_box(&matrix))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_batch_evaluation);
criterion_main!(benches);
