use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use archipelago::{
    config::GaConfig,
    island::IslandWorker,
    matrix::DistanceMatrix,
    population::Population,
    rng::RandomNumberGenerator,
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

fn bench_island_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("island_segment");
    group.sample_size(10);
    let matrix = grid_matrix(30);

    for size in [100, 1000].iter() {
        let config = GaConfig::builder()
            .population_size(*size)
            .num_generations(20)
            .generations_per_segment(20)
            .stagnation_limit(5)
            .seed(42)
            .build();

        group.bench_with_input(BenchmarkId::new("segment_20_gens", size), size, |b, _| {
            b.iter(|| {
                let mut rng = RandomNumberGenerator::from_seed(42);
                let population = Population::generate_unique(
                    config.population_size,
                    30,
                    &mut rng,
                    config.max_uniqueness_attempts,
                )
                .unwrap();
                let mut worker = IslandWorker::new(0, population, &config, rng).unwrap();
                black_box(worker.run_segment(20, &matrix).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_island_segment);
criterion_main!(benches);
