use std::collections::HashSet;

use archipelago::{
    fitness::{score_route, FitnessEvaluator, INFEASIBLE_PENALTY},
    matrix::{DistanceMatrix, FORBIDDEN_EDGE},
    operators::GeneticOperators,
    population::Population,
    rng::RandomNumberGenerator,
    route::Route,
};

fn four_node_matrix() -> DistanceMatrix {
    DistanceMatrix::new(vec![
        vec![0.0, 1.0, 2.0, 3.0],
        vec![1.0, 0.0, 1.0, 2.0],
        vec![2.0, 1.0, 0.0, 1.0],
        vec![3.0, 2.0, 1.0, 0.0],
    ])
    .unwrap()
}

#[test]
fn four_node_tour_costs_six() {
    let matrix = four_node_matrix();
    let route = Route::from_nodes(vec![0, 1, 2, 3]);

    assert_eq!(score_route(&route, &matrix), -6.0);
}

#[test]
fn forbidden_edge_scores_the_fixed_penalty() {
    let mut rows = vec![
        vec![0.0, 1.0, 2.0, 3.0],
        vec![1.0, 0.0, 1.0, 2.0],
        vec![2.0, 1.0, 0.0, 1.0],
        vec![3.0, 2.0, 1.0, 0.0],
    ];
    rows[1][2] = FORBIDDEN_EDGE;
    let matrix = DistanceMatrix::new(rows).unwrap();

    let route = Route::from_nodes(vec![0, 1, 2, 3]);
    assert_eq!(score_route(&route, &matrix), INFEASIBLE_PENALTY);
}

#[test]
fn batch_scores_are_identical_for_any_chunking() {
    let matrix = four_node_matrix();
    let mut rng = RandomNumberGenerator::from_seed(42);
    let routes: Vec<Route> = (0..500).map(|_| Route::random(4, &mut rng)).collect();

    // One chunk (sequential path) vs. many chunks (parallel path).
    let single = FitnessEvaluator::new(usize::MAX).evaluate_batch(&routes, &matrix);
    let chunked = FitnessEvaluator::new(1).evaluate_batch(&routes, &matrix);

    assert_eq!(single, chunked);
}

#[test]
fn one_full_operator_generation_keeps_every_invariant() {
    let num_nodes = 9;
    let size = 50;
    let matrix = DistanceMatrix::new(
        (0..num_nodes)
            .map(|i| {
                (0..num_nodes)
                    .map(|j| ((i * 7 + j * 3) % 11) as f64 + if i == j { 0.0 } else { 1.0 })
                    .collect()
            })
            .collect(),
    )
    .unwrap();

    let mut rng = RandomNumberGenerator::from_seed(42);
    let mut population = Population::generate_unique(size, num_nodes, &mut rng, 1_000_000).unwrap();
    let evaluator = FitnessEvaluator::new(1000);
    let ops = GeneticOperators::new(4, 3, 0.3).unwrap();

    for _ in 0..20 {
        let scores = evaluator.evaluate_batch(population.routes(), &matrix);

        let selected = ops.select(&population, &scores, &mut rng).unwrap();
        assert_eq!(selected.len(), 4);

        let offspring = ops.breed(&selected, &mut rng);
        assert_eq!(offspring.len(), 2);
        for child in &offspring {
            assert!(child.is_permutation(num_nodes));
        }

        ops.replace_worst(&mut population, &scores, offspring);
        population.repair(num_nodes, &mut rng, 1_000_000).unwrap();

        assert_eq!(population.len(), size);
        for route in population.routes() {
            assert!(route.is_permutation(num_nodes));
        }
        let unique: HashSet<&Route> = population.routes().iter().collect();
        assert_eq!(unique.len(), size);
    }
}

#[test]
fn selection_pressure_improves_population_over_generations() {
    let num_nodes = 8;
    let size = 40;
    let rows = (0..num_nodes)
        .map(|i| {
            (0..num_nodes)
                .map(|j| (i as f64 - j as f64).abs())
                .collect()
        })
        .collect();
    let matrix = DistanceMatrix::new(rows).unwrap();

    let mut rng = RandomNumberGenerator::from_seed(7);
    let mut population = Population::generate_unique(size, num_nodes, &mut rng, 1_000_000).unwrap();
    let evaluator = FitnessEvaluator::new(1000);
    let ops = GeneticOperators::new(6, 3, 0.2).unwrap();

    let initial_best = evaluator
        .evaluate_batch(population.routes(), &matrix)
        .into_iter()
        .fold(f64::NEG_INFINITY, f64::max);

    for _ in 0..150 {
        let scores = evaluator.evaluate_batch(population.routes(), &matrix);
        let selected = ops.select(&population, &scores, &mut rng).unwrap();
        let offspring = ops.breed(&selected, &mut rng);
        ops.replace_worst(&mut population, &scores, offspring);
        population.repair(num_nodes, &mut rng, 1_000_000).unwrap();
    }

    let final_best = evaluator
        .evaluate_batch(population.routes(), &matrix)
        .into_iter()
        .fold(f64::NEG_INFINITY, f64::max);

    assert!(final_best >= initial_best);
}
