//! Criterion benchmarks for the tour Tabu Search.
//!
//! Uses random mock distances so timings reflect neighborhood generation
//! and evaluation cost only.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_tourtabu::problem::{Location, RandomDistances, RoutingProblem, Tour};
use u_tourtabu::tabu::{neighbors, NeighborSelection, TabuConfig, TabuRunner};

fn random_problem(n: usize) -> RoutingProblem {
    let mut rng = StdRng::seed_from_u64(42);
    let locations = (0..n)
        .map(|i| Location::new(format!("L{i}"), rng.random_range(0.5..3.0)))
        .collect();
    RoutingProblem::with_provider(locations, &RandomDistances::default(), &mut rng)
        .expect("valid benchmark problem")
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_neighborhood");

    for &n in &[8usize, 16, 32] {
        let problem = random_problem(n);
        let model = problem.cost_model(0.5, 300.0).expect("valid cost model");
        let tour = Tour::identity(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &tour, |b, t| {
            b.iter(|| {
                let total: f64 = neighbors(black_box(t))
                    .iter()
                    .map(|nb| model.evaluate(nb).total_cost)
                    .sum();
                black_box(total)
            })
        });
    }
    group.finish();
}

fn bench_tabu_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("tabu_run");
    group.sample_size(10);

    for selection in [NeighborSelection::FirstAdmissible, NeighborSelection::BestAdmissible] {
        for &n in &[10usize, 25] {
            let problem = random_problem(n);
            let config = TabuConfig::default()
                .with_iteration_cap(50)
                .with_selection(selection)
                .with_seed(42);
            group.bench_with_input(
                BenchmarkId::new(format!("{selection:?}"), n),
                &(problem, config),
                |b, (p, c)| {
                    b.iter(|| {
                        let result = TabuRunner::run(black_box(p), black_box(c), &mut ());
                        black_box(result)
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_tabu_run);
criterion_main!(benches);
