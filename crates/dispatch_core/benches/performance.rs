//! Performance benchmarks for dispatch_core using Criterion.rs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dispatch_core::ecs::{LoadId, TruckId};
use dispatch_core::matching::{
    AssignmentAlgorithm, GreedyScoringMatching, LoadRequest, StrictCapacityMatching,
    TruckCandidate,
};
use dispatch_core::runner::DispatchSimulation;
use dispatch_core::scenario::ScenarioParams;
use dispatch_core::spatial::GeoPoint;
use dispatch_core::test_helpers::test_directory;

fn bench_simulation_run(c: &mut Criterion) {
    let scenarios = vec![("small", 50, 20), ("medium", 200, 100), ("large", 500, 400)];

    let mut group = c.benchmark_group("simulation_run");
    for (name, trucks, loads) in scenarios {
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(trucks, loads),
            |b, &(trucks, loads)| {
                b.iter(|| {
                    let params = ScenarioParams::default()
                        .with_seed(42)
                        .with_trucks(trucks)
                        .with_loads(loads)
                        .with_ticks(50);
                    let mut sim =
                        DispatchSimulation::new(params, test_directory()).expect("scenario");
                    black_box(sim.run());
                });
            },
        );
    }
    group.finish();
}

fn candidates(count: u32) -> Vec<TruckCandidate> {
    (0..count)
        .map(|i| TruckCandidate {
            truck_id: TruckId(i + 1),
            position: GeoPoint::new(30.0 + f64::from(i % 20), -120.0 + f64::from(i / 20)),
            capacity: 10 + i % 21,
        })
        .collect()
}

fn requests(count: u64) -> Vec<LoadRequest> {
    (0..count)
        .map(|i| LoadRequest {
            load_id: LoadId(i + 1),
            pickup: GeoPoint::new(35.0 + (i % 7) as f64, -100.0 + (i % 11) as f64),
            weight: 5 + (i % 21) as u32,
        })
        .collect()
}

fn bench_matching_algorithms(c: &mut Criterion) {
    let trucks = candidates(500);
    let single = requests(1);
    let batch = requests(200);

    let mut group = c.benchmark_group("matching_algorithms");

    let greedy = GreedyScoringMatching::default();
    group.bench_function("greedy_500_trucks", |b| {
        b.iter(|| black_box(greedy.find_match(&single[0], &trucks)));
    });

    let strict = StrictCapacityMatching;
    group.bench_function("strict_capacity_500_trucks", |b| {
        b.iter(|| black_box(strict.find_match(&single[0], &trucks)));
    });

    group.bench_function("greedy_batch_200x500", |b| {
        b.iter(|| black_box(greedy.find_batch_matches(&batch, &trucks)));
    });

    group.finish();
}

criterion_group!(benches, bench_simulation_run, bench_matching_algorithms);
criterion_main!(benches);
