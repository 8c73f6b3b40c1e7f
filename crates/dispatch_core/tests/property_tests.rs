mod support;

use std::collections::BTreeSet;

use proptest::prelude::*;

use dispatch_core::ecs::{LoadId, TruckId};
use dispatch_core::matching::{AssignmentAlgorithm, GreedyScoringMatching, LoadRequest, TruckCandidate};
use dispatch_core::runner::DispatchSimulation;
use dispatch_core::scenario::ScenarioParams;
use dispatch_core::scoring::CapacityPenaltyScore;
use dispatch_core::spatial::{distance_miles, GeoPoint};
use dispatch_core::telemetry::DispatchEvent;
use dispatch_core::test_helpers::test_directory;

use support::assert_consistent;

fn point() -> impl Strategy<Value = GeoPoint> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| GeoPoint::new(lat, lng))
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Create,
    Assign,
    Tick,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Create), Just(Op::Assign), Just(Op::Tick)]
}

proptest! {
    #[test]
    fn distance_is_symmetric_and_non_negative(a in point(), b in point()) {
        let ab = distance_miles(a, b);
        let ba = distance_miles(b, a);
        prop_assert!(ab >= 0.0);
        prop_assert!((ab - ba).abs() < 1e-9);
        prop_assert!(distance_miles(a, a) < 1e-9);
    }

    #[test]
    fn greedy_choice_has_minimal_score(
        trucks in prop::collection::vec((point(), 10u32..=30), 1..12),
        pickup in point(),
        weight in 5u32..=25,
    ) {
        let candidates: Vec<TruckCandidate> = trucks
            .iter()
            .enumerate()
            .map(|(i, &(position, capacity))| TruckCandidate {
                truck_id: TruckId(i as u32 + 1),
                position,
                capacity,
            })
            .collect();
        let load = LoadRequest { load_id: LoadId(1), pickup, weight };
        let scoring = CapacityPenaltyScore::default();
        let chosen = GreedyScoringMatching::default()
            .find_match(&load, &candidates)
            .expect("a truck is always chosen when one is idle");

        let score_of = |c: &TruckCandidate| scoring.score(c.position, c.capacity, pickup, weight);
        let chosen_score = candidates
            .iter()
            .find(|c| c.truck_id == chosen)
            .map(score_of)
            .expect("chosen truck is a candidate");
        for candidate in &candidates {
            prop_assert!(chosen_score <= score_of(candidate));
        }
    }

    #[test]
    fn operation_sequences_keep_state_consistent(
        seed in any::<u64>(),
        trucks in 1usize..6,
        ops in prop::collection::vec(op(), 1..80),
    ) {
        let params = ScenarioParams::default().with_seed(seed).with_trucks(trucks);
        let mut sim = DispatchSimulation::new(params, test_directory()).expect("sim");
        let mut delivered: BTreeSet<LoadId> = BTreeSet::new();

        for op in ops {
            match op {
                Op::Create => {
                    let id = sim.create_load().expect("five cities are enough");
                    prop_assert!(!delivered.contains(&id), "load id {} reused", id);
                }
                Op::Assign => {
                    sim.assign_pending();
                }
                Op::Tick => {
                    sim.tick();
                }
            }
            assert_consistent(&sim);

            for record in &sim.telemetry().events {
                if let DispatchEvent::TruckArrived { load_id, .. } = record.event {
                    delivered.insert(load_id);
                }
            }
            for id in &delivered {
                prop_assert!(!sim.loads().contains(*id), "delivered load {} is still active", id);
                prop_assert!(
                    sim.fleet().iter().all(|t| t.assigned_load != Some(*id)),
                    "a truck still carries delivered load {}",
                    id
                );
            }
        }
    }
}
