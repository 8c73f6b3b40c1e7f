mod support;

use bevy_ecs::prelude::World;
use dispatch_core::cities::CityDirectory;
use dispatch_core::ecs::{CityId, Fleet, TruckId};
use dispatch_core::error::ScenarioError;
use dispatch_core::generator::{LoadRejected, LoadSubmission};
use dispatch_core::runner::DispatchSimulation;
use dispatch_core::scenario::{build_scenario, ScenarioParams};
use dispatch_core::test_helpers::{directory_from_points, test_directory};

const CITY_TABLE: &str = "\
id,city,state_name,lat,lng,population
1,Houston,Texas,29.7604,-95.3698,2304580
2,Phoenix,Arizona,33.4484,-112.0740,1608139
3,Tinytown,Ohio,40.0,-82.0,900
4,Seattle,Washington,47.6062,-122.3321,737015
";

#[test]
fn builds_fleet_from_csv_directory() {
    let cities = CityDirectory::from_csv_reader(CITY_TABLE.as_bytes(), 50_000).expect("table");
    let params = ScenarioParams::default().with_seed(5).with_trucks(25);
    let sim = DispatchSimulation::new(params, cities).expect("simulation builds");

    assert_eq!(sim.fleet().len(), 25);
    let ids: Vec<_> = sim.fleet().iter().map(|t| t.id).collect();
    assert_eq!(ids.first(), Some(&TruckId(1)));
    assert_eq!(ids.last(), Some(&TruckId(25)));
    for truck in sim.fleet().iter() {
        assert!((10..=30).contains(&truck.capacity));
        assert!(truck.is_idle());
        let start = truck.city.expect("placed trucks know their city");
        assert_eq!(sim.cities().location(start), Some(truck.position));
        assert_ne!(truck.position.lat, 40.0, "filtered city used as start");
    }
}

#[test]
fn zero_counts_fail_before_the_world_is_touched() {
    for params in [
        ScenarioParams::default().with_trucks(0),
        ScenarioParams::default().with_ticks(0),
        ScenarioParams::default().with_loads(0),
    ] {
        let mut world = World::new();
        let err = build_scenario(&mut world, &params, test_directory()).unwrap_err();
        assert!(matches!(err, ScenarioError::Configuration { .. }), "{err}");
        assert!(world.get_resource::<Fleet>().is_none());
    }
}

#[test]
fn population_filter_that_removes_everything_is_rejected() {
    let cities = CityDirectory::from_csv_reader(CITY_TABLE.as_bytes(), 10_000_000).expect("table");
    assert!(cities.is_empty());
    let err = DispatchSimulation::new(ScenarioParams::default(), cities)
        .err()
        .expect("must fail");
    assert!(matches!(
        err,
        ScenarioError::EmptyReferenceSet {
            min_population: 10_000_000,
            available: 0
        }
    ));
}

#[test]
fn single_city_is_not_enough() {
    let cities = directory_from_points(&[(1, 10.0, 10.0)]);
    let err = DispatchSimulation::new(ScenarioParams::default(), cities)
        .err()
        .expect("must fail");
    assert!(matches!(err, ScenarioError::EmptyReferenceSet { available: 1, .. }));
}

#[test]
fn same_seed_places_the_same_fleet() {
    let params = ScenarioParams::default().with_seed(77).with_trucks(10);
    let a = DispatchSimulation::new(params.clone(), test_directory()).expect("sim");
    let b = DispatchSimulation::new(params, test_directory()).expect("sim");
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn custom_capacity_range_is_honored() {
    let params = ScenarioParams::default()
        .with_seed(2)
        .with_trucks(40)
        .with_capacity_range(12..=14);
    let sim = DispatchSimulation::new(params, test_directory()).expect("sim");
    assert!(sim.fleet().iter().all(|t| (12..=14).contains(&t.capacity)));
}

#[test]
fn invalid_submissions_are_reported_not_stored() {
    let mut sim = DispatchSimulation::new(ScenarioParams::default().with_seed(1), test_directory())
        .expect("sim");
    let err = sim
        .submit_load(LoadSubmission {
            origin: CityId(1),
            destination: CityId(404),
            weight: 10,
        })
        .unwrap_err();
    assert_eq!(err, LoadRejected::UnknownCity(CityId(404)));
    assert!(sim.loads().is_empty());
    assert_eq!(sim.telemetry().count("LoadCreated"), 0);

    let id = sim.create_load().expect("random load");
    let load = sim.loads().get(id).expect("stored");
    assert_ne!(load.origin, load.destination);
    assert!((5..=25).contains(&load.weight));
}
