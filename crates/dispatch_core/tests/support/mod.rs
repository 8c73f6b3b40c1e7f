#![allow(dead_code)]

use dispatch_core::cities::CityDirectory;
use dispatch_core::ecs::{check_assignment_consistency, Fleet, TruckId};
use dispatch_core::runner::DispatchSimulation;
use dispatch_core::scenario::ScenarioParams;
use dispatch_core::spatial::{GeoPoint, EARTH_RADIUS_MILES};
use dispatch_core::test_helpers::directory_from_points;

/// Longitude offset (degrees) that is `miles` away from the prime meridian along the equator.
pub fn equator_lng_for_miles(miles: f64) -> f64 {
    (miles / EARTH_RADIUS_MILES).to_degrees()
}

/// Two cities on the equator: 1 at (0, 0) and 2 at (0, 1).
pub fn equator_pair() -> CityDirectory {
    directory_from_points(&[(1, 0.0, 0.0), (2, 0.0, 1.0)])
}

/// Simulation with `trucks` trucks that are then moved to fixed positions and capacities.
pub fn sim_with_trucks(
    cities: CityDirectory,
    params: ScenarioParams,
    trucks: &[(f64, f64, u32)],
) -> DispatchSimulation {
    let params = params.with_trucks(trucks.len()).with_seed(1);
    let mut sim = DispatchSimulation::new(params, cities).expect("simulation builds");
    {
        let mut fleet = sim.world_mut().resource_mut::<Fleet>();
        for (i, &(lat, lng, capacity)) in trucks.iter().enumerate() {
            let truck = fleet.get_mut(TruckId(i as u32 + 1)).expect("truck exists");
            truck.position = GeoPoint::new(lat, lng);
            truck.capacity = capacity;
        }
    }
    sim
}

pub fn assert_consistent(sim: &DispatchSimulation) {
    if let Err(msg) = check_assignment_consistency(sim.fleet(), sim.loads()) {
        panic!("inconsistent state at tick {}: {msg}", sim.now());
    }
}
