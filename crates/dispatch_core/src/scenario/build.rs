use std::ops::RangeInclusive;

use bevy_ecs::prelude::World;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::cities::CityDirectory;
use crate::clock::SimulationClock;
use crate::ecs::{Fleet, LoadBook, Truck, TruckId};
use crate::error::ScenarioError;
use crate::generator::{LoadGenerator, LoadIntake};
use crate::matching::{
    AssignmentAlgorithmResource, GreedyScoringMatching, StrictCapacityMatching,
};
use crate::scenario::params::{MatchingAlgorithmType, ScenarioParams};
use crate::telemetry::DispatchTelemetry;

/// Load generation draws from its own stream so fleet size does not shift it.
const LOAD_SEED_OFFSET: u64 = 0x5eed_10ad;

/// Create a greedy penalty-scored matcher.
pub fn create_greedy_matching(infeasibility_penalty: f64) -> AssignmentAlgorithmResource {
    AssignmentAlgorithmResource::new(Box::new(GreedyScoringMatching::new(infeasibility_penalty)))
}

/// Create a hard-capacity nearest-truck matcher.
pub fn create_strict_capacity_matching() -> AssignmentAlgorithmResource {
    AssignmentAlgorithmResource::new(Box::new(StrictCapacityMatching))
}

/// Places `count` trucks (T1..Tn) in uniformly chosen cities with uniform capacity.
pub fn place_fleet<R: Rng>(
    rng: &mut R,
    cities: &CityDirectory,
    count: usize,
    capacity_range: &RangeInclusive<u32>,
) -> Result<Fleet, ScenarioError> {
    let locations: Vec<_> = cities.iter().map(|c| (c.id, c.location)).collect();
    if locations.is_empty() {
        return Err(ScenarioError::EmptyReferenceSet {
            min_population: cities.min_population(),
            available: 0,
        });
    }
    let mut trucks = Vec::with_capacity(count);
    for i in 0..count {
        let id = u32::try_from(i + 1)
            .map_err(|_| ScenarioError::configuration("num_trucks", "too many trucks"))?;
        let (city, position) = locations[rng.gen_range(0..locations.len())];
        let capacity = rng.gen_range(capacity_range.clone());
        trucks.push(Truck::new(TruckId(id), position, capacity).with_city(city));
    }
    Ok(Fleet::new(trucks))
}

/// Validates `params`, then inserts every resource the dispatch schedule needs.
///
/// Fails before touching `world` when the parameters are invalid or fewer than
/// two cities survive the population filter.
pub fn build_scenario(
    world: &mut World,
    params: &ScenarioParams,
    cities: CityDirectory,
) -> Result<(), ScenarioError> {
    params.validate()?;
    if cities.len() < 2 {
        return Err(ScenarioError::EmptyReferenceSet {
            min_population: cities.min_population(),
            available: cities.len(),
        });
    }

    let mut fleet_rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let fleet = place_fleet(
        &mut fleet_rng,
        &cities,
        params.num_trucks,
        &params.capacity_range,
    )?;
    for truck in fleet.iter() {
        debug!(
            truck = %truck.id,
            city = ?truck.city,
            capacity = truck.capacity,
            "truck placed"
        );
    }

    let load_seed = params.seed.map(|s| s.wrapping_add(LOAD_SEED_OFFSET));
    let algorithm = match params.matching_algorithm {
        MatchingAlgorithmType::GreedyScoring => {
            create_greedy_matching(params.infeasibility_penalty)
        }
        MatchingAlgorithmType::StrictCapacity => create_strict_capacity_matching(),
    };

    info!(
        trucks = fleet.len(),
        cities = cities.len(),
        min_population = cities.min_population(),
        seed = ?params.seed,
        algorithm = ?params.matching_algorithm,
        "scenario built"
    );

    world.insert_resource(fleet);
    world.insert_resource(LoadBook::default());
    world.insert_resource(cities);
    world.insert_resource(LoadGenerator::new(load_seed, params.weight_range.clone()));
    world.insert_resource(LoadIntake::default());
    world.insert_resource(algorithm);
    world.insert_resource(params.dispatch);
    world.insert_resource(SimulationClock::default());
    world.insert_resource(DispatchTelemetry::default());
    Ok(())
}
