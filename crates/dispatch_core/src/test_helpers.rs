//! Test helpers for common test setup and utilities.
//!
//! This module provides shared test utilities to reduce duplication across test files.

use bevy_ecs::prelude::World;

use crate::cities::{City, CityDirectory};
use crate::clock::{CurrentEvent, Event, EventKind, SimulationClock};
use crate::ecs::{CityId, Fleet, Load, LoadBook, LoadId, Truck, TruckId};
use crate::generator::{LoadGenerator, LoadIntake};
use crate::matching::AssignmentAlgorithmResource;
use crate::scenario::DispatchConfig;
use crate::spatial::GeoPoint;
use crate::telemetry::DispatchTelemetry;

/// Five well-known US cities with ids 1..=5, all above any realistic filter.
pub const TEST_CITIES: [(u64, &str, &str, f64, f64, u64); 5] = [
    (1, "Chicago", "Illinois", 41.8781, -87.6298, 2_746_388),
    (2, "New York", "New York", 40.7128, -74.0060, 8_804_190),
    (3, "Denver", "Colorado", 39.7392, -104.9903, 715_522),
    (4, "Dallas", "Texas", 32.7767, -96.7970, 1_304_379),
    (5, "Atlanta", "Georgia", 33.7490, -84.3880, 498_715),
];

pub fn city(id: u64, name: &str, lat: f64, lng: f64) -> City {
    City {
        id: CityId(id),
        name: name.to_string(),
        region: "Test".to_string(),
        location: GeoPoint::new(lat, lng),
        population: 1_000_000,
    }
}

/// Directory built from [`TEST_CITIES`].
pub fn test_directory() -> CityDirectory {
    let cities = TEST_CITIES
        .iter()
        .map(|&(id, name, region, lat, lng, population)| City {
            id: CityId(id),
            name: name.to_string(),
            region: region.to_string(),
            location: GeoPoint::new(lat, lng),
            population,
        });
    CityDirectory::from_cities(cities, 0).expect("test cities are valid")
}

/// Directory built from arbitrary `(id, lat, lng)` points.
pub fn directory_from_points(points: &[(u64, f64, f64)]) -> CityDirectory {
    CityDirectory::from_cities(
        points
            .iter()
            .map(|&(id, lat, lng)| city(id, &format!("City {id}"), lat, lng)),
        0,
    )
    .expect("test points are valid")
}

pub fn truck(id: u32, lat: f64, lng: f64, capacity: u32) -> Truck {
    Truck::new(TruckId(id), GeoPoint::new(lat, lng), capacity)
}

pub fn pending_load(id: u64, origin: u64, destination: u64, weight: u32) -> Load {
    Load {
        id: LoadId(id),
        origin: CityId(origin),
        destination: CityId(destination),
        weight,
        assigned_truck: None,
        created_at: 0,
        assigned_at: None,
    }
}

/// World holding every resource the dispatch systems read, with the given
/// directory, trucks and loads. Uses the default greedy matcher.
pub fn dispatch_world(cities: CityDirectory, trucks: Vec<Truck>, loads: Vec<Load>) -> World {
    let mut world = World::new();
    let mut book = LoadBook::default();
    for load in loads {
        while book.allocate_id() < load.id {}
        book.insert(load);
    }
    world.insert_resource(cities);
    world.insert_resource(Fleet::new(trucks));
    world.insert_resource(book);
    world.insert_resource(LoadGenerator::new(Some(1), 5..=25));
    world.insert_resource(LoadIntake::default());
    world.insert_resource(AssignmentAlgorithmResource::default());
    world.insert_resource(DispatchConfig::default());
    world.insert_resource(SimulationClock::default());
    world.insert_resource(DispatchTelemetry::default());
    world
}

/// Stamps `kind` on the world clock and makes it the current event.
pub fn set_current_event(world: &mut World, kind: EventKind) -> Event {
    let event = world.resource_mut::<SimulationClock>().issue(kind);
    world.insert_resource(CurrentEvent(event));
    event
}
