mod support;

use dispatch_core::ecs::{CityId, TruckId, TruckStatus};
use dispatch_core::generator::LoadSubmission;
use dispatch_core::scenario::ScenarioParams;
use dispatch_core::spatial::{distance_miles, GeoPoint};
use dispatch_core::telemetry::DispatchEvent;

use support::{assert_consistent, equator_pair, sim_with_trucks};

const DESTINATION: GeoPoint = GeoPoint::new(0.0, 1.0);

fn truck_position(sim: &dispatch_core::runner::DispatchSimulation, id: u32) -> GeoPoint {
    sim.fleet().get(TruckId(id)).expect("truck").position
}

#[test]
fn distance_shrinks_every_tick_until_arrival() {
    let mut sim = sim_with_trucks(equator_pair(), ScenarioParams::default(), &[(0.0, 0.0, 30)]);
    let load_id = sim
        .submit_load(LoadSubmission {
            origin: CityId(1),
            destination: CityId(2),
            weight: 10,
        })
        .expect("load accepted");
    assert_eq!(sim.assign_pending(), 1);

    let mut last = distance_miles(truck_position(&sim, 1), DESTINATION);
    assert!((last - 69.04).abs() < 0.1, "start distance {last}");

    let mut ticks = 0;
    while sim.loads().contains(load_id) {
        sim.tick();
        ticks += 1;
        let now = distance_miles(truck_position(&sim, 1), DESTINATION);
        assert!(now < last, "tick {ticks}: {now} !< {last}");
        last = now;
        assert_consistent(&sim);
        assert!(ticks <= 12, "no arrival after {ticks} ticks");
    }

    assert!((10..=12).contains(&ticks), "arrived after {ticks} ticks");
    assert!(last < 0.1);
    let truck = sim.fleet().get(TruckId(1)).expect("truck");
    assert_eq!(truck.status, TruckStatus::Idle);
    assert_eq!(truck.assigned_load, None);
    assert_eq!(sim.snapshot().counts.loads_delivered, 1);
}

#[test]
fn idle_trucks_do_not_move() {
    let mut sim = sim_with_trucks(
        equator_pair(),
        ScenarioParams::default(),
        &[(0.0, 0.0, 30), (3.0, 3.0, 30)],
    );
    sim.submit_load(LoadSubmission {
        origin: CityId(1),
        destination: CityId(2),
        weight: 10,
    })
    .expect("load accepted");
    sim.assign_pending();

    for _ in 0..5 {
        sim.tick();
    }
    assert_eq!(truck_position(&sim, 2), GeoPoint::new(3.0, 3.0));
    assert_eq!(sim.now(), 5);
}

#[test]
fn delivered_load_never_reappears() {
    let mut sim = sim_with_trucks(
        equator_pair(),
        ScenarioParams::default(),
        &[(0.0, 0.0, 30), (0.0, 0.0, 30)],
    );
    let load_id = sim
        .submit_load(LoadSubmission {
            origin: CityId(1),
            destination: CityId(2),
            weight: 10,
        })
        .expect("load accepted");
    sim.assign_pending();
    while sim.loads().contains(load_id) {
        sim.tick();
    }
    let events_after_delivery = sim.telemetry().events.len();

    for _ in 0..5 {
        assert_eq!(sim.assign_pending(), 0);
        assert_eq!(sim.tick(), 0);
    }
    assert_eq!(sim.telemetry().events.len(), events_after_delivery);
    assert!(sim.fleet().iter().all(|t| t.status == TruckStatus::Idle));
    assert!(sim.snapshot().loads.is_empty());

    let mentions: usize = sim
        .telemetry()
        .events
        .iter()
        .filter(|r| match r.event {
            DispatchEvent::LoadCreated { id, .. } => id == load_id,
            DispatchEvent::LoadAssigned { load_id: l, .. } => l == load_id,
            DispatchEvent::TruckArrived { load_id: l, .. } => l == load_id,
        })
        .count();
    assert_eq!(mentions, 3);
}

#[test]
fn truck_already_at_destination_arrives_on_first_tick() {
    let mut sim = sim_with_trucks(equator_pair(), ScenarioParams::default(), &[(0.0, 1.0, 30)]);
    let load_id = sim
        .submit_load(LoadSubmission {
            origin: CityId(1),
            destination: CityId(2),
            weight: 10,
        })
        .expect("load accepted");
    sim.assign_pending();
    assert_eq!(sim.tick(), 1);
    assert!(!sim.loads().contains(load_id));
}
