//! Movement system: advances assigned trucks toward their load's destination.
//!
//! Each step closes a fixed fraction of the remaining offset on latitude and
//! longitude independently. A truck that ends the step within the arrival
//! threshold delivers: it goes back to Idle and its load leaves the book.
//!
//! Because the offset only ever shrinks geometrically, the number of steps to
//! arrival grows with the log of the starting distance. It is not an ETA model.

use bevy_ecs::prelude::{Res, ResMut};
use tracing::{debug, info, warn};

use crate::cities::CityDirectory;
use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::ecs::{Fleet, LoadBook, TruckStatus};
use crate::scenario::DispatchConfig;
use crate::spatial::distance_miles;
use crate::telemetry::{DeliveryRecord, DispatchEvent, DispatchTelemetry};

pub fn movement_system(
    mut clock: ResMut<SimulationClock>,
    event: Res<CurrentEvent>,
    config: Res<DispatchConfig>,
    cities: Res<CityDirectory>,
    mut fleet: ResMut<Fleet>,
    mut loads: ResMut<LoadBook>,
    mut telemetry: ResMut<DispatchTelemetry>,
) {
    if event.0.kind != EventKind::MoveStep {
        return;
    }
    // Arrivals are stamped with the tick this step completes.
    let tick = event.0.tick + 1;
    let mut moved = 0usize;
    let mut arrived = 0usize;

    for truck in fleet.iter_mut() {
        if truck.status != TruckStatus::Assigned {
            continue;
        }
        let Some(load_id) = truck.assigned_load else {
            continue;
        };
        let Some(load) = loads.get(load_id) else {
            warn!(truck = %truck.id, load = %load_id, "assigned load is not active");
            continue;
        };
        let destination_city = load.destination;
        let Some(destination) = cities.location(destination_city) else {
            warn!(truck = %truck.id, city = %destination_city, "destination not in directory");
            continue;
        };

        truck.position = truck.position.step_toward(destination, config.step_fraction);
        moved += 1;

        if distance_miles(truck.position, destination) >= config.arrival_threshold_miles {
            continue;
        }

        truck.status = TruckStatus::Idle;
        truck.assigned_load = None;
        truck.city = Some(destination_city);
        arrived += 1;

        if let Some(delivered) = loads.complete(load_id) {
            telemetry.deliveries.push(DeliveryRecord {
                load_id,
                truck_id: truck.id,
                created_at: delivered.created_at,
                assigned_at: delivered.assigned_at.unwrap_or(delivered.created_at),
                delivered_at: tick,
            });
        }
        info!(
            tick,
            truck = %truck.id,
            load = %load_id,
            destination = %cities.label(destination_city),
            "truck arrived"
        );
        telemetry.record(
            tick,
            DispatchEvent::TruckArrived {
                truck_id: truck.id,
                load_id,
                destination: destination_city,
            },
        );
    }

    clock.advance();
    debug!(tick, moved, arrived, active_loads = loads.len(), "move step");
}
