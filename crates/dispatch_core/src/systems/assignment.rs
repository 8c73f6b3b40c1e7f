//! Assignment: pairs pending loads with idle trucks.
//!
//! Every pass starts from the current Fleet/LoadBook state. Loads are offered to
//! the algorithm in creation order and trucks in fleet order; a load that finds no
//! truck simply stays pending for the next pass.

use bevy_ecs::prelude::{Res, ResMut};
use tracing::{debug, info, warn};

use crate::cities::CityDirectory;
use crate::clock::{CurrentEvent, EventKind};
use crate::ecs::{Fleet, LoadBook, TruckStatus};
use crate::matching::{AssignmentAlgorithmResource, LoadRequest, TruckCandidate};
use crate::telemetry::{DispatchEvent, DispatchTelemetry};

pub fn assignment_system(
    event: Res<CurrentEvent>,
    algorithm: Res<AssignmentAlgorithmResource>,
    cities: Res<CityDirectory>,
    mut fleet: ResMut<Fleet>,
    mut loads: ResMut<LoadBook>,
    mut telemetry: ResMut<DispatchTelemetry>,
) {
    if event.0.kind != EventKind::AssignPending {
        return;
    }
    let tick = event.0.tick;

    let pending: Vec<LoadRequest> = loads
        .pending()
        .filter_map(|load| {
            let Some(pickup) = cities.location(load.origin) else {
                warn!(load = %load.id, origin = %load.origin, "load origin not in directory");
                return None;
            };
            Some(LoadRequest {
                load_id: load.id,
                pickup,
                weight: load.weight,
            })
        })
        .collect();
    let idle: Vec<TruckCandidate> = fleet
        .idle()
        .map(|truck| TruckCandidate {
            truck_id: truck.id,
            position: truck.position,
            capacity: truck.capacity,
        })
        .collect();

    if pending.is_empty() || idle.is_empty() {
        debug!(tick, pending = pending.len(), idle = idle.len(), "nothing to assign");
        return;
    }

    let matches = algorithm.find_batch_matches(&pending, &idle);

    for result in matches {
        let truck_is_idle = fleet.get(result.truck_id).is_some_and(|t| t.is_idle());
        let load_is_pending = loads.get(result.load_id).is_some_and(|l| l.is_pending());
        if !truck_is_idle || !load_is_pending {
            warn!(
                load = %result.load_id,
                truck = %result.truck_id,
                "discarding match for unavailable truck or load"
            );
            continue;
        }

        if let Some(load) = loads.get_mut(result.load_id) {
            load.assigned_truck = Some(result.truck_id);
            load.assigned_at = Some(tick);
        }
        if let Some(truck) = fleet.get_mut(result.truck_id) {
            truck.assigned_load = Some(result.load_id);
            truck.status = TruckStatus::Assigned;
            let at = match truck.city {
                Some(city) => cities.label(city),
                None => format!("({:.4}, {:.4})", truck.position.lat, truck.position.lng),
            };
            info!(tick, load = %result.load_id, truck = %result.truck_id, %at, "load assigned");
        }
        telemetry.record(
            tick,
            DispatchEvent::LoadAssigned {
                load_id: result.load_id,
                truck_id: result.truck_id,
            },
        );
    }
}
