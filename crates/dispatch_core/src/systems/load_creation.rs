//! Load creation: turns a queued submission, or a freshly sampled one, into an
//! active load.

use bevy_ecs::prelude::{Res, ResMut};
use tracing::{info, warn};

use crate::cities::CityDirectory;
use crate::clock::{CurrentEvent, EventKind};
use crate::ecs::{Load, LoadBook};
use crate::generator::{LoadGenerator, LoadIntake};
use crate::telemetry::{DispatchEvent, DispatchTelemetry};

pub fn load_creation_system(
    event: Res<CurrentEvent>,
    cities: Res<CityDirectory>,
    mut generator: ResMut<LoadGenerator>,
    mut intake: ResMut<LoadIntake>,
    mut loads: ResMut<LoadBook>,
    mut telemetry: ResMut<DispatchTelemetry>,
) {
    if event.0.kind != EventKind::CreateLoad {
        return;
    }
    let tick = event.0.tick;

    let submission = match intake.queue.pop_front() {
        Some(submission) => submission.validate(&cities).map(|()| submission),
        None => generator.sample(&cities),
    };

    let outcome = submission.map(|submission| {
        let id = loads.allocate_id();
        loads.insert(Load {
            id,
            origin: submission.origin,
            destination: submission.destination,
            weight: submission.weight,
            assigned_truck: None,
            created_at: tick,
            assigned_at: None,
        });
        info!(
            tick,
            load = %id,
            weight = submission.weight,
            origin = %cities.label(submission.origin),
            destination = %cities.label(submission.destination),
            "new load"
        );
        telemetry.record(
            tick,
            DispatchEvent::LoadCreated {
                id,
                origin: submission.origin,
                destination: submission.destination,
                weight: submission.weight,
            },
        );
        id
    });

    if let Err(reason) = &outcome {
        warn!(tick, %reason, "load rejected");
    }
    intake.outcomes.push(outcome);
}
