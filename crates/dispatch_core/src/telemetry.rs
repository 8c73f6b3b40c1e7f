//! Telemetry: structured dispatch events, delivery records and snapshots.

use std::collections::BTreeMap;

use bevy_ecs::prelude::Resource;
use serde::Serialize;

use crate::ecs::{CityId, Fleet, LoadBook, LoadId, TruckId, TruckStatus};
use crate::spatial::GeoPoint;

/// Structured event emitted by the core for an external sink to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum DispatchEvent {
    LoadCreated {
        id: LoadId,
        origin: CityId,
        destination: CityId,
        weight: u32,
    },
    LoadAssigned {
        load_id: LoadId,
        truck_id: TruckId,
    },
    TruckArrived {
        truck_id: TruckId,
        load_id: LoadId,
        destination: CityId,
    },
}

impl DispatchEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DispatchEvent::LoadCreated { .. } => "LoadCreated",
            DispatchEvent::LoadAssigned { .. } => "LoadAssigned",
            DispatchEvent::TruckArrived { .. } => "TruckArrived",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub tick: u64,
    pub event: DispatchEvent,
}

/// One delivered load, recorded when its truck arrives.
/// Timestamps are simulation ticks; use the helper methods for derived KPIs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryRecord {
    pub load_id: LoadId,
    pub truck_id: TruckId,
    pub created_at: u64,
    pub assigned_at: u64,
    pub delivered_at: u64,
}

impl DeliveryRecord {
    /// Ticks from creation to assignment.
    pub fn time_to_assign(&self) -> u64 {
        self.assigned_at.saturating_sub(self.created_at)
    }

    /// Ticks from assignment to arrival.
    pub fn time_in_transit(&self) -> u64 {
        self.delivered_at.saturating_sub(self.assigned_at)
    }
}

/// Collects simulation telemetry in emission order.
///
/// Events go through [`DispatchTelemetry::record`], which also keeps a running
/// count per event name.
#[derive(Debug, Default, Resource)]
pub struct DispatchTelemetry {
    pub events: Vec<EventRecord>,
    pub deliveries: Vec<DeliveryRecord>,
    counts: BTreeMap<&'static str, usize>,
}

impl DispatchTelemetry {
    pub fn record(&mut self, tick: u64, event: DispatchEvent) {
        *self.counts.entry(event.name()).or_default() += 1;
        self.events.push(EventRecord { tick, event });
    }

    /// Number of recorded events called `name`.
    pub fn count(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }
}

/// Snapshot of one truck for reporting/export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TruckSnapshot {
    pub id: TruckId,
    pub position: GeoPoint,
    pub capacity: u32,
    pub status: TruckStatus,
    pub assigned_load: Option<LoadId>,
    pub city: Option<CityId>,
}

/// Snapshot of one active load for reporting/export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadSnapshot {
    pub id: LoadId,
    pub origin: CityId,
    pub destination: CityId,
    pub weight: u32,
    pub assigned_truck: Option<TruckId>,
}

/// Aggregated counts at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimCounts {
    pub trucks_idle: usize,
    pub trucks_assigned: usize,
    pub loads_pending: usize,
    pub loads_in_transit: usize,
    pub loads_delivered: u64,
}

/// Snapshot of simulation state between operations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimSnapshot {
    pub tick: u64,
    pub counts: SimCounts,
    pub trucks: Vec<TruckSnapshot>,
    pub loads: Vec<LoadSnapshot>,
}

impl SimSnapshot {
    pub fn capture(tick: u64, fleet: &Fleet, loads: &LoadBook) -> Self {
        let mut counts = SimCounts {
            loads_delivered: loads.delivered_count(),
            ..Default::default()
        };
        let trucks = fleet
            .iter()
            .map(|t| {
                match t.status {
                    TruckStatus::Idle => counts.trucks_idle += 1,
                    TruckStatus::Assigned => counts.trucks_assigned += 1,
                }
                TruckSnapshot {
                    id: t.id,
                    position: t.position,
                    capacity: t.capacity,
                    status: t.status,
                    assigned_load: t.assigned_load,
                    city: t.city,
                }
            })
            .collect();
        let loads = loads
            .iter()
            .map(|l| {
                if l.is_pending() {
                    counts.loads_pending += 1;
                } else {
                    counts.loads_in_transit += 1;
                }
                LoadSnapshot {
                    id: l.id,
                    origin: l.origin,
                    destination: l.destination,
                    weight: l.weight,
                    assigned_truck: l.assigned_truck,
                }
            })
            .collect();
        Self {
            tick,
            counts,
            trucks,
            loads,
        }
    }
}
