//! Entity model: trucks, loads and the containers that own them.
//!
//! [`Fleet`] and [`LoadBook`] are ECS resources keyed by stable ids. Both use
//! ordered maps so that enumeration order (ascending id) is the fleet order and
//! the load-creation order respectively, independent of removals.

use std::collections::BTreeMap;
use std::fmt;

use bevy_ecs::prelude::Resource;
use serde::Serialize;

use crate::spatial::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TruckId(pub u32);

impl fmt::Display for TruckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LoadId(pub u64);

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CityId(pub u64);

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TruckStatus {
    Idle,
    Assigned,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Truck {
    pub id: TruckId,
    pub position: GeoPoint,
    /// Capacity in tons.
    pub capacity: u32,
    pub status: TruckStatus,
    pub assigned_load: Option<LoadId>,
    /// Last city the truck stood in: where it was placed, then the destination
    /// of its latest delivery. Unchanged while en route.
    pub city: Option<CityId>,
}

impl Truck {
    pub fn new(id: TruckId, position: GeoPoint, capacity: u32) -> Self {
        Self {
            id,
            position,
            capacity,
            status: TruckStatus::Idle,
            assigned_load: None,
            city: None,
        }
    }

    pub fn with_city(mut self, city: CityId) -> Self {
        self.city = Some(city);
        self
    }

    pub fn is_idle(&self) -> bool {
        self.status == TruckStatus::Idle
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Load {
    pub id: LoadId,
    pub origin: CityId,
    pub destination: CityId,
    /// Weight in tons.
    pub weight: u32,
    pub assigned_truck: Option<TruckId>,
    /// Tick at which the load entered the book.
    pub created_at: u64,
    /// Tick at which a truck was assigned; set in assignment_system.
    pub assigned_at: Option<u64>,
}

impl Load {
    pub fn is_pending(&self) -> bool {
        self.assigned_truck.is_none()
    }
}

/// All trucks of the simulation. Trucks are never removed.
#[derive(Debug, Default, Resource)]
pub struct Fleet {
    trucks: BTreeMap<TruckId, Truck>,
}

impl Fleet {
    pub fn new(trucks: impl IntoIterator<Item = Truck>) -> Self {
        Self {
            trucks: trucks.into_iter().map(|t| (t.id, t)).collect(),
        }
    }

    pub fn insert(&mut self, truck: Truck) {
        self.trucks.insert(truck.id, truck);
    }

    pub fn get(&self, id: TruckId) -> Option<&Truck> {
        self.trucks.get(&id)
    }

    pub fn get_mut(&mut self, id: TruckId) -> Option<&mut Truck> {
        self.trucks.get_mut(&id)
    }

    /// Trucks in fleet order (ascending id).
    pub fn iter(&self) -> impl Iterator<Item = &Truck> {
        self.trucks.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Truck> {
        self.trucks.values_mut()
    }

    pub fn idle(&self) -> impl Iterator<Item = &Truck> {
        self.iter().filter(|t| t.is_idle())
    }

    pub fn len(&self) -> usize {
        self.trucks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trucks.is_empty()
    }
}

/// Active loads: pending or in transit. Delivered loads are removed.
#[derive(Debug, Default, Resource)]
pub struct LoadBook {
    loads: BTreeMap<LoadId, Load>,
    issued: u64,
    delivered: u64,
}

impl LoadBook {
    /// Next load id (L1, L2, ...). Ids are never reused.
    pub fn allocate_id(&mut self) -> LoadId {
        self.issued += 1;
        LoadId(self.issued)
    }

    pub fn insert(&mut self, load: Load) {
        self.loads.insert(load.id, load);
    }

    pub fn get(&self, id: LoadId) -> Option<&Load> {
        self.loads.get(&id)
    }

    pub fn get_mut(&mut self, id: LoadId) -> Option<&mut Load> {
        self.loads.get_mut(&id)
    }

    pub fn contains(&self, id: LoadId) -> bool {
        self.loads.contains_key(&id)
    }

    /// Removes a delivered load from the active set.
    pub fn complete(&mut self, id: LoadId) -> Option<Load> {
        let load = self.loads.remove(&id)?;
        self.delivered += 1;
        Some(load)
    }

    /// Active loads in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Load> {
        self.loads.values()
    }

    /// Loads still waiting for a truck, in creation order.
    pub fn pending(&self) -> impl Iterator<Item = &Load> {
        self.iter().filter(|l| l.is_pending())
    }

    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    pub fn delivered_count(&self) -> u64 {
        self.delivered
    }
}

/// Checks the truck/load cross references in both directions.
///
/// Returns a description of the first mismatch found.
pub fn check_assignment_consistency(fleet: &Fleet, loads: &LoadBook) -> Result<(), String> {
    for truck in fleet.iter() {
        match (truck.status, truck.assigned_load) {
            (TruckStatus::Idle, Some(load)) => {
                return Err(format!("idle truck {} still holds load {}", truck.id, load))
            }
            (TruckStatus::Assigned, None) => {
                return Err(format!("assigned truck {} holds no load", truck.id))
            }
            _ => {}
        }
        if let Some(load_id) = truck.assigned_load {
            let Some(load) = loads.get(load_id) else {
                return Err(format!("truck {} points at inactive load {}", truck.id, load_id));
            };
            if load.assigned_truck != Some(truck.id) {
                return Err(format!(
                    "truck {} holds load {} but load points at {:?}",
                    truck.id, load_id, load.assigned_truck
                ));
            }
        }
    }
    for load in loads.iter() {
        if let Some(truck_id) = load.assigned_truck {
            let Some(truck) = fleet.get(truck_id) else {
                return Err(format!("load {} points at unknown truck {}", load.id, truck_id));
            };
            if truck.assigned_load != Some(load.id) {
                return Err(format!(
                    "load {} points at truck {} but truck holds {:?}",
                    load.id, truck_id, truck.assigned_load
                ));
            }
        }
    }
    Ok(())
}
