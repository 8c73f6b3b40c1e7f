use crate::ecs::{LoadId, TruckId};
use crate::spatial::GeoPoint;

/// An idle truck as seen by the matcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruckCandidate {
    pub truck_id: TruckId,
    pub position: GeoPoint,
    pub capacity: u32,
}

/// A pending load as seen by the matcher; `pickup` is the origin city location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadRequest {
    pub load_id: LoadId,
    pub pickup: GeoPoint,
    pub weight: u32,
}

/// Represents a successful match result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub load_id: LoadId,
    pub truck_id: TruckId,
}
