//! Pairing cost for a truck and a load pickup.

use crate::spatial::{distance_miles, GeoPoint};

/// Cost added when a truck is too small for the load.
///
/// Expressed in distance units so it composes with pickup distance. The value is
/// uncalibrated; override it through `ScenarioParams::with_infeasibility_penalty`.
pub const DEFAULT_INFEASIBILITY_PENALTY: f64 = 1000.0;

/// Distance to pickup plus a flat penalty for capacity-infeasible pairings.
/// Lower is better.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityPenaltyScore {
    pub infeasibility_penalty: f64,
}

impl CapacityPenaltyScore {
    pub fn new(infeasibility_penalty: f64) -> Self {
        Self {
            infeasibility_penalty,
        }
    }

    pub fn score(&self, truck_pos: GeoPoint, capacity: u32, pickup: GeoPoint, weight: u32) -> f64 {
        let penalty = if capacity >= weight {
            0.0
        } else {
            self.infeasibility_penalty
        };
        distance_miles(truck_pos, pickup) + penalty
    }
}

impl Default for CapacityPenaltyScore {
    fn default() -> Self {
        Self::new(DEFAULT_INFEASIBILITY_PENALTY)
    }
}
