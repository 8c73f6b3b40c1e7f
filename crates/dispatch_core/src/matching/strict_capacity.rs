use crate::ecs::TruckId;
use crate::spatial::distance_miles;

use super::algorithm::AssignmentAlgorithm;
use super::types::{LoadRequest, TruckCandidate};

/// Nearest idle truck that can carry the load; undersized trucks are skipped.
///
/// Unlike [`super::GreedyScoringMatching`] this can leave a load pending while
/// idle trucks exist, when none of them is large enough.
#[derive(Debug, Default)]
pub struct StrictCapacityMatching;

impl AssignmentAlgorithm for StrictCapacityMatching {
    fn find_match(&self, load: &LoadRequest, idle_trucks: &[TruckCandidate]) -> Option<TruckId> {
        let mut best_match: Option<(TruckId, f64)> = None;

        for truck in idle_trucks.iter().filter(|t| t.capacity >= load.weight) {
            let dist = distance_miles(truck.position, load.pickup);
            match best_match {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best_match = Some((truck.truck_id, dist)),
            }
        }

        best_match.map(|(truck_id, _)| truck_id)
    }
}
