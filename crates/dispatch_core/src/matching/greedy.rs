use crate::ecs::TruckId;
use crate::scoring::CapacityPenaltyScore;

use super::algorithm::AssignmentAlgorithm;
use super::types::{LoadRequest, TruckCandidate};

/// Greedy matching on [`CapacityPenaltyScore`]: the idle truck with the lowest
/// score wins.
///
/// Undersized trucks stay eligible at a penalty, so a load is only left pending
/// when there is no idle truck at all. Ties go to the earlier truck in fleet order.
///
/// Time complexity: O(n) per load where n is the number of idle trucks.
#[derive(Debug, Default)]
pub struct GreedyScoringMatching {
    pub scoring: CapacityPenaltyScore,
}

impl GreedyScoringMatching {
    pub fn new(infeasibility_penalty: f64) -> Self {
        Self {
            scoring: CapacityPenaltyScore::new(infeasibility_penalty),
        }
    }
}

impl AssignmentAlgorithm for GreedyScoringMatching {
    fn find_match(&self, load: &LoadRequest, idle_trucks: &[TruckCandidate]) -> Option<TruckId> {
        let mut best_match: Option<(TruckId, f64)> = None;

        for truck in idle_trucks {
            let score = self
                .scoring
                .score(truck.position, truck.capacity, load.pickup, load.weight);

            match best_match {
                None => best_match = Some((truck.truck_id, score)),
                Some((_, best_score)) if score < best_score => {
                    best_match = Some((truck.truck_id, score))
                }
                _ => {}
            }
        }

        best_match.map(|(truck_id, _)| truck_id)
    }
}
