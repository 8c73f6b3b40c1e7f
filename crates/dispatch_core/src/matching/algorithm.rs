use crate::ecs::TruckId;

use super::types::{LoadRequest, MatchResult, TruckCandidate};

/// Trait for assignment algorithms that pair pending loads with idle trucks.
///
/// Candidates are always passed in fleet order. Implementations must be
/// deterministic for a given input so that runs are reproducible under a seed.
pub trait AssignmentAlgorithm: Send + Sync {
    /// Find the best idle truck for a single load.
    ///
    /// Returns `None` when no candidate is acceptable. That is a normal outcome:
    /// the load stays pending and is reconsidered on the next pass.
    fn find_match(&self, load: &LoadRequest, idle_trucks: &[TruckCandidate]) -> Option<TruckId>;

    /// Match loads one after another in the given order.
    ///
    /// A truck chosen for an earlier load is no longer a candidate for later
    /// loads in the same pass. Nothing is carried over between calls.
    fn find_batch_matches(
        &self,
        loads: &[LoadRequest],
        idle_trucks: &[TruckCandidate],
    ) -> Vec<MatchResult> {
        let mut available = idle_trucks.to_vec();
        let mut results = Vec::new();
        for load in loads {
            if available.is_empty() {
                break;
            }
            let Some(truck_id) = self.find_match(load, &available) else {
                continue;
            };
            available.retain(|candidate| candidate.truck_id != truck_id);
            results.push(MatchResult {
                load_id: load.load_id,
                truck_id,
            });
        }
        results
    }
}
