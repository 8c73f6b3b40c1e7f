pub mod algorithm;
pub mod types;
pub mod greedy;
pub mod strict_capacity;

use bevy_ecs::prelude::Resource;

pub use algorithm::AssignmentAlgorithm;
pub use types::{LoadRequest, MatchResult, TruckCandidate};
pub use greedy::GreedyScoringMatching;
pub use strict_capacity::StrictCapacityMatching;

/// Resource wrapper for the assignment algorithm trait object.
#[derive(Resource)]
pub struct AssignmentAlgorithmResource(pub Box<dyn AssignmentAlgorithm>);

impl AssignmentAlgorithmResource {
    pub fn new(algorithm: Box<dyn AssignmentAlgorithm>) -> Self {
        Self(algorithm)
    }
}

impl Default for AssignmentAlgorithmResource {
    fn default() -> Self {
        Self::new(Box::new(GreedyScoringMatching::default()))
    }
}

impl std::ops::Deref for AssignmentAlgorithmResource {
    type Target = dyn AssignmentAlgorithm;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
