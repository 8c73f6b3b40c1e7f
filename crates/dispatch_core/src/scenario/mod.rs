//! Scenario setup: validate parameters, place the fleet and insert resources.
//!
//! Everything random in a scenario is derived from [`ScenarioParams::seed`], so a
//! seeded scenario replays identically.

mod build;
mod params;

pub use build::{
    build_scenario, create_greedy_matching, create_strict_capacity_matching, place_fleet,
};
pub use params::{DispatchConfig, MatchingAlgorithmType, ScenarioParams};
