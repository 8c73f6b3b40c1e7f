//! Freight dispatch simulation.
//!
//! A fleet of capacity-bounded trucks is matched greedily against pending loads
//! and moved toward each load's destination one tick at a time. The simulation
//! context is a `bevy_ecs` [`World`](bevy_ecs::prelude::World); see
//! [`runner::DispatchSimulation`] for the control surface.

pub mod spatial;
pub mod scoring;
pub mod cities;
pub mod clock;
pub mod ecs;
pub mod error;
pub mod generator;
pub mod matching;
pub mod runner;
pub mod scenario;
pub mod systems;
pub mod telemetry;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
