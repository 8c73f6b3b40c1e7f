//! Load generation: seeded random shipments and explicit submissions.
//!
//! All randomness is drawn from a seeded [`StdRng`] so a scenario replays
//! identically for the same seed.

use std::collections::VecDeque;
use std::ops::RangeInclusive;

use bevy_ecs::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cities::CityDirectory;
use crate::ecs::{CityId, LoadId};

pub const DEFAULT_WEIGHT_RANGE: RangeInclusive<u32> = 5..=25;

/// Origin, destination and weight of a shipment that has not entered the book yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSubmission {
    pub origin: CityId,
    pub destination: CityId,
    pub weight: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoadRejected {
    #[error("origin and destination are both city {0}")]
    SameOriginAndDestination(CityId),
    #[error("city {0} is not in the directory")]
    UnknownCity(CityId),
    #[error("load weight must be positive")]
    ZeroWeight,
    #[error("need at least two cities to generate a load")]
    NotEnoughCities,
}

impl LoadSubmission {
    pub fn validate(&self, cities: &CityDirectory) -> Result<(), LoadRejected> {
        for id in [self.origin, self.destination] {
            if cities.lookup(id).is_none() {
                return Err(LoadRejected::UnknownCity(id));
            }
        }
        if self.origin == self.destination {
            return Err(LoadRejected::SameOriginAndDestination(self.origin));
        }
        if self.weight == 0 {
            return Err(LoadRejected::ZeroWeight);
        }
        Ok(())
    }
}

/// Random shipment source.
#[derive(Debug, Resource)]
pub struct LoadGenerator {
    rng: StdRng,
    weight_range: RangeInclusive<u32>,
}

impl LoadGenerator {
    pub fn new(seed: Option<u64>, weight_range: RangeInclusive<u32>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, weight_range }
    }

    /// Draws a uniform origin, a uniform destination among the other cities, and
    /// a uniform weight.
    pub fn sample(&mut self, cities: &CityDirectory) -> Result<LoadSubmission, LoadRejected> {
        let ids = cities.ids();
        if ids.len() < 2 {
            return Err(LoadRejected::NotEnoughCities);
        }
        let origin_idx = self.rng.gen_range(0..ids.len());
        let mut dest_idx = self.rng.gen_range(0..ids.len() - 1);
        if dest_idx >= origin_idx {
            dest_idx += 1;
        }
        let weight = self.rng.gen_range(self.weight_range.clone());
        Ok(LoadSubmission {
            origin: ids[origin_idx],
            destination: ids[dest_idx],
            weight,
        })
    }
}

impl Default for LoadGenerator {
    fn default() -> Self {
        Self::new(None, DEFAULT_WEIGHT_RANGE)
    }
}

/// Explicit submissions waiting for the next `CreateLoad`, and the outcome of
/// every creation attempt in order.
#[derive(Debug, Default, Resource)]
pub struct LoadIntake {
    pub queue: VecDeque<LoadSubmission>,
    pub outcomes: Vec<Result<LoadId, LoadRejected>>,
}
