//! Startup errors. The core itself has no failure modes once a scenario is built.

use thiserror::Error;

use crate::spatial::CoordinateError;

/// Errors raised while loading city reference data.
#[derive(Debug, Error)]
pub enum CityDataError {
    #[error("failed to read city table: {0}")]
    Csv(#[from] csv::Error),

    #[error("city {id} ({name}) has invalid coordinates: {source}")]
    InvalidCoordinates {
        id: u64,
        name: String,
        #[source]
        source: CoordinateError,
    },

    #[error("duplicate city id {0}")]
    DuplicateId(u64),
}

/// Errors that reject a scenario before the simulation starts.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("invalid configuration for `{field}`: {reason}")]
    Configuration { field: &'static str, reason: String },

    #[error(
        "no usable cities after population filter (min_population={min_population}, \
         available={available}); at least two are required"
    )]
    EmptyReferenceSet { min_population: u64, available: usize },

    #[error(transparent)]
    CityData(#[from] CityDataError),
}

impl ScenarioError {
    pub fn configuration(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Configuration {
            field,
            reason: reason.into(),
        }
    }
}
