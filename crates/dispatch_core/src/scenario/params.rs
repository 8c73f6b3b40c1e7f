use std::ops::RangeInclusive;

use bevy_ecs::prelude::Resource;

use crate::error::ScenarioError;
use crate::generator::DEFAULT_WEIGHT_RANGE;
use crate::scoring::DEFAULT_INFEASIBILITY_PENALTY;

/// Default truck capacity range in tons.
const DEFAULT_CAPACITY_RANGE: RangeInclusive<u32> = 10..=30;

/// A truck within this distance of its destination (miles) has arrived.
const DEFAULT_ARRIVAL_THRESHOLD_MILES: f64 = 0.1;

/// Fraction of the remaining offset covered per tick.
const DEFAULT_STEP_FRACTION: f64 = 0.5;

/// Type of assignment algorithm to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchingAlgorithmType {
    /// Lowest distance-plus-penalty score; undersized trucks remain eligible.
    #[default]
    GreedyScoring,
    /// Nearest truck that can carry the load; undersized trucks are skipped.
    StrictCapacity,
}

/// Movement parameters read by the movement system.
#[derive(Debug, Clone, Copy, PartialEq, Resource)]
pub struct DispatchConfig {
    pub arrival_threshold_miles: f64,
    pub step_fraction: f64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            arrival_threshold_miles: DEFAULT_ARRIVAL_THRESHOLD_MILES,
            step_fraction: DEFAULT_STEP_FRACTION,
        }
    }
}

/// Parameters for building a simulation scenario.
#[derive(Debug, Clone)]
pub struct ScenarioParams {
    pub num_trucks: usize,
    /// Move steps executed by [`crate::runner::DispatchSimulation::run`].
    pub num_ticks: u64,
    /// Loads created up front by [`crate::runner::DispatchSimulation::run`].
    pub num_loads: usize,
    /// Cities must have strictly more inhabitants than this.
    pub min_population: u64,
    pub seed: Option<u64>,
    pub capacity_range: RangeInclusive<u32>,
    pub weight_range: RangeInclusive<u32>,
    pub infeasibility_penalty: f64,
    pub matching_algorithm: MatchingAlgorithmType,
    pub dispatch: DispatchConfig,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            num_trucks: 50,
            num_ticks: 10,
            num_loads: 5,
            min_population: 50_000,
            seed: None,
            capacity_range: DEFAULT_CAPACITY_RANGE,
            weight_range: DEFAULT_WEIGHT_RANGE,
            infeasibility_penalty: DEFAULT_INFEASIBILITY_PENALTY,
            matching_algorithm: MatchingAlgorithmType::default(),
            dispatch: DispatchConfig::default(),
        }
    }
}

impl ScenarioParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_trucks(mut self, num_trucks: usize) -> Self {
        self.num_trucks = num_trucks;
        self
    }

    pub fn with_ticks(mut self, num_ticks: u64) -> Self {
        self.num_ticks = num_ticks;
        self
    }

    pub fn with_loads(mut self, num_loads: usize) -> Self {
        self.num_loads = num_loads;
        self
    }

    pub fn with_min_population(mut self, min_population: u64) -> Self {
        self.min_population = min_population;
        self
    }

    pub fn with_capacity_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.capacity_range = range;
        self
    }

    pub fn with_weight_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.weight_range = range;
        self
    }

    pub fn with_infeasibility_penalty(mut self, penalty: f64) -> Self {
        self.infeasibility_penalty = penalty;
        self
    }

    pub fn with_matching_algorithm(mut self, algorithm: MatchingAlgorithmType) -> Self {
        self.matching_algorithm = algorithm;
        self
    }

    pub fn with_arrival_threshold_miles(mut self, miles: f64) -> Self {
        self.dispatch.arrival_threshold_miles = miles;
        self
    }

    pub fn with_step_fraction(mut self, fraction: f64) -> Self {
        self.dispatch.step_fraction = fraction;
        self
    }

    /// Rejects parameters the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.num_trucks == 0 {
            return Err(ScenarioError::configuration("num_trucks", "must be positive"));
        }
        if self.num_ticks == 0 {
            return Err(ScenarioError::configuration("num_ticks", "must be positive"));
        }
        if self.num_loads == 0 {
            return Err(ScenarioError::configuration("num_loads", "must be positive"));
        }
        check_range("capacity_range", &self.capacity_range)?;
        check_range("weight_range", &self.weight_range)?;
        if !self.infeasibility_penalty.is_finite() || self.infeasibility_penalty < 0.0 {
            return Err(ScenarioError::configuration(
                "infeasibility_penalty",
                format!("must be a non-negative number, got {}", self.infeasibility_penalty),
            ));
        }
        let threshold = self.dispatch.arrival_threshold_miles;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(ScenarioError::configuration(
                "arrival_threshold_miles",
                format!("must be positive, got {threshold}"),
            ));
        }
        let fraction = self.dispatch.step_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(ScenarioError::configuration(
                "step_fraction",
                format!("must be in (0, 1], got {fraction}"),
            ));
        }
        Ok(())
    }
}

fn check_range(field: &'static str, range: &RangeInclusive<u32>) -> Result<(), ScenarioError> {
    if *range.start() == 0 {
        return Err(ScenarioError::configuration(field, "lower bound must be positive"));
    }
    if range.start() > range.end() {
        return Err(ScenarioError::configuration(
            field,
            format!("empty range {}..={}", range.start(), range.end()),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ScenarioParams::default().validate().is_ok());
    }

    #[test]
    fn zero_counts_are_configuration_errors() {
        for params in [
            ScenarioParams::default().with_trucks(0),
            ScenarioParams::default().with_ticks(0),
            ScenarioParams::default().with_loads(0),
        ] {
            assert!(matches!(
                params.validate(),
                Err(ScenarioError::Configuration { .. })
            ));
        }
    }

    #[test]
    fn inverted_ranges_and_bad_penalty_are_rejected() {
        #[allow(clippy::reversed_empty_ranges)]
        let inverted = ScenarioParams::default().with_capacity_range(30..=10);
        assert!(matches!(
            inverted.validate(),
            Err(ScenarioError::Configuration { field: "capacity_range", .. })
        ));
        let negative = ScenarioParams::default().with_infeasibility_penalty(-1.0);
        assert!(matches!(
            negative.validate(),
            Err(ScenarioError::Configuration { field: "infeasibility_penalty", .. })
        ));
        let still = ScenarioParams::default().with_step_fraction(0.0);
        assert!(matches!(
            still.validate(),
            Err(ScenarioError::Configuration { field: "step_fraction", .. })
        ));
    }
}
