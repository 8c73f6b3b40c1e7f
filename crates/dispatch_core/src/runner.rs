//! Simulation runner: stamps caller operations and routes them into the ECS.
//!
//! Each operation is issued on [SimulationClock], inserted as [CurrentEvent],
//! then the schedule runs. Only the system gated on that event kind does work,
//! so one operation always completes before the next one starts.

use bevy_ecs::prelude::Res;
use bevy_ecs::prelude::{Schedule, World};
use bevy_ecs::schedule::{ExecutorKind, IntoSystemConfigs};
use serde::Serialize;
use tracing::{info, warn};

use crate::cities::CityDirectory;
use crate::clock::{CurrentEvent, Event, EventKind, SimulationClock};
use crate::ecs::{Fleet, LoadBook, LoadId};
use crate::error::ScenarioError;
use crate::generator::{LoadIntake, LoadRejected, LoadSubmission};
use crate::scenario::{build_scenario, ScenarioParams};
use crate::systems::{
    assignment::assignment_system, load_creation::load_creation_system,
    movement::movement_system,
};
use crate::telemetry::{DispatchTelemetry, SimCounts, SimSnapshot};

fn is_create_load(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::CreateLoad)
        .unwrap_or(false)
}

fn is_assign_pending(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::AssignPending)
        .unwrap_or(false)
}

fn is_move_step(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::MoveStep)
        .unwrap_or(false)
}

/// Builds the dispatch schedule: one system per operation, gated on the current
/// event kind, executed on a single thread in a fixed order.
pub fn dispatch_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(
        (
            load_creation_system.run_if(is_create_load),
            assignment_system.run_if(is_assign_pending),
            movement_system.run_if(is_move_step),
        )
            .chain(),
    );
    schedule
}

/// Issues `kind` on the clock, makes it the current event and runs the schedule.
pub fn run_operation(world: &mut World, schedule: &mut Schedule, kind: EventKind) -> Event {
    let event = world.resource_mut::<SimulationClock>().issue(kind);
    world.insert_resource(CurrentEvent(event));
    schedule.run(world);
    event
}

/// Totals reported by [`DispatchSimulation::run`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    /// Operations issued over the lifetime of the simulation, this run included.
    pub operations: u64,
    pub loads_created: usize,
    pub loads_rejected: usize,
    pub assignments: usize,
    pub deliveries: usize,
    pub final_counts: SimCounts,
}

/// Control surface over one simulation context.
///
/// Owns the world (Fleet, LoadBook, CityDirectory and friends) exclusively;
/// every operation takes `&mut self`, and [`DispatchSimulation::snapshot`] copies
/// state out instead of handing out live references across operations.
pub struct DispatchSimulation {
    world: World,
    schedule: Schedule,
    params: ScenarioParams,
}

impl DispatchSimulation {
    pub fn new(params: ScenarioParams, cities: CityDirectory) -> Result<Self, ScenarioError> {
        let mut world = World::new();
        build_scenario(&mut world, &params, cities)?;
        Ok(Self {
            world,
            schedule: dispatch_schedule(),
            params,
        })
    }

    /// Creates one random load.
    pub fn create_load(&mut self) -> Result<LoadId, LoadRejected> {
        self.create(None)
    }

    /// Creates a load with the given endpoints and weight.
    pub fn submit_load(&mut self, submission: LoadSubmission) -> Result<LoadId, LoadRejected> {
        self.create(Some(submission))
    }

    fn create(&mut self, submission: Option<LoadSubmission>) -> Result<LoadId, LoadRejected> {
        {
            let mut intake = self.world.resource_mut::<LoadIntake>();
            intake.queue.clear();
            intake.queue.extend(submission);
        }
        run_operation(&mut self.world, &mut self.schedule, EventKind::CreateLoad);
        self.world
            .resource_mut::<LoadIntake>()
            .outcomes
            .pop()
            .unwrap_or(Err(LoadRejected::NotEnoughCities))
    }

    /// Runs one assignment pass. Returns the number of new pairings.
    pub fn assign_pending(&mut self) -> usize {
        let before = self.telemetry().count("LoadAssigned");
        run_operation(&mut self.world, &mut self.schedule, EventKind::AssignPending);
        self.telemetry().count("LoadAssigned") - before
    }

    /// Advances every assigned truck once. Returns the number of deliveries.
    pub fn tick(&mut self) -> usize {
        let before = self.telemetry().deliveries.len();
        run_operation(&mut self.world, &mut self.schedule, EventKind::MoveStep);
        self.telemetry().deliveries.len() - before
    }

    /// Creates `num_loads` loads, then runs `num_ticks` rounds of
    /// assignment followed by movement.
    pub fn run(&mut self) -> RunSummary {
        let mut loads_created = 0;
        let mut loads_rejected = 0;
        for _ in 0..self.params.num_loads {
            match self.create_load() {
                Ok(_) => loads_created += 1,
                Err(reason) => {
                    warn!(%reason, "load generation failed");
                    loads_rejected += 1;
                }
            }
        }

        let mut assignments = 0;
        let mut deliveries = 0;
        for _ in 0..self.params.num_ticks {
            assignments += self.assign_pending();
            deliveries += self.tick();
        }

        let summary = RunSummary {
            ticks: self.now(),
            operations: self.world.resource::<SimulationClock>().operations(),
            loads_created,
            loads_rejected,
            assignments,
            deliveries,
            final_counts: self.snapshot().counts,
        };
        info!(
            ticks = summary.ticks,
            created = summary.loads_created,
            assigned = summary.assignments,
            delivered = summary.deliveries,
            "run finished"
        );
        summary
    }

    /// Copy of the current state; safe to keep across later operations.
    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot::capture(self.now(), self.fleet(), self.loads())
    }

    pub fn now(&self) -> u64 {
        self.world.resource::<SimulationClock>().now()
    }

    pub fn fleet(&self) -> &Fleet {
        self.world.resource::<Fleet>()
    }

    pub fn loads(&self) -> &LoadBook {
        self.world.resource::<LoadBook>()
    }

    pub fn cities(&self) -> &CityDirectory {
        self.world.resource::<CityDirectory>()
    }

    pub fn telemetry(&self) -> &DispatchTelemetry {
        self.world.resource::<DispatchTelemetry>()
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
