use bevy_ecs::prelude::Resource;
use serde::Serialize;

/// Operation the caller asked for; systems gate on it through [`CurrentEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum EventKind {
    CreateLoad,
    AssignPending,
    MoveStep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// Tick the operation runs in (number of completed move steps before it).
    pub tick: u64,
    pub kind: EventKind,
}

/// The operation currently being processed by the schedule.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentEvent(pub Event);

/// Discrete simulation time. One tick is one completed `MoveStep`.
#[derive(Debug, Default, Resource)]
pub struct SimulationClock {
    tick: u64,
    operations: u64,
}

impl SimulationClock {
    pub fn now(&self) -> u64 {
        self.tick
    }

    /// Number of operations issued so far, move steps included.
    pub fn operations(&self) -> u64 {
        self.operations
    }

    /// Stamps a new operation at the current tick.
    pub fn issue(&mut self, kind: EventKind) -> Event {
        self.operations += 1;
        Event {
            tick: self.tick,
            kind,
        }
    }

    /// Marks the end of a move step.
    pub fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}
