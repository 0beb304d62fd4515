//! Simulation core: state, systems and the engine that drives them

pub mod engine;
pub mod events;
pub mod snapshot;
pub mod state;
pub mod systems;
pub mod tick;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::Engine;
pub use events::{EventKind, EventLog, NotableEvent};
pub use snapshot::{Snapshot, TickReport};
pub use state::{FailureReason, SimulationState};
