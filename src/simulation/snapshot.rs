//! Read-only snapshots published after each tick

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;
use crate::simulation::events::NotableEvent;
use crate::simulation::state::SimulationState;

/// A committed copy of the state at a tick boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: Tick,
    pub state: SimulationState,
}

impl Snapshot {
    pub fn stock_score(&self) -> f64 {
        self.state.finance.stock_score
    }
}

/// Result of one engine step
#[derive(Debug, Clone)]
pub struct TickReport {
    pub snapshot: Snapshot,
    pub events: Vec<NotableEvent>,
}
