//! Per-tick systems
//!
//! Each system reads and writes the shared state through a `TickContext`.
//! Order matters: later systems consume values computed earlier in the
//! same tick (see `simulation::tick`).

pub mod clock;
pub mod finance;
pub mod fraud;
pub mod grid;
pub mod lobbying;
pub mod meltdown;
pub mod progression;
pub mod reactor;
pub mod terminal;

use rand::RngCore;
use std::collections::BTreeSet;

use crate::core::config::SimulationConfig;
use crate::core::types::Tick;
use crate::scenario::chapters::Chapter;
use crate::scenario::ScenarioData;
use crate::simulation::events::EventLog;
use crate::simulation::state::SimulationState;

/// Values handed from one system to a later one within a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickScratch {
    /// Steam released through the valve this tick
    pub steam_release: f64,
}

/// Everything a system may touch during one tick
pub struct TickContext<'a> {
    pub tick: Tick,
    pub state: &'a mut SimulationState,
    pub config: &'a SimulationConfig,
    pub scenario: &'a ScenarioData,
    pub rng: &'a mut dyn RngCore,
    pub events: &'a mut EventLog,
    /// Indices of scenario events that already fired this session
    pub fired_events: &'a mut BTreeSet<usize>,
    pub scratch: TickScratch,
}

impl TickContext<'_> {
    pub fn chapter(&self) -> &Chapter {
        self.scenario.chapter(self.state.meta.current_chapter_index)
    }

    /// Grid demand after chapter and weather scaling (MW)
    pub fn effective_demand(&self) -> f64 {
        self.state.grid.grid_demand
            * self.chapter().modifiers.demand_scale
            * self.state.timeline.weather_demand_modifier
    }

    /// Uniform sample centred on zero, spanning `amplitude` peak to peak
    pub fn centred_noise(&mut self, amplitude: f64) -> f64 {
        use rand::Rng;
        (self.rng.gen::<f64>() - 0.5) * amplitude
    }
}
