//! Test fixture for driving individual systems

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;

use crate::core::config::SimulationConfig;
use crate::core::types::{Difficulty, Tick};
use crate::scenario::ScenarioData;
use crate::simulation::events::EventLog;
use crate::simulation::state::SimulationState;
use crate::simulation::systems::{TickContext, TickScratch};

pub(crate) struct Harness {
    pub tick: Tick,
    pub state: SimulationState,
    pub config: SimulationConfig,
    pub scenario: ScenarioData,
    pub rng: ChaCha8Rng,
    pub events: EventLog,
    pub fired: BTreeSet<usize>,
    pub scratch: TickScratch,
}

impl Harness {
    pub fn new() -> Self {
        let scenario = ScenarioData::builtin();
        let state = SimulationState::initial(
            Difficulty::Ethical,
            &scenario.profile(Difficulty::Ethical),
        );
        Self {
            tick: 1,
            state,
            config: SimulationConfig::default(),
            scenario,
            rng: ChaCha8Rng::seed_from_u64(7),
            events: EventLog::new(),
            fired: BTreeSet::new(),
            scratch: TickScratch::default(),
        }
    }

    /// Run `f` against a context borrowed from this fixture
    pub fn with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut TickContext<'_>),
    {
        let mut ctx = TickContext {
            tick: self.tick,
            state: &mut self.state,
            config: &self.config,
            scenario: &self.scenario,
            rng: &mut self.rng,
            events: &mut self.events,
            fired_events: &mut self.fired,
            scratch: self.scratch,
        };
        f(&mut ctx);
        self.scratch = ctx.scratch;
    }
}
