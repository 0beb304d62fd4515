//! The simulation engine
//!
//! Owns the state exclusively. Mutation happens only through [`Engine::tick`]
//! and [`Engine::apply`]; readers get owned [`Snapshot`]s.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::command::executor::{CommandContext, CommandExecutor};
use crate::command::{Command, CommandOutcome};
use crate::core::config::SimulationConfig;
use crate::core::types::{Difficulty, Tick};
use crate::scenario::chapters::Chapter;
use crate::scenario::ScenarioData;
use crate::simulation::events::{EventLog, NotableEvent};
use crate::simulation::snapshot::{Snapshot, TickReport};
use crate::simulation::state::SimulationState;
use crate::simulation::systems::{TickContext, TickScratch};
use crate::simulation::tick::run_tick;

pub struct Engine<R: RngCore = ChaCha8Rng> {
    state: SimulationState,
    config: SimulationConfig,
    scenario: Arc<ScenarioData>,
    rng: R,
    tick: Tick,
    events: EventLog,
    fired_events: BTreeSet<usize>,
}

impl Engine<ChaCha8Rng> {
    /// Engine seeded from `config.seed`
    pub fn new(
        config: SimulationConfig,
        scenario: Arc<ScenarioData>,
        difficulty: Difficulty,
    ) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(config, scenario, difficulty, rng)
    }
}

impl<R: RngCore> Engine<R> {
    pub fn with_rng(
        config: SimulationConfig,
        scenario: Arc<ScenarioData>,
        difficulty: Difficulty,
        rng: R,
    ) -> Self {
        let profile = scenario.profile(difficulty);
        let state = SimulationState::initial(difficulty, &profile);
        tracing::info!(
            difficulty = ?difficulty,
            seed = config.seed,
            starting_cash = profile.starting_cash,
            "Engine created"
        );

        Self {
            state,
            config,
            scenario,
            rng,
            tick: 0,
            events: EventLog::new(),
            fired_events: BTreeSet::new(),
        }
    }

    /// Advance one fixed timestep. A finished session is left untouched.
    pub fn tick(&mut self) -> TickReport {
        if !self.state.is_game_over() {
            self.tick += 1;
            let mut ctx = TickContext {
                tick: self.tick,
                state: &mut self.state,
                config: &self.config,
                scenario: &self.scenario,
                rng: &mut self.rng,
                events: &mut self.events,
                fired_events: &mut self.fired_events,
                scratch: TickScratch::default(),
            };
            run_tick(&mut ctx);
        }

        TickReport {
            snapshot: self.snapshot(),
            events: self.events.drain(),
        }
    }

    /// Run up to `ticks` steps, stopping early when the session ends
    pub fn run(&mut self, ticks: u64) -> Vec<NotableEvent> {
        let mut events = Vec::new();
        for _ in 0..ticks {
            if self.state.is_game_over() {
                break;
            }
            events.extend(self.tick().events);
        }
        events
    }

    /// Apply a player command between ticks
    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        let mut ctx = CommandContext {
            tick: self.tick,
            state: &mut self.state,
            config: &self.config,
            prices: &self.scenario.prices,
            rng: &mut self.rng,
            events: &mut self.events,
        };
        let outcome = CommandExecutor::execute(&mut ctx, &command);
        self.state.clamp_bounds(
            self.config.reactor.max_radiation,
            self.config.grid.max_frequency,
        );
        outcome
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick,
            state: self.state.clone(),
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Events emitted since the last tick or drain
    pub fn take_events(&mut self) -> Vec<NotableEvent> {
        self.events.drain()
    }

    pub fn current_chapter(&self) -> &Chapter {
        self.scenario.chapter(self.state.meta.current_chapter_index)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn scenario(&self) -> &Arc<ScenarioData> {
        &self.scenario
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }
}
