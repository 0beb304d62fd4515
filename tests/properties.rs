use std::sync::Arc;

use meltdown_manager::command::{Command, CommandOutcome, RejectReason};
use meltdown_manager::core::types::{Component, Difficulty};
use meltdown_manager::core::SimulationConfig;
use meltdown_manager::scenario::ScenarioData;
use meltdown_manager::simulation::state::SpeStatus;
use meltdown_manager::simulation::{Engine, SimulationState};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Step {
    Tick(u64),
    Apply(Command),
}

fn component() -> impl Strategy<Value = Component> {
    prop_oneof![
        Just(Component::Pump),
        Just(Component::Turbine),
        Just(Component::Condenser),
    ]
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        (-50.0_f64..150.0).prop_map(Command::SetControlRod),
        (-50.0_f64..150.0).prop_map(Command::SetSteamValve),
        Just(Command::TogglePump),
        component().prop_map(Command::Repair),
        Just(Command::CreateSpe),
        Just(Command::Lobby),
        Just(Command::CookBooks),
        Just(Command::ShredDocuments),
        (-1000.0_f64..6000.0).prop_map(Command::SiphonToOffshore),
        (-1000.0_f64..60_000.0).prop_map(Command::Borrow),
        Just(Command::Refuel),
        Just(Command::UpgradePump),
        Just(Command::InstallAutoScram),
    ]
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (1_u64..40).prop_map(Step::Tick),
        2 => command().prop_map(Step::Apply),
    ]
}

fn engine(seed: u64, level: u8) -> Engine {
    let config = SimulationConfig {
        seed,
        ..SimulationConfig::default()
    };
    Engine::new(
        config,
        Arc::new(ScenarioData::builtin()),
        Difficulty::from_level(level),
    )
}

fn assert_bounds(state: &SimulationState, config: &SimulationConfig) {
    let r = &state.reactor;
    let percents = [
        r.control_rod_insertion,
        r.steam_valve_opening,
        r.pump_health,
        r.turbine_health,
        r.condenser_health,
        r.xenon_poison_level,
        r.meltdown_progress,
        r.fuel_remaining,
        state.finance.audit_risk_percent,
        state.finance.credit_score,
        state.finance.political_capital,
    ];
    for value in percents {
        assert!((0.0..=100.0).contains(&value), "percentage out of range: {}", value);
    }
    assert!((0.0..=config.reactor.max_radiation).contains(&r.radiation_level));
    assert!(r.pressure >= 0.0);
    assert!((0.0..=config.grid.max_frequency).contains(&state.grid.grid_frequency_hz));
    assert!(state.grid.electrical_power_output >= 0.0);
    assert!(state.finance.stock_score >= 0.0);
    assert!(state.finance.operating_cash >= 0.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn property_state_stays_in_bounds(
        seed in 0_u64..10_000,
        level in 1_u8..=4,
        steps in prop::collection::vec(step(), 1..40),
    ) {
        let mut engine = engine(seed, level);
        for step in steps {
            match step {
                Step::Tick(n) => { engine.run(n); }
                Step::Apply(command) => { engine.apply(command); }
            }
            assert_bounds(engine.state(), engine.config());
        }
    }

    #[test]
    fn property_hidden_debt_and_collapse_are_irreversible(
        seed in 0_u64..10_000,
        steps in prop::collection::vec(step(), 1..40),
    ) {
        let mut engine = engine(seed, 2);
        let mut hidden = 0.0;
        let mut spe_count = 0;
        let mut collapsed = Vec::new();

        for step in steps {
            match step {
                Step::Tick(n) => { engine.run(n); }
                Step::Apply(command) => { engine.apply(command); }
            }

            let fraud = &engine.state().fraud;
            prop_assert!(fraud.total_hidden_debt >= hidden);
            prop_assert!(fraud.special_purpose_entities.len() >= spe_count);
            for id in &collapsed {
                let spe = fraud
                    .special_purpose_entities
                    .iter()
                    .find(|spe| spe.id == *id)
                    .expect("SPEs are never removed");
                let is_collapsed = matches!(spe.status(), SpeStatus::Collapsed { .. });
                prop_assert!(is_collapsed);
            }

            hidden = fraud.total_hidden_debt;
            spe_count = fraud.special_purpose_entities.len();
            collapsed = fraud
                .special_purpose_entities
                .iter()
                .filter(|spe| !spe.is_active())
                .map(|spe| spe.id)
                .collect();
        }
    }

    #[test]
    fn property_game_over_is_terminal(
        seed in 0_u64..10_000,
        steps in prop::collection::vec(step(), 1..20),
    ) {
        let mut engine = engine(seed, 1);
        for _ in 0..7 {
            engine.apply(Command::CookBooks);
        }
        engine.tick();
        prop_assert!(engine.is_game_over());

        let frozen = engine.snapshot();
        for step in steps {
            match step {
                Step::Tick(n) => {
                    let report = engine.tick();
                    prop_assert!(report.events.is_empty());
                    engine.run(n);
                }
                Step::Apply(command) => {
                    prop_assert_eq!(
                        engine.apply(command),
                        CommandOutcome::Rejected(RejectReason::SessionOver)
                    );
                    engine.take_events();
                }
            }
            prop_assert_eq!(engine.current_tick(), frozen.tick);
            prop_assert_eq!(&engine.state().finance, &frozen.state.finance);
            prop_assert_eq!(&engine.state().reactor, &frozen.state.reactor);
            prop_assert_eq!(engine.state().failure_reason(), frozen.state.failure_reason());
        }
    }
}
