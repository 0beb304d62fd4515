//! Integration tests for the finance and fraud layer
//!
//! Covers the bookkeeping levers end to end: cooking the books into a
//! federal raid, SPE collapse, the lobbying shield and cash-gated repairs.

use std::sync::Arc;

use meltdown_manager::command::{Command, CommandOutcome, RejectReason};
use meltdown_manager::core::types::{Component, Difficulty, Severity};
use meltdown_manager::core::SimulationConfig;
use meltdown_manager::scenario::ScenarioData;
use meltdown_manager::simulation::state::SpeStatus;
use meltdown_manager::simulation::{Engine, EventKind, FailureReason};

fn fresh_engine() -> Engine {
    Engine::new(
        SimulationConfig::default(),
        Arc::new(ScenarioData::builtin()),
        Difficulty::Ethical,
    )
}

#[test]
fn test_cooking_books_to_full_risk_ends_in_raid() {
    let mut engine = fresh_engine();
    let start_score = engine.state().finance.stock_score;

    for _ in 0..7 {
        assert!(engine.apply(Command::CookBooks).is_applied());
    }
    assert_eq!(engine.state().finance.audit_risk_percent, 100.0);
    assert!(engine.state().finance.stock_score > start_score);
    assert!(!engine.is_game_over());

    let report = engine.tick();
    assert_eq!(
        report.snapshot.state.failure_reason(),
        Some(FailureReason::FraudExposed)
    );
    assert!(report
        .events
        .iter()
        .any(|e| e.kind == EventKind::GameOver && e.severity == Severity::Danger));

    // Nothing moves once the session is over
    let frozen = engine.snapshot();
    assert_eq!(
        engine.apply(Command::Borrow(1000.0)),
        CommandOutcome::Rejected(RejectReason::SessionOver)
    );
    engine.run(50);
    let after = engine.snapshot();
    assert_eq!(after.tick, frozen.tick);
    assert_eq!(after.state, frozen.state);
}

#[test]
fn test_spe_collapse_returns_debt_to_books() {
    let mut engine = fresh_engine();
    assert!(engine.apply(Command::CreateSpe).is_applied());

    let spe = engine.state().fraud.special_purpose_entities[0].clone();
    let hidden = engine.state().fraud.total_hidden_debt;
    assert_eq!(hidden, spe.hidden_debt_amount);
    assert_eq!(engine.state().finance.outstanding_loan, 0.0);

    // The idle reactor sells nothing, so the score slides toward the trigger
    let mut collapse_event = None;
    for _ in 0..3000 {
        let report = engine.tick();
        if let Some(event) = report
            .events
            .into_iter()
            .find(|e| e.kind == EventKind::SpeCollapse)
        {
            collapse_event = Some(event);
            break;
        }
        assert!(!engine.is_game_over(), "session ended before the SPE collapsed");
    }

    let event = collapse_event.expect("SPE never collapsed");
    assert_eq!(event.severity, Severity::Danger);

    let state = engine.state();
    let collapsed = &state.fraud.special_purpose_entities[0];
    assert!(matches!(collapsed.status(), SpeStatus::Collapsed { .. }));
    assert_eq!(state.finance.outstanding_loan, spe.hidden_debt_amount);
    assert_eq!(state.fraud.total_hidden_debt, hidden);
    assert_eq!(state.fraud.active_count(), 0);
}

#[test]
fn test_lobbying_shield_pauses_audit_creep_until_it_expires() {
    let mut engine = fresh_engine();
    engine.apply(Command::CreateSpe);
    engine.apply(Command::CookBooks);
    assert!(engine.apply(Command::Lobby).is_applied());
    let start = engine.state().finance.audit_risk_percent;
    assert!(start > 0.0);
    assert!(engine.state().finance.shield_active());

    let shield_ticks = engine.config().lobbying.shield_ticks;
    let mut risk = start;
    for _ in 0..shield_ticks {
        let report = engine.tick();
        let now = report.snapshot.state.finance.audit_risk_percent;
        assert!(now <= risk, "audit risk rose under the shield: {} -> {}", risk, now);
        risk = now;
    }
    assert!(!engine.state().finance.shield_active());
    assert!(!engine.is_game_over());
    assert!(risk < start);

    // First unshielded tick: passive creep is back
    let report = engine.tick();
    assert!(report.snapshot.state.finance.audit_risk_percent > risk);
}

#[test]
fn test_repair_is_gated_on_cash() {
    let mut engine = fresh_engine();
    assert!(engine.apply(Command::SiphonToOffshore(4500.0)).is_applied());
    assert_eq!(engine.state().finance.operating_cash, 500.0);
    assert_eq!(engine.state().finance.offshore_holdings, 4500.0);
    engine.take_events();

    let outcome = engine.apply(Command::Repair(Component::Pump));
    assert_eq!(outcome, CommandOutcome::Rejected(RejectReason::InsufficientCash));
    assert_eq!(engine.state().finance.operating_cash, 500.0);
    let events = engine.take_events();
    assert!(events.iter().any(|e| e.kind == EventKind::InsufficientResource));

    assert!(engine.apply(Command::Borrow(1000.0)).is_applied());
    let before = engine.state().finance.operating_cash;
    assert!(engine.apply(Command::Repair(Component::Pump)).is_applied());
    assert_eq!(engine.state().finance.operating_cash, before - 800.0);
    assert_eq!(engine.state().reactor.pump_health, 100.0);
    assert_eq!(engine.state().finance.outstanding_loan, 1000.0);
}
