//! Integration tests for data-driven scenarios and config files
//!
//! A custom scenario scheduled in January 2000 lets the first weekly
//! rollover (tick 320 at the default dial speed) fire its event and weather.

use std::path::PathBuf;
use std::sync::Arc;

use meltdown_manager::core::types::{Difficulty, Severity};
use meltdown_manager::core::{MeltdownError, SimulationConfig};
use meltdown_manager::scenario::{ScenarioData, Weather};
use meltdown_manager::simulation::{Engine, EventKind, NotableEvent};

const CUSTOM_SCENARIO: &str = r#"
version = 1

[[events]]
month = 1
year = 2000
title = "SURPRISE AUDIT"
description = "Arthur Andersen wants to see the ledgers."
severity = "warning"
effects = [{ kind = "audit_risk_delta", value = 25.0 }]

[[weather]]
month = 1
year = 2000
weather = "snowy"
demand_modifier = 1.5
name = "Cold Snap"

[[chapters]]
id = 0
title = "Chapter 1: Test Run"
year = "2000"
description = "Only one chapter."

[chapters.goal]
min_stock_score = 10000.0

[chapters.modifiers]
demand_scale = 1.0
volatility = 0.0
regulator_aggression = 0.0
revenue_rate = 0.02
"#;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("meltdown-manager-{}-{}", std::process::id(), name))
}

fn ticks_until(engine: &mut Engine, tick: u64) -> Vec<NotableEvent> {
    let mut events = Vec::new();
    while engine.current_tick() < tick && !engine.is_game_over() {
        events.extend(engine.tick().events);
    }
    events
}

fn count(events: &[NotableEvent], kind: EventKind) -> usize {
    events.iter().filter(|e| e.kind == kind).count()
}

#[test]
fn test_custom_event_fires_once_on_rollover() {
    let scenario = ScenarioData::parse_toml(CUSTOM_SCENARIO).unwrap();
    let mut engine = Engine::new(
        SimulationConfig::default(),
        Arc::new(scenario),
        Difficulty::Ethical,
    );
    assert_eq!(engine.state().timeline.calendar_date, "Jan 2000");

    let before = ticks_until(&mut engine, 319);
    assert_eq!(count(&before, EventKind::ScenarioEvent), 0);
    let risk_before = engine.state().finance.audit_risk_percent;

    let report = engine.tick();
    assert_eq!(report.snapshot.tick, 320);
    let fired: Vec<_> = report
        .events
        .iter()
        .filter(|e| e.kind == EventKind::ScenarioEvent)
        .collect();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].title, "SURPRISE AUDIT");
    assert_eq!(fired[0].severity, Severity::Warning);
    assert_eq!(count(&report.events, EventKind::WeatherChange), 1);

    let state = &report.snapshot.state;
    assert_eq!(state.finance.audit_risk_percent, risk_before + 25.0);
    assert_eq!(state.timeline.current_weather, Weather::Snowy);
    assert_eq!(state.timeline.weather_demand_modifier, 1.5);
    assert_eq!(state.timeline.calendar_date, "Jan 2000");

    // Second rollover is still January: no repeat
    let later = ticks_until(&mut engine, 640);
    assert_eq!(engine.state().timeline.calendar.day_count(), 2);
    assert_eq!(count(&later, EventKind::ScenarioEvent), 0);
    assert_eq!(count(&later, EventKind::WeatherChange), 0);
}

#[test]
fn test_scenario_and_config_load_from_files() {
    let scenario_path = temp_path("scenario.toml");
    let config_path = temp_path("config.toml");
    std::fs::write(&scenario_path, CUSTOM_SCENARIO).unwrap();
    std::fs::write(
        &config_path,
        "seed = 7\n\n[lobbying]\nshield_ticks = 50\n",
    )
    .unwrap();

    let scenario = ScenarioData::load(&scenario_path).unwrap();
    let config = SimulationConfig::load(&config_path).unwrap();
    std::fs::remove_file(&scenario_path).ok();
    std::fs::remove_file(&config_path).ok();

    assert_eq!(scenario.events.len(), 1);
    assert_eq!(scenario.chapters.len(), 1);
    // Omitted tables fall back to the built-in ones
    assert_eq!(scenario.difficulties.len(), 4);
    assert_eq!(config.seed, 7);
    assert_eq!(config.lobbying.shield_ticks, 50);
    assert_eq!(config.lobbying.relief_interval, 10);
}

#[test]
fn test_bad_scenario_is_rejected() {
    let bad_month = CUSTOM_SCENARIO.replacen("month = 1", "month = 13", 1);
    assert!(matches!(
        ScenarioData::parse_toml(&bad_month),
        Err(MeltdownError::InvalidScenario(_))
    ));

    let bad_version = CUSTOM_SCENARIO.replacen("version = 1", "version = 9", 1);
    assert!(ScenarioData::parse_toml(&bad_version).is_err());

    let missing = temp_path("does-not-exist.toml");
    assert!(matches!(
        ScenarioData::load(&missing),
        Err(MeltdownError::IoError(_))
    ));
}

#[test]
fn test_builtin_scenario_is_quiet_before_may() {
    let mut engine = Engine::new(
        SimulationConfig::default(),
        Arc::new(ScenarioData::builtin()),
        Difficulty::Ethical,
    );
    let events = engine.run(320 * 4);
    assert_eq!(count(&events, EventKind::ScenarioEvent), 0);
}
