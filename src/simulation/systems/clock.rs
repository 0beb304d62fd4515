//! Clock, calendar, scripted events and weather

use crate::core::types::Severity;
use crate::scenario::weather::Weather;
use crate::simulation::events::EventKind;
use crate::simulation::systems::TickContext;

/// Advance the hour dial; on a weekly rollover fire scenario events and weather
pub fn advance(ctx: &mut TickContext<'_>) {
    let hours = ctx.config.reactor.hours_per_tick;
    if !ctx.state.timeline.calendar.advance(hours) {
        return;
    }

    let calendar = &ctx.state.timeline.calendar;
    let (month, year) = (calendar.month(), calendar.year());
    ctx.state.timeline.calendar_date = calendar.display();
    tracing::debug!(
        tick = ctx.tick,
        week = calendar.day_count(),
        date = %ctx.state.timeline.calendar_date,
        "Weekly rollover"
    );

    if let Some(index) = ctx.scenario.event_index_for(month, year) {
        if ctx.fired_events.insert(index) {
            fire_scenario_event(ctx, index);
        }
    }

    update_weather(ctx, month, year);
}

fn fire_scenario_event(ctx: &mut TickContext<'_>, index: usize) {
    let scenario = ctx.scenario;
    let event = &scenario.events[index];
    let shielded = ctx.state.finance.shield_active() && event.is_dangerous();
    let severity = if shielded {
        event.severity.downgraded()
    } else {
        event.severity
    };

    ctx.events.emit(
        ctx.tick,
        EventKind::ScenarioEvent,
        severity,
        event.title.clone(),
        event.description.clone(),
    );

    if shielded && event.lobbyable && !event.effects.is_empty() {
        ctx.events.emit(
            ctx.tick,
            EventKind::LobbyMitigation,
            Severity::Info,
            "LOBBYISTS MITIGATED EVENT IMPACT",
            format!("{} had no effect on the books.", event.title),
        );
        return;
    }

    for effect in &event.effects {
        effect.apply(ctx.state);
    }
}

fn update_weather(ctx: &mut TickContext<'_>, month: u32, year: i32) {
    let scenario = ctx.scenario;
    let timeline = &mut ctx.state.timeline;
    match scenario.weather_for(month, year) {
        Some(pattern) => {
            timeline.current_weather = pattern.weather;
            timeline.weather_demand_modifier = pattern.demand_modifier;
            timeline.weather_temperature_modifier = pattern.temperature_modifier;
            if timeline.weather_pattern.as_deref() != Some(pattern.name.as_str()) {
                timeline.weather_pattern = Some(pattern.name.clone());
                ctx.events.emit(
                    ctx.tick,
                    EventKind::WeatherChange,
                    Severity::Info,
                    pattern.name.clone(),
                    format!(
                        "{} conditions, demand x{:.1}",
                        pattern.weather.name(),
                        pattern.demand_modifier
                    ),
                );
            }
        }
        None => {
            timeline.current_weather = Weather::Sunny;
            timeline.weather_demand_modifier = 1.0;
            timeline.weather_temperature_modifier = 1.0;
            timeline.weather_pattern = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calendar::{default_epoch, Calendar};
    use crate::scenario::{HistoricEvent, StateEffect};
    use crate::simulation::testing::Harness;

    /// Harness one tick short of the first weekly rollover, with a single
    /// dangerous January audit in the schedule
    fn harness_before_rollover() -> Harness {
        let mut harness = Harness::new();
        harness.state.timeline.calendar = Calendar::new(default_epoch(), 23.99, 7);
        harness.scenario.weather.clear();
        harness.scenario.events = vec![HistoricEvent {
            month: 1,
            year: 2000,
            title: "SEC INQUIRY".into(),
            description: "Regulators ask about the partnerships.".into(),
            severity: Severity::Danger,
            lobbyable: true,
            effects: vec![StateEffect::AuditRiskDelta(25.0)],
        }];
        harness
    }

    fn kinds(harness: &Harness) -> Vec<EventKind> {
        harness.events.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_unshielded_event_applies_effects() {
        let mut harness = harness_before_rollover();
        harness.with(|ctx| advance(ctx));

        assert_eq!(harness.state.finance.audit_risk_percent, 25.0);
        assert_eq!(kinds(&harness), vec![EventKind::ScenarioEvent]);
        let event = harness.events.iter().next().unwrap();
        assert_eq!(event.severity, Severity::Danger);
        assert_eq!(event.title, "SEC INQUIRY");
    }

    #[test]
    fn test_shield_downgrades_and_mitigates_lobbyable_event() {
        let mut harness = harness_before_rollover();
        harness.state.finance.lobbying_shield_ticks_remaining = 100;
        harness.with(|ctx| advance(ctx));

        assert_eq!(harness.state.finance.audit_risk_percent, 0.0);
        assert_eq!(
            kinds(&harness),
            vec![EventKind::ScenarioEvent, EventKind::LobbyMitigation]
        );
        let severities: Vec<_> = harness.events.iter().map(|e| e.severity).collect();
        assert_eq!(severities, vec![Severity::Warning, Severity::Info]);
    }

    #[test]
    fn test_shield_only_downgrades_events_that_are_not_lobbyable() {
        let mut harness = harness_before_rollover();
        harness.scenario.events[0].lobbyable = false;
        harness.state.finance.lobbying_shield_ticks_remaining = 100;
        harness.with(|ctx| advance(ctx));

        assert_eq!(harness.state.finance.audit_risk_percent, 25.0);
        assert_eq!(kinds(&harness), vec![EventKind::ScenarioEvent]);
        assert_eq!(harness.events.iter().next().unwrap().severity, Severity::Warning);
    }

    #[test]
    fn test_event_fires_once_per_schedule_entry() {
        let mut harness = harness_before_rollover();
        harness.with(|ctx| advance(ctx));

        // Second January rollover: the audit is not repeated
        harness.state.timeline.calendar.advance(23.99);
        harness.with(|ctx| advance(ctx));
        assert_eq!(harness.state.timeline.calendar.day_count(), 2);
        assert_eq!(harness.state.finance.audit_risk_percent, 25.0);
        assert_eq!(harness.events.len(), 1);
    }

    #[test]
    fn test_no_dial_wrap_no_rollover() {
        let mut harness = Harness::new();
        let date = harness.state.timeline.calendar_date.clone();
        harness.with(|ctx| advance(ctx));
        assert_eq!(harness.state.timeline.calendar.day_count(), 0);
        assert_eq!(harness.state.timeline.calendar_date, date);
        assert!(harness.events.is_empty());
    }

    #[test]
    fn test_missing_weather_pattern_falls_back_to_sunny() {
        let mut harness = harness_before_rollover();
        harness.scenario.events.clear();
        let timeline = &mut harness.state.timeline;
        timeline.current_weather = Weather::Snowy;
        timeline.weather_demand_modifier = 1.5;
        timeline.weather_temperature_modifier = 0.8;
        timeline.weather_pattern = Some("Cold Snap".into());

        harness.with(|ctx| advance(ctx));

        let timeline = &harness.state.timeline;
        assert_eq!(timeline.current_weather, Weather::Sunny);
        assert_eq!(timeline.weather_demand_modifier, 1.0);
        assert_eq!(timeline.weather_temperature_modifier, 1.0);
        assert_eq!(timeline.weather_pattern, None);
        assert!(harness.events.is_empty());
    }
}
